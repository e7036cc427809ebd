//! OCR stage: tesseract via rusty-tesseract.
//!
//! The archived screenshot is handed to tesseract by path, so the engine
//! sees exactly the file kept for debugging.

use crate::capture::CapturedImage;
use crate::config::OcrSettings;
use crate::error::{OcrSheetError, Result};
use rusty_tesseract::{Args, Image};

/// Image → text
pub trait TextExtractor {
    fn extract_text(&self, image: &CapturedImage) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct TesseractExtractor {
    settings: OcrSettings,
}

impl TesseractExtractor {
    pub fn new(settings: OcrSettings) -> Self {
        Self { settings }
    }

    fn args(&self) -> Args {
        Args {
            lang: self.settings.language.clone(),
            dpi: self.settings.dpi,
            psm: self.settings.psm,
            oem: self.settings.oem,
            ..Args::default()
        }
    }
}

impl TextExtractor for TesseractExtractor {
    fn extract_text(&self, image: &CapturedImage) -> Result<String> {
        let input = Image::from_path(image.path.clone())
            .map_err(|e| OcrSheetError::Extraction(format!("{}: {}", image.path.display(), e)))?;

        let start = std::time::Instant::now();
        let text = rusty_tesseract::image_to_string(&input, &self.args())
            .map_err(|e| OcrSheetError::Extraction(format!("tesseract: {}", e)))?;
        log::info!(
            "[OCR] Extracted {} chars in {}ms (lang={})",
            text.chars().count(),
            start.elapsed().as_millis(),
            self.settings.language
        );
        Ok(text)
    }
}

/// Rejects OCR output with nothing but whitespace in it.
///
/// Tesseract answers a blank image with a lone form feed, which must count
/// as "no text".
pub fn ensure_text(text: String) -> Result<String> {
    if text.trim().is_empty() {
        return Err(OcrSheetError::Extraction("no text recognized".into()));
    }
    Ok(text)
}
