//! Capture → OCR → archive → spreadsheet pipeline.
//!
//! Every stage returns a `Result`; the first failing stage is tagged with its
//! `Stage` and ends the run. Archiving is the one best-effort stage: its
//! failure is logged and carried in the report as a warning.

use crate::archive;
use crate::capture::{self, CapturedImage, ScreenCapturer};
use crate::config::Config;
use crate::error::OcrSheetError;
use crate::ocr::{self, TextExtractor};
use crate::selector::RegionSelector;
use crate::spreadsheet::{self, WriteSummary};
use ocr_sheet_common::{Region, Stage};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    /// `None` when the image came from a file instead of the screen
    pub region: Option<Region>,
    pub screenshot_path: PathBuf,
    pub text_path: Option<PathBuf>,
    pub archive_warning: Option<String>,
    pub workbook_path: PathBuf,
    pub sheet_name: String,
    pub rows_written: usize,
    pub cells_written: usize,
}

/// Result of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PipelineOutcome {
    Success(PipelineReport),
    Failure { stage: Stage, message: String },
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success(_))
    }

    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            PipelineOutcome::Failure { stage, .. } => Some(*stage),
            PipelineOutcome::Success(_) => None,
        }
    }
}

/// An error together with the stage that raised it
#[derive(Debug)]
struct StageFailure {
    stage: Stage,
    error: OcrSheetError,
}

fn at(stage: Stage) -> impl FnOnce(OcrSheetError) -> StageFailure {
    move |error| StageFailure { stage, error }
}

impl From<StageFailure> for PipelineOutcome {
    fn from(failure: StageFailure) -> Self {
        log::error!("[PIPELINE] {} stage failed: {}", failure.stage, failure.error);
        PipelineOutcome::Failure {
            stage: failure.stage,
            message: failure.error.to_string(),
        }
    }
}

pub struct Pipeline<C, E> {
    config: Config,
    capturer: C,
    extractor: E,
}

impl<C: ScreenCapturer, E: TextExtractor> Pipeline<C, E> {
    pub fn new(config: Config, capturer: C, extractor: E) -> Self {
        Self {
            config,
            capturer,
            extractor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs every stage, starting with region selection
    pub fn run(&self, selector: &mut dyn RegionSelector) -> PipelineOutcome {
        match self.try_run(selector) {
            Ok(report) => PipelineOutcome::Success(report),
            Err(failure) => failure.into(),
        }
    }

    /// OCRs an existing image file, then archives and writes the text
    pub fn run_from_image(&self, path: &Path) -> PipelineOutcome {
        let result = capture::load_image_file(path)
            .map_err(at(Stage::Extraction))
            .and_then(|image| self.finish_from_image(None, image));
        match result {
            Ok(report) => PipelineOutcome::Success(report),
            Err(failure) => failure.into(),
        }
    }

    /// Spreadsheet stage alone
    pub fn write_text(&self, text: &str) -> crate::error::Result<WriteSummary> {
        spreadsheet::write_text(
            text,
            &self.config.workbook_path,
            &self.config.sheet_name,
            self.config.anchor()?,
        )
    }

    fn try_run(&self, selector: &mut dyn RegionSelector) -> Result<PipelineReport, StageFailure> {
        log::info!("[1/5] Selecting region");
        let region = selector.select_region().map_err(at(Stage::Selection))?;

        if self.config.capture_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.config.capture_delay_ms));
        }

        log::info!("[2/5] Capturing {}", region);
        let image = capture::capture_region(
            &self.capturer,
            &region,
            &self.config.screenshot_archive_dir,
        )
        .map_err(at(Stage::Capture))?;

        self.finish_from_image(Some(region), image)
    }

    fn finish_from_image(
        &self,
        region: Option<Region>,
        image: CapturedImage,
    ) -> Result<PipelineReport, StageFailure> {
        log::info!("[3/5] Extracting text from {}", image.path.display());
        let text = self
            .extractor
            .extract_text(&image)
            .and_then(ocr::ensure_text)
            .map_err(at(Stage::Extraction))?;

        log::info!("[4/5] Archiving text");
        let (text_path, archive_warning) =
            match archive::archive_text(&self.config.text_archive_dir, &text) {
                Ok(path) => (Some(path), None),
                Err(e) => {
                    log::warn!("[PIPELINE] archive skipped: {}", e);
                    (None, Some(e.to_string()))
                }
            };

        log::info!("[5/5] Writing to {}", self.config.workbook_path.display());
        let summary = self.write_text(&text).map_err(at(Stage::Spreadsheet))?;

        Ok(PipelineReport {
            region,
            screenshot_path: image.path,
            text_path,
            archive_warning,
            workbook_path: self.config.workbook_path.clone(),
            sheet_name: self.config.sheet_name.clone(),
            rows_written: summary.rows,
            cells_written: summary.cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::selector::PointPairSelector;
    use image::{Rgba, RgbaImage};
    use ocr_sheet_common::ScreenPoint;
    use std::cell::RefCell;
    use tempfile::tempdir;

    struct White;

    impl ScreenCapturer for White {
        fn grab(&self, region: &Region) -> Result<RgbaImage> {
            Ok(RgbaImage::from_pixel(region.width, region.height, Rgba([255, 255, 255, 255])))
        }
    }

    struct Scripted {
        reply: std::result::Result<String, String>,
        seen: RefCell<Vec<PathBuf>>,
    }

    impl Scripted {
        fn text(text: &str) -> Self {
            Self { reply: Ok(text.to_string()), seen: RefCell::new(Vec::new()) }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl TextExtractor for Scripted {
        fn extract_text(&self, image: &CapturedImage) -> Result<String> {
            self.seen.borrow_mut().push(image.path.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(OcrSheetError::Extraction(message.clone())),
            }
        }
    }

    fn selector() -> PointPairSelector {
        PointPairSelector::new(ScreenPoint::new(10, 10), ScreenPoint::new(60, 40))
    }

    #[test]
    fn test_ocr_sees_the_archived_screenshot() {
        let dir = tempdir().unwrap();
        let config = Config::rooted_at(dir.path());
        config.prepare_dirs().unwrap();
        let pipeline = Pipeline::new(config, White, Scripted::text("hello"));

        let report = match pipeline.run(&mut selector()) {
            PipelineOutcome::Success(report) => report,
            other => panic!("expected success: {:?}", other),
        };
        assert_eq!(pipeline.extractor.seen.borrow().as_slice(), &[report.screenshot_path.clone()]);
        assert_eq!(report.region, Some(Region { x: 10, y: 10, width: 50, height: 30 }));
    }

    #[test]
    fn test_cancelled_selection_stops_before_capture() {
        let dir = tempdir().unwrap();
        let config = Config::rooted_at(dir.path());
        config.prepare_dirs().unwrap();
        let pipeline = Pipeline::new(config, White, Scripted::text("never"));

        let outcome = pipeline.run(&mut PointPairSelector::cancelled());
        assert_eq!(outcome.failed_stage(), Some(Stage::Selection));
        assert!(pipeline.extractor.seen.borrow().is_empty());
    }

    #[test]
    fn test_degenerate_region_is_capture_failure() {
        let dir = tempdir().unwrap();
        let config = Config::rooted_at(dir.path());
        config.prepare_dirs().unwrap();
        let pipeline = Pipeline::new(config, White, Scripted::text("never"));

        let p = ScreenPoint::new(5, 5);
        let outcome = pipeline.run(&mut PointPairSelector::new(p, p));
        assert_eq!(outcome.failed_stage(), Some(Stage::Capture));
    }

    #[test]
    fn test_engine_error_is_extraction_failure() {
        let dir = tempdir().unwrap();
        let config = Config::rooted_at(dir.path());
        config.prepare_dirs().unwrap();
        let workbook = config.workbook_path.clone();
        let pipeline = Pipeline::new(config, White, Scripted::failing("tesseract not found"));

        let outcome = pipeline.run(&mut selector());
        match outcome {
            PipelineOutcome::Failure { stage, message } => {
                assert_eq!(stage, Stage::Extraction);
                assert!(message.contains("tesseract not found"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(!workbook.exists());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = PipelineOutcome::Failure {
            stage: Stage::Capture,
            message: "off-screen".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["stage"], "capture");
    }
}
