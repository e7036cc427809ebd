use crate::error::{OcrSheetError, Result};
use ocr_sheet_common::CellAnchor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tesseract options passed through to the OCR stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// tesseract language code(s), e.g. "eng" or "eng+jpn"
    pub language: String,
    pub dpi: Option<i32>,
    /// page segmentation mode
    pub psm: Option<i32>,
    /// OCR engine mode
    pub oem: Option<i32>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            language: "eng".into(),
            dpi: Some(150),
            psm: Some(3),
            oem: Some(3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workbook_path: PathBuf,
    pub sheet_name: String,
    /// 1-indexed row of the first written cell
    pub start_row: u32,
    /// 1-indexed column of the first written cell
    pub start_col: u16,
    pub text_archive_dir: PathBuf,
    pub screenshot_archive_dir: PathBuf,
    /// Wait before grabbing pixels so the selection overlay is gone
    pub capture_delay_ms: u64,
    pub ocr: OcrSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from("Research_Tracker.xlsx"),
            sheet_name: "Sheet1".into(),
            start_row: 2,
            start_col: 2,
            text_archive_dir: PathBuf::from("extracted_text"),
            screenshot_archive_dir: PathBuf::from("screenshots"),
            capture_delay_ms: 150,
            ocr: OcrSettings::default(),
        }
    }
}

impl Config {
    /// Reads the user config file, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str::<Config>(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| OcrSheetError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("ocr-sheet").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.sheet_name.trim().is_empty() {
            return Err(OcrSheetError::Config("sheet_name must not be empty".into()));
        }
        if self.workbook_path.as_os_str().is_empty() {
            return Err(OcrSheetError::Config("workbook_path must not be empty".into()));
        }
        if self.ocr.language.trim().is_empty() {
            return Err(OcrSheetError::Config("ocr.language must not be empty".into()));
        }
        self.anchor()
            .map_err(|e| OcrSheetError::Config(e.to_string()))?;
        Ok(())
    }

    /// First written cell, 1-indexed
    pub fn anchor(&self) -> Result<CellAnchor> {
        Ok(CellAnchor::new(self.start_row, self.start_col)?)
    }

    /// Creates both archive folders. Called once at startup.
    pub fn prepare_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.text_archive_dir)?;
        std::fs::create_dir_all(&self.screenshot_archive_dir)?;
        Ok(())
    }

    /// Points every path of the config inside `root` (tests, portable runs)
    pub fn rooted_at(root: &Path) -> Self {
        let defaults = Self::default();
        Self {
            workbook_path: root.join(&defaults.workbook_path),
            text_archive_dir: root.join(&defaults.text_archive_dir),
            screenshot_archive_dir: root.join(&defaults.screenshot_archive_dir),
            capture_delay_ms: 0,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_tracker_layout() {
        let config = Config::default();
        assert_eq!(config.workbook_path, PathBuf::from("Research_Tracker.xlsx"));
        assert_eq!(config.sheet_name, "Sheet1");
        assert_eq!((config.start_row, config.start_col), (2, 2));
        assert_eq!(config.ocr.language, "eng");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "sheet_name": "Notes", "ocr": { "language": "jpn" } }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.sheet_name, "Notes");
        assert_eq!(config.ocr.language, "jpn");
        assert_eq!(config.ocr.psm, Some(3));
        assert_eq!(config.start_row, 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::rooted_at(dir.path());
        config.start_col = 5;

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_zero_anchor_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "start_row": 0 }"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, OcrSheetError::Config(_)));
    }

    #[test]
    fn test_blank_sheet_name_rejected() {
        let config = Config { sheet_name: "  ".into(), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_prepare_dirs_creates_both_folders() {
        let dir = tempdir().unwrap();
        let config = Config::rooted_at(dir.path());

        config.prepare_dirs().unwrap();
        assert!(config.text_archive_dir.is_dir());
        assert!(config.screenshot_archive_dir.is_dir());
        // idempotent
        config.prepare_dirs().unwrap();
    }
}
