//! Text archive stage
//!
//! Each run's raw OCR text is kept as `extracted_<timestamp>.txt`. Archives
//! are write-once and never read back by the tool.

use crate::error::{OcrSheetError, Result};
use chrono::NaiveDateTime;
use ocr_sheet_common::naming;
use std::path::{Path, PathBuf};

/// Writes `text` as UTF-8 under `dir`, stamped with the current time
pub fn archive_text(dir: &Path, text: &str) -> Result<PathBuf> {
    archive_text_at(dir, text, &naming::now())
}

/// Same as [`archive_text`] with an explicit timestamp
pub fn archive_text_at(dir: &Path, text: &str, at: &NaiveDateTime) -> Result<PathBuf> {
    let path = dir.join(naming::text_file_name(at));
    std::fs::write(&path, text.as_bytes())
        .map_err(|e| OcrSheetError::Archive(format!("{}: {}", path.display(), e)))?;
    log::info!("[ARCHIVE] Extracted text saved to: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn at(sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(15, 9, sec)
            .unwrap()
    }

    #[test]
    fn test_round_trip_multiline_utf8() {
        let dir = tempdir().unwrap();
        let text = "Name\tAge\nAlice\t30\n日本語テキスト\r\nÜmlaut – dash\n";

        let path = archive_text(dir.path(), text).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn test_name_uses_timestamp() {
        let dir = tempdir().unwrap();
        let path = archive_text_at(dir.path(), "x", &at(26)).unwrap();
        assert_eq!(path.file_name().unwrap(), "extracted_20260314_150926.txt");
    }

    #[test]
    fn test_same_second_last_write_wins() {
        let dir = tempdir().unwrap();
        archive_text_at(dir.path(), "first", &at(1)).unwrap();
        let path = archive_text_at(dir.path(), "second", &at(1)).unwrap();

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }

    #[test]
    fn test_missing_dir_is_archive_error() {
        let dir = tempdir().unwrap();
        let err = archive_text(&dir.path().join("missing"), "text").unwrap_err();
        assert!(matches!(err, OcrSheetError::Archive(_)));
    }
}
