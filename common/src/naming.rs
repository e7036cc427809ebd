//! Archive file naming: `<prefix>_<YYYYMMDD_HHMMSS>.<ext>`

use chrono::{Local, NaiveDateTime};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub const TEXT_PREFIX: &str = "extracted";
pub const TEXT_EXTENSION: &str = "txt";
pub const SCREENSHOT_PREFIX: &str = "screenshot";
pub const SCREENSHOT_EXTENSION: &str = "png";

/// Second resolution: two names made in the same second collide
pub fn archive_file_name(prefix: &str, extension: &str, at: &NaiveDateTime) -> String {
    format!("{}_{}.{}", prefix, at.format(TIMESTAMP_FORMAT), extension)
}

pub fn text_file_name(at: &NaiveDateTime) -> String {
    archive_file_name(TEXT_PREFIX, TEXT_EXTENSION, at)
}

pub fn screenshot_file_name(at: &NaiveDateTime) -> String {
    archive_file_name(SCREENSHOT_PREFIX, SCREENSHOT_EXTENSION, at)
}

/// Local wall-clock time, the clock the archive names are stamped with
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 9)
            .unwrap()
            .and_hms_opt(7, 5, 3)
            .unwrap()
    }

    #[test]
    fn test_text_file_name() {
        assert_eq!(text_file_name(&sample()), "extracted_20260109_070503.txt");
    }

    #[test]
    fn test_screenshot_file_name() {
        assert_eq!(screenshot_file_name(&sample()), "screenshot_20260109_070503.png");
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(archive_file_name("debug", "log", &sample()), "debug_20260109_070503.log");
    }

    #[test]
    fn test_now_fits_the_pattern() {
        let name = text_file_name(&now());
        // "extracted_" + 15-char stamp + ".txt"
        assert_eq!(name.len(), 10 + 15 + 4);
        assert_eq!(name.as_bytes()[18], b'_');
    }
}
