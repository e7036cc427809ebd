use ocr_sheet_common::Stage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrSheetError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Region selection failed: {0}")]
    Selection(String),

    #[error("Screen capture failed: {0}")]
    Capture(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Text archive failed: {0}")]
    Archive(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("A capture is already running; wait for it to finish")]
    Busy,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] ocr_sheet_common::Error),
}

impl OcrSheetError {
    /// The pipeline stage this error belongs to, when it names one
    pub fn stage(&self) -> Option<Stage> {
        match self {
            OcrSheetError::Selection(_) => Some(Stage::Selection),
            OcrSheetError::Capture(_) => Some(Stage::Capture),
            OcrSheetError::Extraction(_) => Some(Stage::Extraction),
            OcrSheetError::Archive(_) => Some(Stage::Archive),
            OcrSheetError::Spreadsheet(_) => Some(Stage::Spreadsheet),
            _ => None,
        }
    }
}

impl From<image::ImageError> for OcrSheetError {
    fn from(err: image::ImageError) -> Self {
        OcrSheetError::Capture(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OcrSheetError>;
