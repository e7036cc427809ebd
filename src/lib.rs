//! ocr-sheet: screen region → OCR → spreadsheet
//!
//! Stages run in order: selector → capture → ocr → archive → spreadsheet.
//! `pipeline` strings them together and `controller` guards the trigger.

pub mod archive;
pub mod capture;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod ocr;
pub mod pipeline;
pub mod selector;
pub mod spreadsheet;

pub use capture::{CapturedImage, ScreenCapturer};
pub use config::Config;
pub use controller::{Controller, ControllerState, Dialog, DialogLevel};
pub use error::{OcrSheetError, Result};
pub use ocr::{TesseractExtractor, TextExtractor};
pub use pipeline::{Pipeline, PipelineOutcome, PipelineReport};
pub use selector::{PointPairSelector, RegionSelector};
