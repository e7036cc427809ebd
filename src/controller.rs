//! Idle/Running controller behind the "Start Process" button
//!
//! A trigger while a run is in flight is rejected, never queued.

use crate::capture::ScreenCapturer;
use crate::error::{OcrSheetError, Result};
use crate::ocr::TextExtractor;
use crate::pipeline::{Pipeline, PipelineOutcome};
use crate::selector::RegionSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogLevel {
    Info,
    Error,
}

/// What the user is told when a run ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub level: DialogLevel,
    pub title: String,
    pub message: String,
}

pub const SUCCESS_MESSAGE: &str = "Text copied to the spreadsheet successfully!";

impl Dialog {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: DialogLevel::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            level: DialogLevel::Error,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn for_outcome(outcome: &PipelineOutcome) -> Self {
        match outcome {
            PipelineOutcome::Success(report) => {
                let mut message = format!(
                    "{}\n\n{} cell(s) written to {} [{}]",
                    SUCCESS_MESSAGE,
                    report.cells_written,
                    report.workbook_path.display(),
                    report.sheet_name
                );
                if let Some(warning) = &report.archive_warning {
                    message.push_str(&format!("\n\nWarning: {}", warning));
                }
                Self::info("Success", message)
            }
            PipelineOutcome::Failure { stage, message } => {
                Self::error("Error", format!("{}\n\n{}", stage.user_message(), message))
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == DialogLevel::Error
    }
}

#[derive(Debug, Default)]
pub struct Controller {
    state: ControllerState,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ControllerState::Idle
    }

    /// Idle → Running. Rejected with `Busy` while a run is in flight.
    pub fn begin(&mut self) -> Result<()> {
        if self.state == ControllerState::Running {
            log::warn!("[CONTROLLER] trigger ignored, a run is in progress");
            return Err(OcrSheetError::Busy);
        }
        self.state = ControllerState::Running;
        Ok(())
    }

    /// Running → Idle, whatever the outcome
    pub fn finish(&mut self, outcome: &PipelineOutcome) -> Dialog {
        self.state = ControllerState::Idle;
        Dialog::for_outcome(outcome)
    }

    /// Running → Idle when the run ended without an outcome (worker lost)
    pub fn abort(&mut self, reason: &str) -> Dialog {
        self.state = ControllerState::Idle;
        Dialog::error("Error", format!("An error occurred: {}", reason))
    }

    /// begin + run + finish on the calling thread
    pub fn run<C, E>(
        &mut self,
        pipeline: &Pipeline<C, E>,
        selector: &mut dyn RegionSelector,
    ) -> Result<(PipelineOutcome, Dialog)>
    where
        C: ScreenCapturer,
        E: TextExtractor,
    {
        self.begin()?;
        let outcome = pipeline.run(selector);
        let dialog = self.finish(&outcome);
        Ok((outcome, dialog))
    }
}
