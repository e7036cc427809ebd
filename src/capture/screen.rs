//! Live screen capture via xcap.
//!
//! The monitor holding the region is captured whole and then cropped.
//! HiDPI monitors report logical bounds but return physical pixels, so the
//! crop is scaled by the ratio between the two. The returned image keeps the
//! physical resolution; OCR reads small text better that way.

use super::{locate_region, scaled_crop, MonitorBounds, ScreenCapturer};
use crate::error::{OcrSheetError, Result};
use image::imageops;
use image::RgbaImage;
use ocr_sheet_common::Region;
use xcap::Monitor;

#[derive(Debug, Default, Clone, Copy)]
pub struct XcapCapturer;

impl XcapCapturer {
    pub fn new() -> Self {
        Self
    }
}

fn capture_err(e: impl std::fmt::Display) -> OcrSheetError {
    OcrSheetError::Capture(e.to_string())
}

fn monitor_bounds(monitor: &Monitor) -> Result<MonitorBounds> {
    Ok(MonitorBounds {
        x: monitor.x().map_err(capture_err)?,
        y: monitor.y().map_err(capture_err)?,
        width: monitor.width().map_err(capture_err)?,
        height: monitor.height().map_err(capture_err)?,
    })
}

impl ScreenCapturer for XcapCapturer {
    fn grab(&self, region: &Region) -> Result<RgbaImage> {
        let monitors = Monitor::all().map_err(capture_err)?;
        if monitors.is_empty() {
            return Err(OcrSheetError::Capture("no monitors detected".into()));
        }

        let bounds = monitors
            .iter()
            .map(monitor_bounds)
            .collect::<Result<Vec<_>>>()?;
        let (index, local_x, local_y) = locate_region(region, &bounds)?;
        let monitor = &monitors[index];

        let screenshot = monitor.capture_image().map_err(|e| {
            OcrSheetError::Capture(format!(
                "{} (on macOS, grant Screen Recording permission)",
                e
            ))
        })?;

        let (px, py, pw, ph) = scaled_crop(
            bounds[index],
            (local_x, local_y),
            region,
            screenshot.dimensions(),
        );
        log::debug!(
            "[CAPTURE] monitor {} at {:?}, image {:?}, crop {}x{} at ({}, {})",
            index,
            bounds[index],
            screenshot.dimensions(),
            pw,
            ph,
            px,
            py
        );

        Ok(imageops::crop_imm(&screenshot, px, py, pw, ph).to_image())
    }
}
