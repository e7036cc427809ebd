//! Screen capture stage
//!
//! Grabs the pixels of a region and archives them as PNG under the
//! screenshot folder. The grab itself sits behind `ScreenCapturer` so the
//! pipeline runs against a fake in tests.

#[cfg(feature = "screen")]
mod screen;

#[cfg(feature = "screen")]
pub use screen::XcapCapturer;

use crate::error::{OcrSheetError, Result};
use image::{ImageFormat, RgbaImage};
use ocr_sheet_common::{naming, Region};
use std::path::{Path, PathBuf};

/// Source of screen pixels
pub trait ScreenCapturer {
    /// Returns the pixels of exactly `region`. HiDPI backends may return
    /// more pixels than the region's logical size.
    fn grab(&self, region: &Region) -> Result<RgbaImage>;
}

/// Pixels of one capture plus where they were archived
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub image: RgbaImage,
    pub path: PathBuf,
}

/// Bounds of one monitor in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl MonitorBounds {
    fn contains(&self, region: &Region) -> bool {
        let left = self.x as i64;
        let top = self.y as i64;
        let right = left + self.width as i64;
        let bottom = top + self.height as i64;

        region.x as i64 >= left
            && region.y as i64 >= top
            && region.right() as i64 <= right
            && region.bottom() as i64 <= bottom
    }
}

/// Finds the monitor that holds the whole region.
///
/// Returns its index and the region's origin relative to that monitor.
/// A region straddling two monitors or hanging off every screen is an error.
pub fn locate_region(region: &Region, monitors: &[MonitorBounds]) -> Result<(usize, u32, u32)> {
    monitors
        .iter()
        .position(|m| m.contains(region))
        .map(|index| {
            let m = monitors[index];
            let local_x = (region.x as i64 - m.x as i64) as u32;
            let local_y = (region.y as i64 - m.y as i64) as u32;
            (index, local_x, local_y)
        })
        .ok_or_else(|| OcrSheetError::Capture(format!("region ({}) is off-screen", region)))
}

/// Crop rectangle `(x, y, width, height)` inside a monitor image.
///
/// `local` is the region origin relative to the monitor, in the monitor's
/// reported units. HiDPI monitors return more pixels than those units, so the
/// rectangle is scaled by the image/bounds ratio and clamped to the image.
pub fn scaled_crop(
    bounds: MonitorBounds,
    local: (u32, u32),
    region: &Region,
    image: (u32, u32),
) -> (u32, u32, u32, u32) {
    let (image_w, image_h) = image;
    let scale_x = image_w as f64 / bounds.width.max(1) as f64;
    let scale_y = image_h as f64 / bounds.height.max(1) as f64;

    let x = (((local.0 as f64) * scale_x).round() as u32).min(image_w.saturating_sub(1));
    let y = (((local.1 as f64) * scale_y).round() as u32).min(image_h.saturating_sub(1));
    let width = (((region.width as f64) * scale_x).round() as u32)
        .min(image_w.saturating_sub(x))
        .max(1);
    let height = (((region.height as f64) * scale_y).round() as u32)
        .min(image_h.saturating_sub(y))
        .max(1);
    (x, y, width, height)
}

/// Grabs `region` and saves it under `dir` with a timestamped name
pub fn capture_region(
    capturer: &dyn ScreenCapturer,
    region: &Region,
    dir: &Path,
) -> Result<CapturedImage> {
    if region.is_degenerate() {
        return Err(OcrSheetError::Capture(format!(
            "region has no area ({}x{})",
            region.width, region.height
        )));
    }

    let image = capturer.grab(region)?;
    if image.width() == 0 || image.height() == 0 {
        return Err(OcrSheetError::Capture(format!(
            "capturer returned an empty image for {}",
            region
        )));
    }

    let path = save_screenshot(&image, dir)?;
    log::info!("[CAPTURE] {} saved to {}", region, path.display());
    Ok(CapturedImage { image, path })
}

fn save_screenshot(image: &RgbaImage, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| OcrSheetError::Capture(format!("{}: {}", dir.display(), e)))?;
    let path = dir.join(naming::screenshot_file_name(&naming::now()));
    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|e| OcrSheetError::Capture(format!("{}: {}", path.display(), e)))?;
    Ok(path)
}

/// Loads an image file from disk as if it had just been captured
pub fn load_image_file(path: &Path) -> Result<CapturedImage> {
    let image = image::open(path)
        .map_err(|e| OcrSheetError::Extraction(format!("{}: {}", path.display(), e)))?
        .to_rgba8();
    Ok(CapturedImage {
        image,
        path: path.to_path_buf(),
    })
}
