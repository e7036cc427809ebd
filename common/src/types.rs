//! Geometry and pipeline types
//!
//! Shared by the CLI and the desktop popup:
//! - ScreenPoint: one sampled cursor position
//! - Region: the normalized rectangle handed to the capturer
//! - Stage: which pipeline step produced a failure

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A position on the screen, in the units the capture backend expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl FromStr for ScreenPoint {
    type Err = Error;

    /// Parses `"X,Y"` (whitespace around either number is allowed)
    fn from_str(s: &str) -> Result<Self> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| Error::InvalidPoint(format!("expected X,Y but got {:?}", s)))?;
        let x = x
            .trim()
            .parse::<i32>()
            .map_err(|e| Error::InvalidPoint(format!("x in {:?}: {}", s, e)))?;
        let y = y
            .trim()
            .parse::<i32>()
            .map_err(|e| Error::InvalidPoint(format!("y in {:?}: {}", s, e)))?;
        Ok(Self { x, y })
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Axis-aligned screen rectangle. Built once per run and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Normalizes two corner points into a region.
    ///
    /// The corners may be given in any order. A normalized origin left of or
    /// above the screen origin cannot be captured and is rejected.
    pub fn from_points(start: ScreenPoint, end: ScreenPoint) -> Result<Self> {
        let min_x = start.x.min(end.x);
        let min_y = start.y.min(end.y);
        if min_x < 0 || min_y < 0 {
            return Err(Error::InvalidRegion(format!(
                "origin ({}, {}) is left of or above the primary monitor; \
                 regions on monitors left of or above the primary are not supported",
                min_x, min_y
            )));
        }

        Ok(Self {
            x: min_x as u32,
            y: min_y as u32,
            width: start.x.abs_diff(end.x),
            height: start.y.abs_diff(end.y),
        })
    }

    /// True when the rectangle has no pixels to capture
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={}, y={}, width={}, height={}", self.x, self.y, self.width, self.height)
    }
}

/// Pipeline steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Selection,
    Capture,
    Extraction,
    Archive,
    Spreadsheet,
}

impl Stage {
    /// Archiving is best-effort; every other stage aborts the run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Stage::Archive)
    }

    /// Short message shown to the user when this stage fails
    pub fn user_message(&self) -> &'static str {
        match self {
            Stage::Selection => "Region selection failed. Please try again.",
            Stage::Capture => "Screen capture failed. Please try again.",
            Stage::Extraction => "No text extracted. Please try again.",
            Stage::Archive => "Extracted text could not be archived.",
            Stage::Spreadsheet => "Writing to the spreadsheet failed.",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Selection => "selection",
            Stage::Capture => "capture",
            Stage::Extraction => "extraction",
            Stage::Archive => "archive",
            Stage::Spreadsheet => "spreadsheet",
        };
        f.write_str(name)
    }
}
