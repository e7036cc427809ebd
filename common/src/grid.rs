//! OCR text → spreadsheet cells
//!
//! Rows are split on `'\n'`, cells on `'\t'`, and each cell is trimmed.
//! Placement coordinates are 1-indexed, the way a spreadsheet shows them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Largest row number an xlsx sheet can hold (1-indexed)
pub const MAX_ROW: u32 = 1_048_576;
/// Largest column number an xlsx sheet can hold (1-indexed)
pub const MAX_COL: u16 = 16_384;

/// Top-left cell of a write, 1-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellAnchor {
    pub row: u32,
    pub col: u16,
}

impl CellAnchor {
    pub fn new(row: u32, col: u16) -> Result<Self> {
        if row == 0 || col == 0 {
            return Err(Error::CellOutOfRange(format!(
                "anchor ({}, {}) must be 1-indexed",
                row, col
            )));
        }
        if row > MAX_ROW || col > MAX_COL {
            return Err(Error::CellOutOfRange(format!(
                "anchor ({}, {}) exceeds {}x{}",
                row, col, MAX_ROW, MAX_COL
            )));
        }
        Ok(Self { row, col })
    }
}

/// One value destined for one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPlacement {
    pub row: u32,
    pub col: u16,
    pub value: String,
}

/// Splits text into trimmed cells.
///
/// Every newline starts a row, so text ending in `'\n'` yields a trailing
/// row holding one empty cell.
pub fn parse_text_grid(text: &str) -> Vec<Vec<String>> {
    text.split('\n')
        .map(|row| row.split('\t').map(|cell| cell.trim().to_string()).collect())
        .collect()
}

/// Maps a parsed grid onto sheet coordinates starting at `anchor`
pub fn place_grid(grid: &[Vec<String>], anchor: CellAnchor) -> Result<Vec<CellPlacement>> {
    let mut placements = Vec::new();

    for (i, row) in grid.iter().enumerate() {
        let row_num = u32::try_from(i)
            .ok()
            .and_then(|i| anchor.row.checked_add(i))
            .filter(|r| *r <= MAX_ROW)
            .ok_or_else(|| {
                Error::CellOutOfRange(format!("row {} + {} exceeds {}", anchor.row, i, MAX_ROW))
            })?;

        for (j, value) in row.iter().enumerate() {
            let col_num = u16::try_from(j)
                .ok()
                .and_then(|j| anchor.col.checked_add(j))
                .filter(|c| *c <= MAX_COL)
                .ok_or_else(|| {
                    Error::CellOutOfRange(format!(
                        "column {} + {} exceeds {}",
                        anchor.col, j, MAX_COL
                    ))
                })?;

            placements.push(CellPlacement {
                row: row_num,
                col: col_num,
                value: value.clone(),
            });
        }
    }

    Ok(placements)
}

/// Convenience: parse then place
pub fn layout_text(text: &str, anchor: CellAnchor) -> Result<Vec<CellPlacement>> {
    place_grid(&parse_text_grid(text), anchor)
}
