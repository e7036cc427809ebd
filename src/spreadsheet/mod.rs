//! Spreadsheet stage
//!
//! Lays OCR text out as a grid and writes it into an xlsx workbook,
//! loading the workbook and sheet when they exist and creating them when
//! they don't. Cells outside the written rectangle are left alone.

pub mod workbook;

pub use workbook::WorkbookModel;

use crate::error::{OcrSheetError, Result};
use ocr_sheet_common::{layout_text, CellAnchor};
use serde::Serialize;
use std::path::Path;

/// What one write touched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub rows: usize,
    pub cells: usize,
    pub created_workbook: bool,
    pub created_sheet: bool,
}

/// Writes `text` into `sheet_name` of the workbook at `path`, starting at the
/// 1-indexed `anchor`
pub fn write_text(
    text: &str,
    path: &Path,
    sheet_name: &str,
    anchor: CellAnchor,
) -> Result<WriteSummary> {
    let placements =
        layout_text(text, anchor).map_err(|e| OcrSheetError::Spreadsheet(e.to_string()))?;

    let created_workbook = !path.exists();
    let mut workbook = WorkbookModel::load_or_create(path)?;
    let created_sheet = !workbook.has_sheet(sheet_name);
    workbook.ensure_sheet(sheet_name)?;

    for cell in &placements {
        workbook.set_text(sheet_name, cell.row, u32::from(cell.col), &cell.value)?;
    }

    workbook.save(path)?;

    // rows that only clear cells (tesseract's trailing "\n\x0c") don't count
    let rows = placements
        .iter()
        .filter(|c| !c.value.is_empty())
        .map(|c| c.row)
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    log::info!(
        "[XLSX] Text written to {} ({:?}, {} cells from row {}, col {})",
        path.display(),
        sheet_name,
        placements.len(),
        anchor.row,
        anchor.col
    );

    Ok(WriteSummary {
        rows,
        cells: placements.len(),
        created_workbook,
        created_sheet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn anchor() -> CellAnchor {
        CellAnchor::new(2, 2).unwrap()
    }

    #[test]
    fn test_new_workbook_summary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new.xlsx");

        let summary = write_text("A\tB\nC\tD", &path, "Sheet1", anchor()).unwrap();
        assert_eq!(
            summary,
            WriteSummary { rows: 2, cells: 4, created_workbook: true, created_sheet: true }
        );

        let again = write_text("E", &path, "Sheet1", anchor()).unwrap();
        assert!(!again.created_workbook);
        assert!(!again.created_sheet);
    }

    #[test]
    fn test_empty_cells_clear_inside_rectangle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clear.xlsx");

        write_text("A\tB", &path, "S", anchor()).unwrap();
        write_text("X\t", &path, "S", anchor()).unwrap();

        let book = WorkbookModel::load(&path).unwrap();
        assert_eq!(book.text("S", 2, 2).as_deref(), Some("X"));
        assert_eq!(book.text("S", 2, 3), None);
    }

    #[test]
    fn test_trailing_form_feed_row_not_counted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ocr.xlsx");

        let summary = write_text("Name\tAge\nAlice\t30\n\x0c", &path, "Sheet1", anchor()).unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.cells, 5);

        let book = WorkbookModel::load(&path).unwrap();
        assert_eq!(book.text("Sheet1", 3, 3).as_deref(), Some("30"));
        assert_eq!(book.text("Sheet1", 4, 2), None);
    }

    #[test]
    fn test_anchor_overflow_is_spreadsheet_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.xlsx");
        let far = CellAnchor::new(1, ocr_sheet_common::grid::MAX_COL).unwrap();

        let err = write_text("a\tb", &path, "S", far).unwrap_err();
        assert!(matches!(err, OcrSheetError::Spreadsheet(_)));
        assert!(!path.exists(), "nothing is written when the layout fails");
    }
}
