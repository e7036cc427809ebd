//! Workbook edited in place with umya-spreadsheet
//!
//! The whole package is loaded and written back, so styles, number formats,
//! column widths, merged ranges and everything else outside the touched
//! cells survive a save. Coordinates here are 1-indexed like Excel's.

use crate::error::{OcrSheetError, Result};
use std::path::Path;
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Characters Excel refuses in a sheet name
const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];
const MAX_SHEET_NAME_LEN: usize = 31;

pub struct WorkbookModel {
    book: Spreadsheet,
}

impl Default for WorkbookModel {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookModel {
    /// Empty workbook with no sheets
    pub fn new() -> Self {
        Self {
            book: umya_spreadsheet::new_file_empty_worksheet(),
        }
    }

    /// Loads `path` when it exists, otherwise starts an empty workbook
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            log::debug!("[XLSX] Loading {}", path.display());
            Self::load(path)
        } else {
            log::debug!("[XLSX] {} not found, creating a new workbook", path.display());
            Ok(Self::new())
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
            OcrSheetError::Spreadsheet(format!("failed to open {}: {}", path.display(), e))
        })?;
        Ok(Self { book })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.book
            .get_sheet_collection()
            .iter()
            .map(|s| s.get_name().to_string())
            .collect()
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet(name).is_some()
    }

    fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.book
            .get_sheet_collection()
            .iter()
            .find(|s| s.get_name() == name)
    }

    /// Returns the named sheet, appending it when missing
    fn sheet_mut_or_create(&mut self, name: &str) -> Result<&mut Worksheet> {
        if !self.has_sheet(name) {
            validate_sheet_name(name)?;
            log::debug!("[XLSX] Creating sheet {:?}", name);
            self.book
                .new_sheet(name)
                .map_err(|e| OcrSheetError::Spreadsheet(format!("sheet {:?}: {}", name, e)))?;
        }
        self.book
            .get_sheet_by_name_mut(name)
            .ok_or_else(|| OcrSheetError::Spreadsheet(format!("sheet {:?} not found", name)))
    }

    /// Makes sure `name` exists without touching any cell
    pub fn ensure_sheet(&mut self, name: &str) -> Result<()> {
        self.sheet_mut_or_create(name).map(|_| ())
    }

    /// Displayed value of a cell; `None` when the cell is absent or empty
    pub fn text(&self, sheet: &str, row: u32, col: u32) -> Option<String> {
        let value = self.sheet(sheet)?.get_cell((col, row))?.get_value();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Stores `value` as a string cell. An empty value clears the cell and
    /// leaves its style in place.
    pub fn set_text(&mut self, sheet: &str, row: u32, col: u32, value: &str) -> Result<()> {
        let worksheet = self.sheet_mut_or_create(sheet)?;
        if value.is_empty() {
            worksheet.remove_cell((col, row));
        } else {
            worksheet.get_cell_mut((col, row)).set_value_string(value);
        }
        Ok(())
    }

    /// Writes the workbook to `path`, replacing the file
    pub fn save(&self, path: &Path) -> Result<()> {
        if self.book.get_sheet_collection().is_empty() {
            return Err(OcrSheetError::Spreadsheet(
                "a workbook needs at least one sheet".into(),
            ));
        }
        umya_spreadsheet::writer::xlsx::write(&self.book, path).map_err(|e| {
            OcrSheetError::Spreadsheet(format!("failed to save {}: {}", path.display(), e))
        })
    }
}

fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name.chars().count() > MAX_SHEET_NAME_LEN
        || name.contains(INVALID_SHEET_CHARS)
        || name.starts_with('\'')
        || name.ends_with('\'')
    {
        return Err(OcrSheetError::Spreadsheet(format!(
            "invalid sheet name {:?}: 1-31 characters, none of []:*?/\\",
            name
        )));
    }
    Ok(())
}
