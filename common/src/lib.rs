//! ocr-sheet common library
//!
//! Platform-free pieces shared by the CLI and the desktop popup

pub mod error;
pub mod grid;
pub mod naming;
pub mod types;

pub use error::{Error, Result};
pub use grid::{layout_text, parse_text_grid, place_grid, CellAnchor, CellPlacement};
pub use types::{Region, ScreenPoint, Stage};
