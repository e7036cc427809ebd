//! Error types shared by every crate in the workspace

use thiserror::Error;

/// Errors raised by the pure logic in this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Cell out of range: {0}")]
    CellOutOfRange(String),
}

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
