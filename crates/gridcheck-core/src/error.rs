//! Error types for gridcheck-core

use thiserror::Error;

use crate::cell::CellRange;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or addressing a grid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Address text is not `[A-Z]+[1-9][0-9]*`
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// A merge request intersects a region that is already merged
    #[error("Cannot merge {requested}: overlaps existing merge {existing}")]
    OverlappingMerge {
        /// Region already present in the sheet
        existing: CellRange,
        /// Region that was requested
        requested: CellRange,
    },

    /// Alignment attributes fail strict validation
    #[error("Invalid alignment: {0}")]
    InvalidAlignment(String),

    /// A data validation rule is incomplete
    #[error("Invalid data validation: {0}")]
    InvalidValidation(String),

    /// The row has been committed and can no longer be mutated
    #[error("Row {0} has been committed")]
    RowCommitted(u32),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),
}
