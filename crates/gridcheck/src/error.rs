//! Error types for gridcheck

use thiserror::Error;

use gridcheck_core::{CellAddress, StyleAttribute, ValueType};

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// A divergence between a document and its expected reference content
///
/// `locator` is a cell address ("A1"), a row ("10:10"), a column ("J:J"),
/// a sheet name or "workbook".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FidelityError {
    #[error("{locator}: expected value {expected}, found {actual}")]
    ValueMismatch {
        locator: String,
        expected: String,
        actual: String,
    },

    #[error("{locator}: expected type {expected}, found {actual}")]
    TypeMismatch {
        locator: String,
        expected: ValueType,
        actual: ValueType,
    },

    #[error("{locator}: {attribute} expected {expected}, found {actual}")]
    StyleMismatch {
        locator: String,
        attribute: StyleAttribute,
        expected: String,
        actual: String,
    },

    /// A merge member (or master) resolves to the wrong master cell
    #[error("{locator}: expected master {expected}, found {actual}")]
    MasterMismatch {
        locator: String,
        expected: CellAddress,
        actual: CellAddress,
    },

    /// A sheet, row, column or workbook property differs
    #[error("{locator}: {property} expected {expected}, found {actual}")]
    PropertyMismatch {
        locator: String,
        property: &'static str,
        expected: String,
        actual: String,
    },

    #[error("Sheet not found: {0}")]
    MissingSheet(String),

    /// The row source ended without a completion signal
    #[error("Row stream ended without completion (last row: {})", describe_row(.last_row))]
    IncompleteStream { last_row: Option<u32> },

    #[error("Row {row} arrived after row {previous}")]
    OutOfOrderRow { previous: u32, row: u32 },

    /// An event followed the completion signal
    #[error("Event after end of row stream (row: {})", describe_row(.row))]
    EventAfterEnd { row: Option<u32> },

    /// The stream completed without delivering a row that has expectations
    #[error("Row {0} was never delivered")]
    MissingRow(u32),
}

fn describe_row(row: &Option<u32>) -> String {
    row.map_or_else(|| "none".to_string(), |r| r.to_string())
}

/// Failure to produce a reconstructed document
#[derive(Debug, Error)]
pub enum ReconstructError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Core error: {0}")]
    Core(#[from] gridcheck_core::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] gridcheck_csv::CsvError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document has no worksheet to encode")]
    NoWorksheet,
}

/// Any failure along build, reconstruct and check
#[derive(Debug, Error)]
pub enum Error {
    #[error("Build failed: {0}")]
    Build(#[from] gridcheck_core::Error),

    #[error("Reconstruction failed: {0}")]
    Reconstruct(#[from] ReconstructError),

    #[error("Fidelity check failed: {0}")]
    Fidelity(#[from] FidelityError),
}
