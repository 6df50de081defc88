//! # gridcheck-csv
//!
//! CSV reader and writer for gridcheck worksheets.
//!
//! CSV keeps values only. Formulas are written as their cached result,
//! hyperlinks as their target, and dates at second precision. Reading
//! detects numbers and dates and leaves everything else as text.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator, DEFAULT_SHEET_NAME};
pub use reader::CsvReader;
pub use writer::CsvWriter;
