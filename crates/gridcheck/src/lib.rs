//! # gridcheck
//!
//! Builds a reference spreadsheet document exercising every value type,
//! style category and structural feature of the grid model, and checks
//! reconstructions of it against capability profiles.
//!
//! ## Features
//!
//! - A fixed reference document ([`DocumentBuilder`])
//! - Named capability profiles: `full`, `reduced-model`, `plain-text`
//! - Fidelity checks over a materialized workbook ([`FidelityChecker`])
//! - The same checks over a row event stream ([`StreamingFidelityChecker`])
//! - JSON, model and CSV reconstructions ([`Representation`])
//!
//! ## Example
//!
//! ```rust
//! use gridcheck::prelude::*;
//!
//! let workbook = DocumentBuilder::new().build().unwrap();
//! let reconstructed = JsonDocument.reconstruct(&workbook).unwrap();
//!
//! FidelityChecker::new(FidelityProfile::full())
//!     .check(&reconstructed)
//!     .unwrap();
//! ```

pub mod builder;
pub mod checker;
pub mod error;
pub mod fixtures;
pub mod prelude;
pub mod profile;
pub mod reconstruct;
pub mod stream;

pub use builder::{add_validation_sheet, DocumentBuilder};
pub use checker::{values_match, FidelityChecker, NUMBER_TOLERANCE};
pub use error::{Error, FidelityError, ReconstructError, Result};
pub use profile::{FidelityProfile, ProfileName, UnknownProfile};
pub use reconstruct::{
    representation, round_trip, JsonDocument, PlainText, ReducedModel, Representation,
};
pub use stream::{spawn_row_producer, StreamingFidelityChecker};

pub use gridcheck_core::{
    CellAddress, CellRange, CellValue, CellView, RowEvent, RowSnapshot, SheetRead, ValueType,
    Workbook, WorkbookModel, Worksheet,
};

use std::path::Path;

use gridcheck_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};

/// Extension trait for Workbook to add file I/O
///
/// `.json` files hold a [`WorkbookModel`] written with the same strict
/// validation as [`JsonDocument`]; `.csv` files hold the first sheet.
pub trait WorkbookExt: Sized {
    /// Open a workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ReconstructError>;

    /// Save the workbook to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), ReconstructError>;

    /// The JSON text `save` writes for a `.json` path
    fn to_json(&self) -> std::result::Result<String, ReconstructError>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> std::result::Result<Workbook, ReconstructError> {
        let path = path.as_ref();
        if is_csv(path) {
            let worksheet = CsvReader::read_file(path, &CsvReadOptions::default())?;
            let mut workbook = Workbook::new();
            workbook.add_existing_worksheet(worksheet)?;
            Ok(workbook)
        } else {
            let file = std::fs::File::open(path)?;
            let model: WorkbookModel = serde_json::from_reader(std::io::BufReader::new(file))?;
            Ok(model.into_workbook()?)
        }
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), ReconstructError> {
        let path = path.as_ref();
        if is_csv(path) {
            let sheet = self.worksheet(0).ok_or(ReconstructError::NoWorksheet)?;
            CsvWriter::write_file(sheet, path, &CsvWriteOptions::default())?;
        } else {
            std::fs::write(path, self.to_json()?)?;
        }
        Ok(())
    }

    fn to_json(&self) -> std::result::Result<String, ReconstructError> {
        Ok(serde_json::to_string_pretty(&reconstruct::strict_model(self))?)
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"))
}
