//! Prelude module - common imports for gridcheck users
//!
//! ```rust
//! use gridcheck::prelude::*;
//! ```

pub use crate::{
    // Building
    DocumentBuilder,
    // Checking
    FidelityChecker,
    FidelityError,
    FidelityProfile,
    ProfileName,
    StreamingFidelityChecker,
    // Reconstruction
    JsonDocument,
    PlainText,
    ReducedModel,
    Representation,
    WorkbookExt,
};

pub use gridcheck_core::{
    CellAddress, CellRange, CellValue, RowEvent, RowSnapshot, SheetRead, Style, ValueType,
    Workbook, Worksheet,
};
