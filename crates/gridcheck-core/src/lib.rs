//! # gridcheck-core
//!
//! Core data structures for gridcheck documents.
//!
//! This crate provides the grid model every representation reads and writes:
//! - [`CellAddress`] and [`CellRange`] - 1-based A1 addressing
//! - [`CellValue`] - Cell values (numbers, strings, dates, formulas, hyperlinks)
//! - [`Style`] - Cell formatting (number format, font, border, fill, alignment)
//! - [`Workbook`], [`Worksheet`] - Sparse sheets with merges and row commits
//! - [`SheetRead`] - Merge-resolved read access
//! - [`DataValidation`] - Input rules attached to ranges
//! - [`WorkbookModel`] - Serializable document form
//!
//! ## Example
//!
//! ```rust
//! use gridcheck_core::{CellAddress, CellValue, SheetRead, ValueType, Workbook};
//!
//! let mut workbook = Workbook::new();
//! workbook.add_worksheet_with_name("blort").unwrap();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.set_cell_value("A2", 5).unwrap();
//! sheet.merge_range("A2:B3").unwrap();
//!
//! let member = sheet.cell_view(CellAddress::new(3, 2));
//! assert_eq!(member.value, &CellValue::Number(5.0));
//! assert_eq!(member.value_type, ValueType::Merge);
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod events;
pub mod merge;
pub mod model;
pub mod row;
pub mod style;
pub mod validation;
pub mod view;
pub mod workbook;
pub mod worksheet;

pub use cell::{
    column_locator, row_locator, Cell, CellAddress, CellRange, CellValue, FormulaValue,
    HyperlinkValue, ValueType,
};
pub use column::Column;
pub use error::{Error, Result};
pub use events::{RowEvent, RowSnapshot, SnapshotCell};
pub use model::{CellModel, ColumnModel, RowModel, SheetModel, WorkbookModel};
pub use row::Row;
pub use validation::{
    Comparison, DataValidation, ValidationErrorStyle, ValidationOperator, ValidationType,
};
pub use view::{CellView, SheetRead};
pub use workbook::{Visibility, Workbook, WorkbookView};
pub use worksheet::{PageMargins, PageOrientation, PageSetup, SheetProperties, Worksheet};

pub use style::{
    Alignment, Border, BorderEdge, BorderLineStyle, Color, Fill, Font, GradientStop,
    GradientType, HorizontalAlignment, PatternType, ReadingOrder, Style, StyleAttribute,
    TextRotation, Underline, VerticalAlignment,
};

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
