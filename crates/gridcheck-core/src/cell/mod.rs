//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangle of cells (e.g., "A2:B3")
//! - [`Cell`] - Complete cell data including value, style and merge master

mod address;
mod data;
mod value;

pub use address::{column_locator, row_locator, CellAddress, CellRange, CellRangeIterator};
pub use data::Cell;
pub use value::{CellValue, FormulaValue, HyperlinkValue, ValueType};
