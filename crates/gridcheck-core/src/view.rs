//! Read-only access to resolved cells
//!
//! [`SheetRead`] is the one surface checkers read through. A materialized
//! [`Worksheet`] implements it, and so does a [`RowSnapshot`](crate::RowSnapshot)
//! handed out by a streaming producer.

use crate::cell::{Cell, CellAddress, CellValue, ValueType};
use crate::error::Result;
use crate::style::Style;
use crate::worksheet::Worksheet;

static NULL: CellValue = CellValue::Null;
static NO_STYLE: Style = Style::EMPTY;

/// A cell as seen by a reader, with merge resolution applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellView<'a> {
    pub address: CellAddress,
    /// Value after resolving through the merge master
    pub value: &'a CellValue,
    pub value_type: ValueType,
    /// Merge master; equals `address` for standalone cells and masters
    pub master: CellAddress,
    /// The cell's own style attributes
    pub style: &'a Style,
}

impl<'a> CellView<'a> {
    /// View of a cell that was never materialized
    pub fn absent(address: CellAddress) -> Self {
        Self {
            address,
            value: &NULL,
            value_type: ValueType::Null,
            master: address,
            style: &NO_STYLE,
        }
    }
}

/// Uniform read access over a sheet or a part of one
pub trait SheetRead {
    /// Resolved view of the cell at `address`
    fn cell_view(&self, address: CellAddress) -> CellView<'_>;

    /// Custom height of a row, if one is set
    fn row_height(&self, row: u32) -> Option<f64>;

    /// Resolved view by address string
    fn cell_view_ref(&self, address: &str) -> Result<CellView<'_>> {
        Ok(self.cell_view(CellAddress::parse(address)?))
    }
}

impl SheetRead for Worksheet {
    fn cell_view(&self, address: CellAddress) -> CellView<'_> {
        let Some(cell) = self.cell_at(address.row, address.col) else {
            return CellView::absent(address);
        };

        if cell.is_merge_member() {
            let master = cell.master();
            let value = self
                .cell_at(master.row, master.col)
                .map(Cell::value)
                .unwrap_or(&NULL);
            CellView {
                address,
                value,
                value_type: ValueType::Merge,
                master,
                style: cell.style(),
            }
        } else {
            CellView {
                address,
                value: cell.value(),
                value_type: cell.value_type(),
                master: address,
                style: cell.style(),
            }
        }
    }

    fn row_height(&self, row: u32) -> Option<f64> {
        self.row(row).and_then(|r| r.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_cell_reads_null() {
        let ws = Worksheet::new("Test");
        let view = ws.cell_view_ref("E1").unwrap();

        assert_eq!(view.value, &CellValue::Null);
        assert_eq!(view.value_type, ValueType::Null);
        assert_eq!(view.master, view.address);
        assert!(view.style.is_empty());
    }

    #[test]
    fn test_row_height() {
        let mut ws = Worksheet::new("Test");
        ws.set_row_height(6, 42.0).unwrap();
        assert_eq!(ws.row_height(6), Some(42.0));
        assert_eq!(ws.row_height(5), None);
    }
}
