//! Row events for incremental delivery
//!
//! A sheet can be delivered as an ordered sequence of [`RowEvent::Row`]
//! snapshots terminated by a single [`RowEvent::End`]. Each snapshot owns the
//! resolved contents of one row, so a consumer never holds references into
//! the producer's state.

use crate::cell::{CellAddress, CellValue, ValueType};
use crate::style::Style;
use crate::view::{CellView, SheetRead};
use crate::worksheet::Worksheet;

/// One notification in a row stream
#[derive(Debug, Clone, PartialEq)]
pub enum RowEvent {
    /// A fully populated row
    Row(RowSnapshot),
    /// No more rows will arrive
    End,
}

/// A resolved cell carried by a [`RowSnapshot`]
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotCell {
    pub address: CellAddress,
    pub value: CellValue,
    pub value_type: ValueType,
    pub master: CellAddress,
    pub style: Style,
}

impl From<CellView<'_>> for SnapshotCell {
    fn from(view: CellView<'_>) -> Self {
        Self {
            address: view.address,
            value: view.value.clone(),
            value_type: view.value_type,
            master: view.master,
            style: view.style.clone(),
        }
    }
}

/// The resolved contents of one row
#[derive(Debug, Clone, PartialEq)]
pub struct RowSnapshot {
    number: u32,
    height: Option<f64>,
    cells: Vec<SnapshotCell>,
}

impl RowSnapshot {
    /// Create an empty snapshot
    pub fn new(number: u32, height: Option<f64>) -> Self {
        Self {
            number,
            height,
            cells: Vec::new(),
        }
    }

    /// Capture a row of a sheet, resolving merges against the whole sheet
    pub fn capture(sheet: &Worksheet, number: u32) -> Self {
        let mut snapshot = Self::new(number, sheet.row_height(number));
        if let Some(row) = sheet.row(number) {
            snapshot.cells = row
                .cells()
                .map(|cell| SnapshotCell::from(sheet.cell_view(cell.address())))
                .collect();
        }
        snapshot
    }

    /// Add a cell; cells are kept in column order
    pub fn push(&mut self, cell: SnapshotCell) {
        let pos = self
            .cells
            .partition_point(|c| c.address.col < cell.address.col);
        self.cells.insert(pos, cell);
    }

    /// Row number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Custom row height, if set
    pub fn height(&self) -> Option<f64> {
        self.height
    }

    /// Cells in column order
    pub fn cells(&self) -> &[SnapshotCell] {
        &self.cells
    }
}

impl SheetRead for RowSnapshot {
    /// Cells outside this row read as absent
    fn cell_view(&self, address: CellAddress) -> CellView<'_> {
        if address.row != self.number {
            return CellView::absent(address);
        }

        match self.cells.iter().find(|c| c.address == address) {
            Some(cell) => CellView {
                address,
                value: &cell.value,
                value_type: cell.value_type,
                master: cell.master,
                style: &cell.style,
            },
            None => CellView::absent(address),
        }
    }

    fn row_height(&self, row: u32) -> Option<f64> {
        if row == self.number {
            self.height
        } else {
            None
        }
    }
}

impl Worksheet {
    /// Deliver this sheet as row events
    ///
    /// Rows with cells or custom settings are emitted in strictly increasing
    /// order, followed by exactly one [`RowEvent::End`].
    pub fn row_events(&self) -> impl Iterator<Item = RowEvent> + '_ {
        self.rows()
            .filter(|row| row.cell_count() > 0 || row.has_custom_settings())
            .map(|row| RowEvent::Row(RowSnapshot::capture(self, row.number())))
            .chain(std::iter::once(RowEvent::End))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_row_events_are_ordered_and_terminated() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("J10", 1).unwrap();
        ws.set_cell_value("A1", 7).unwrap();
        ws.set_row_height(6, 42.0).unwrap();

        let numbers: Vec<Option<u32>> = ws
            .row_events()
            .map(|event| match event {
                RowEvent::Row(row) => Some(row.number()),
                RowEvent::End => None,
            })
            .collect();

        assert_eq!(numbers, vec![Some(1), Some(6), Some(10), None]);
    }

    #[test]
    fn test_snapshot_resolves_merges_across_rows() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("A2", 5).unwrap();
        ws.merge_range("A2:B3").unwrap();

        let row3 = RowSnapshot::capture(&ws, 3);
        let b3 = row3.cell_view(CellAddress::new(3, 2));
        assert_eq!(b3.value, &CellValue::Number(5.0));
        assert_eq!(b3.value_type, ValueType::Merge);
        assert_eq!(b3.master, CellAddress::new(2, 1));

        // Other rows are not reachable from a snapshot
        assert_eq!(
            row3.cell_view(CellAddress::new(2, 1)).value_type,
            ValueType::Null
        );
    }

    #[test]
    fn test_push_keeps_column_order() {
        let mut row = RowSnapshot::new(1, None);
        for col in [3, 1, 2] {
            row.push(SnapshotCell::from(CellView::absent(CellAddress::new(1, col))));
        }
        let cols: Vec<u32> = row.cells().iter().map(|c| c.address.col).collect();
        assert_eq!(cols, vec![1, 2, 3]);
    }
}
