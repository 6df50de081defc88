//! A single materialized cell

use super::{CellAddress, CellValue, ValueType};
use crate::style::Style;

/// Complete data for a single cell
///
/// `master` is a handle into the owning sheet, never an owning pointer: for a
/// standalone cell or a merge master it equals `address`, for a merge member
/// it names the region's top-left cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    address: CellAddress,
    value: CellValue,
    style: Style,
    master: CellAddress,
}

impl Cell {
    /// Create an empty cell at an address
    pub fn new(address: CellAddress) -> Self {
        Self {
            address,
            value: CellValue::Null,
            style: Style::default(),
            master: address,
        }
    }

    /// The cell's address
    pub fn address(&self) -> CellAddress {
        self.address
    }

    /// The value stored in this cell
    ///
    /// For merge members this is always `Null`; read through the sheet
    /// (see `Worksheet::cell_view`) to resolve the master's value.
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    /// Style attributes set on this cell
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Mutable style attributes
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Address of the merge master (the cell itself when not merged)
    pub fn master(&self) -> CellAddress {
        self.master
    }

    /// Check whether this cell is a non-master member of a merged region
    pub fn is_merge_member(&self) -> bool {
        self.master != self.address
    }

    /// The type reported for this cell
    pub fn value_type(&self) -> ValueType {
        if self.is_merge_member() {
            ValueType::Merge
        } else {
            self.value.value_type()
        }
    }

    /// Set the stored value
    ///
    /// Members of a merge have their writes redirected by the sheet, so this
    /// is only reached for standalone and master cells.
    pub(crate) fn set_value(&mut self, value: CellValue) {
        self.value = value;
    }

    /// Make this cell a member of the region mastered at `master`
    pub(crate) fn absorb_into(&mut self, master: CellAddress) {
        self.value = CellValue::Null;
        self.master = master;
    }

    /// Detach this cell from its merge region
    pub(crate) fn release(&mut self) {
        self.master = self.address;
    }

    /// Check if this cell carries neither a value nor style
    pub fn is_empty(&self) -> bool {
        self.value.is_null() && self.style.is_empty() && !self.is_merge_member()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_its_own_master() {
        let cell = Cell::new(CellAddress::new(2, 1));
        assert_eq!(cell.master(), cell.address());
        assert!(!cell.is_merge_member());
        assert_eq!(cell.value_type(), ValueType::Null);
        assert!(cell.is_empty());
    }

    #[test]
    fn test_absorbed_cell_discards_value() {
        let mut cell = Cell::new(CellAddress::new(3, 1));
        cell.set_value(CellValue::from(9));
        cell.absorb_into(CellAddress::new(2, 1));

        assert_eq!(cell.value(), &CellValue::Null);
        assert_eq!(cell.value_type(), ValueType::Merge);

        cell.release();
        assert_eq!(cell.value_type(), ValueType::Null);
    }
}
