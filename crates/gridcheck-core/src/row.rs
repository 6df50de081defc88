//! Row types

use std::collections::BTreeMap;

use crate::cell::{Cell, CellAddress};
use crate::error::{Error, Result};

/// A row and the sparse set of cells materialized in it
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    number: u32,
    cells: BTreeMap<u32, Cell>,
    height: Option<f64>,
    outline_level: u8,
    committed: bool,
}

impl Row {
    /// Create a new row with default settings
    pub fn new(number: u32) -> Self {
        Self {
            number,
            cells: BTreeMap::new(),
            height: None,
            outline_level: 0,
            committed: false,
        }
    }

    /// Row number (1-based)
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Get a cell by column number, if it has been materialized
    pub fn cell(&self, col: u32) -> Option<&Cell> {
        self.cells.get(&col)
    }

    /// Get or create the cell at a column
    ///
    /// Only the requested cell is created. Fails once the row is committed.
    pub fn cell_mut(&mut self, col: u32) -> Result<&mut Cell> {
        self.ensure_open()?;
        let number = self.number;
        Ok(self
            .cells
            .entry(col)
            .or_insert_with(|| Cell::new(CellAddress::new(number, col))))
    }

    /// Iterate over materialized cells in column order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Number of materialized cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Highest materialized column number
    pub fn last_column(&self) -> Option<u32> {
        self.cells.keys().next_back().copied()
    }

    /// Custom height in points (None = default)
    pub fn height(&self) -> Option<f64> {
        self.height
    }

    /// Set a custom height
    pub fn set_height(&mut self, height: f64) -> Result<()> {
        self.ensure_open()?;
        self.height = Some(height);
        Ok(())
    }

    /// Outline/grouping level (0-7)
    pub fn outline_level(&self) -> u8 {
        self.outline_level
    }

    pub(crate) fn set_outline_level(&mut self, level: u8) -> Result<()> {
        self.ensure_open()?;
        self.outline_level = level;
        Ok(())
    }

    /// Check whether the row has been closed for mutation
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Close the row for further mutation
    ///
    /// A streaming producer may emit the row as soon as it is committed.
    pub fn commit(&mut self) {
        self.committed = true;
    }

    /// Check if this row has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.height.is_some() || self.outline_level > 0
    }

    fn ensure_open(&self) -> Result<()> {
        if self.committed {
            Err(Error::RowCommitted(self.number))
        } else {
            Ok(())
        }
    }
}
