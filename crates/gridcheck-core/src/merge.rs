//! Merged regions
//!
//! A merge designates the top-left cell of a rectangle as master. Every other
//! cell in the rectangle is materialized, loses its own value and points at
//! the master; reads resolve through that pointer.

use crate::cell::{CellAddress, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::worksheet::Worksheet;

impl Worksheet {
    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merges
    }

    /// Find the merged region containing an address
    pub fn merge_region_of(&self, addr: CellAddress) -> Option<&CellRange> {
        self.merges.iter().find(|range| range.contains(&addr))
    }

    /// Merge cells by range string (e.g., "A2:B3")
    pub fn merge_range(&mut self, range: &str) -> Result<()> {
        let range = CellRange::parse(range)?;
        self.merge_cells(&range)
    }

    /// Merge cells
    ///
    /// The top-left cell keeps its value and style. Fails without touching
    /// the sheet if the range is a single cell, overlaps an existing region,
    /// or covers a committed row.
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if range.is_single_cell() {
            return Err(Error::InvalidRange(format!(
                "{} covers a single cell",
                range
            )));
        }

        if let Some(existing) = self.merges.iter().find(|m| m.overlaps(range)) {
            return Err(Error::OverlappingMerge {
                existing: *existing,
                requested: *range,
            });
        }

        if let Some(row) = (range.start.row..=range.end.row).find(|&r| self.is_row_closed(r)) {
            return Err(Error::RowCommitted(row));
        }

        let master = range.top_left();
        self.cell_at_mut(master.row, master.col)?;
        for addr in range.cells().filter(|addr| *addr != master) {
            self.cell_at_mut(addr.row, addr.col)?.absorb_into(master);
        }

        self.merges.push(*range);
        log::debug!("{}: merged {} under {}", self.name(), range, master);
        Ok(())
    }

    /// Unmerge cells
    ///
    /// Members become standalone empty cells. Returns `false` if `range` is
    /// not a merged region of this sheet.
    pub fn unmerge_cells(&mut self, range: &CellRange) -> Result<bool> {
        let Some(index) = self.merges.iter().position(|m| m == range) else {
            return Ok(false);
        };

        if let Some(row) = (range.start.row..=range.end.row).find(|&r| self.is_row_closed(r)) {
            return Err(Error::RowCommitted(row));
        }

        let master = range.top_left();
        for addr in range.cells().filter(|addr| *addr != master) {
            let cell = self.cell_at_mut(addr.row, addr.col)?;
            cell.release();
            cell.set_value(CellValue::Null);
        }

        self.merges.remove(index);
        Ok(true)
    }
}
