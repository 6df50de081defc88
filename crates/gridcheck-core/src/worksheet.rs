//! Worksheet type

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellAddress, CellRange, CellValue};
use crate::column::Column;
use crate::error::Result;
use crate::row::Row;
use crate::style::{Color, Style};
use crate::validation::DataValidation;

/// A worksheet: sparse rows and columns addressed by 1-based numbers
///
/// Rows, columns and cells are created on first mutable access and are never
/// removed. The address of a cell is its identity for the lifetime of the
/// sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Row number → row
    rows: BTreeMap<u32, Row>,
    /// Column number → column
    columns: BTreeMap<u32, Column>,
    /// Merged regions, in the order they were declared
    pub(crate) merges: Vec<CellRange>,
    properties: SheetProperties,
    page_setup: PageSetup,
    /// Data validation rules, in the order they were added
    data_validations: Vec<DataValidation>,
    /// Rows up to and including this number are committed
    committed_through: u32,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
            columns: BTreeMap::new(),
            merges: Vec::new(),
            properties: SheetProperties::default(),
            page_setup: PageSetup::default(),
            data_validations: Vec::new(),
            committed_through: 0,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Sheet-level properties
    pub fn properties(&self) -> &SheetProperties {
        &self.properties
    }

    /// Replace the sheet-level properties
    pub fn set_properties(&mut self, properties: SheetProperties) {
        self.properties = properties;
    }

    /// Print settings
    pub fn page_setup(&self) -> &PageSetup {
        &self.page_setup
    }

    /// Replace the print settings
    pub fn set_page_setup(&mut self, page_setup: PageSetup) {
        self.page_setup = page_setup;
    }

    // === Row/Column Access ===

    /// Get a row, if it has been materialized
    pub fn row(&self, number: u32) -> Option<&Row> {
        self.rows.get(&number)
    }

    /// Get or create a row
    ///
    /// A row created at or below the commit mark is born committed.
    pub fn row_mut(&mut self, number: u32) -> &mut Row {
        let committed = number <= self.committed_through;
        self.rows.entry(number).or_insert_with(|| {
            let mut row = Row::new(number);
            if committed {
                row.commit();
            }
            row
        })
    }

    /// Iterate over materialized rows in order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    /// Get a column, if it has been materialized
    pub fn column(&self, number: u32) -> Option<&Column> {
        self.columns.get(&number)
    }

    /// Get or create a column
    pub fn column_mut(&mut self, number: u32) -> &mut Column {
        self.columns
            .entry(number)
            .or_insert_with(|| Column::new(number))
    }

    /// Iterate over materialized columns in order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by row and column numbers
    pub fn cell_at(&self, row: u32, col: u32) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.cell(col))
    }

    /// Get or create a cell by address string
    pub fn cell_mut(&mut self, address: &str) -> Result<&mut Cell> {
        let addr = CellAddress::parse(address)?;
        self.cell_at_mut(addr.row, addr.col)
    }

    /// Get or create a cell by row and column numbers
    ///
    /// Creates the row if needed, but no other cell and no column.
    pub fn cell_at_mut(&mut self, row: u32, col: u32) -> Result<&mut Cell> {
        self.row_mut(row).cell_mut(col)
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column numbers
    ///
    /// Writing to a merge member writes the region's master.
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u32,
        value: V,
    ) -> Result<()> {
        let target = self
            .cell_at(row, col)
            .map(Cell::master)
            .unwrap_or(CellAddress::new(row, col));
        self.cell_at_mut(target.row, target.col)?
            .set_value(value.into());
        Ok(())
    }

    /// Replace a cell's style by address string
    pub fn set_cell_style(&mut self, address: &str, style: Style) -> Result<()> {
        *self.cell_mut(address)?.style_mut() = style;
        Ok(())
    }

    // === Row/Column Settings ===

    /// Set a custom row height
    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.row_mut(row).set_height(height)
    }

    /// Set a row's outline level, raising the sheet's row outline level if needed
    pub fn set_row_outline_level(&mut self, row: u32, level: u8) -> Result<()> {
        self.row_mut(row).set_outline_level(level)?;
        self.properties.outline_level_row = self.properties.outline_level_row.max(level);
        Ok(())
    }

    /// Set a column's outline level, raising the sheet's column outline level if needed
    pub fn set_column_outline_level(&mut self, col: u32, level: u8) {
        self.column_mut(col).set_outline_level(level);
        self.properties.outline_level_col = self.properties.outline_level_col.max(level);
    }

    /// Whether a row is collapsed: it is grouped at or beyond the sheet's row outline level
    pub fn row_collapsed(&self, row: u32) -> bool {
        let level = self.row(row).map_or(0, Row::outline_level);
        level > 0 && level >= self.properties.outline_level_row
    }

    /// Whether a column is collapsed: it is grouped at or beyond the sheet's column outline level
    pub fn column_collapsed(&self, col: u32) -> bool {
        let level = self.column(col).map_or(0, Column::outline_level);
        level > 0 && level >= self.properties.outline_level_col
    }

    // === Commit ===

    /// Commit a row and every row before it
    ///
    /// Committed rows reject further mutation. Rows above `row` that do not
    /// exist yet are committed when they are created.
    pub fn commit_row(&mut self, row: u32) {
        for (_, r) in self.rows.range_mut(..=row) {
            r.commit();
        }
        self.committed_through = self.committed_through.max(row);
        log::trace!("{}: committed through row {}", self.name, self.committed_through);
    }

    /// Highest row number committed so far (0 = none)
    pub fn committed_through(&self) -> u32 {
        self.committed_through
    }

    pub(crate) fn is_row_closed(&self, row: u32) -> bool {
        match self.rows.get(&row) {
            Some(r) => r.is_committed(),
            None => row <= self.committed_through,
        }
    }

    // === Data Validation ===

    /// Add a data validation rule
    ///
    /// Fails if the rule has no range or its operands do not fit its operator.
    pub fn add_data_validation(&mut self, validation: DataValidation) -> Result<()> {
        validation.validate()?;
        log::debug!(
            "{}: validation on {} range(s)",
            self.name,
            validation.ranges.len()
        );
        self.data_validations.push(validation);
        Ok(())
    }

    /// Get all data validation rules
    pub fn data_validations(&self) -> &[DataValidation] {
        &self.data_validations
    }

    /// The rule governing an address; a later rule wins over an earlier one
    pub fn data_validation_at(&self, addr: CellAddress) -> Option<&DataValidation> {
        self.data_validations
            .iter()
            .rev()
            .find(|v| v.applies_to(&addr))
    }

    // === Dimensions ===

    /// Bounds of all materialized cells
    pub fn dimensions(&self) -> Option<CellRange> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for row in self.rows.values() {
            let (Some(first), Some(last)) = (row.cells().next(), row.last_column()) else {
                continue;
            };
            let first = first.address().col;
            let n = row.number();
            bounds = Some(match bounds {
                None => (n, first, n, last),
                Some((r0, c0, r1, c1)) => (r0.min(n), c0.min(first), r1.max(n), c1.max(last)),
            });
        }
        bounds.map(|(r0, c0, r1, c1)| CellRange::from_coords(r0, c0, r1, c1))
    }

    /// Number of materialized cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(Row::cell_count).sum()
    }

    /// Check if the sheet has no materialized cells
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Iterate over all materialized cells, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.values().flat_map(Row::cells)
    }
}

/// Sheet-level properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<Color>,
    /// Highest row outline level in use
    #[serde(default)]
    pub outline_level_row: u8,
    /// Highest column outline level in use
    #[serde(default)]
    pub outline_level_col: u8,
    /// Default row height in points
    pub default_row_height: f64,
    /// Default column width in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_col_width: Option<f64>,
}

impl Default for SheetProperties {
    fn default() -> Self {
        Self {
            tab_color: None,
            outline_level_row: 0,
            outline_level_col: 0,
            default_row_height: 15.0,
            default_col_width: None,
        }
    }
}

/// Page setup for printing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    /// Paper size (e.g., 1 = Letter, 9 = A4)
    pub paper_size: u8,
    pub orientation: PageOrientation,
    /// Scale percentage (10-400)
    pub scale: u16,
    /// Fit to pages wide
    pub fit_to_width: Option<u16>,
    /// Fit to pages tall
    pub fit_to_height: Option<u16>,
    /// Margins in inches
    pub margins: PageMargins,
    pub horizontal_centered: bool,
    pub vertical_centered: bool,
    pub print_gridlines: bool,
    /// Print headings (row/column headers)
    pub print_headings: bool,
    /// Print area, e.g. "A1:G20"
    pub print_area: Option<String>,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper_size: 1, // Letter
            orientation: PageOrientation::Portrait,
            scale: 100,
            fit_to_width: None,
            fit_to_height: None,
            margins: PageMargins::default(),
            horizontal_centered: false,
            vertical_centered: false,
            print_gridlines: false,
            print_headings: false,
            print_area: None,
        }
    }
}

/// Page margins in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub header: f64,
    pub footer: f64,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            left: 0.7,
            right: 0.7,
            top: 0.75,
            bottom: 0.75,
            header: 0.3,
            footer: 0.3,
        }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::CellValue;

    #[test]
    fn test_data_validations() {
        use crate::validation::{DataValidation, ValidationOperator};

        let mut ws = Worksheet::new("Test");
        let list = DataValidation::list("Yes,No").with_range(CellRange::parse("A1:A5").unwrap());
        let whole = DataValidation::whole_number(ValidationOperator::GreaterThan, "0")
            .with_range(CellRange::parse("A3:B3").unwrap());
        ws.add_data_validation(list.clone()).unwrap();
        ws.add_data_validation(whole.clone()).unwrap();

        assert_eq!(ws.data_validations().len(), 2);
        assert_eq!(ws.data_validation_at(CellAddress::new(1, 1)), Some(&list));
        assert_eq!(ws.data_validation_at(CellAddress::new(3, 1)), Some(&whole));
        assert_eq!(ws.data_validation_at(CellAddress::new(1, 2)), None);

        // Rules do not materialize cells
        assert!(ws.is_empty());

        assert!(matches!(
            ws.add_data_validation(DataValidation::list("x")),
            Err(Error::InvalidValidation(_))
        ));
        assert_eq!(ws.data_validations().len(), 2);
    }

    #[test]
    fn test_new_worksheet() {
        let ws = Worksheet::new("Test");
        assert_eq!(ws.name(), "Test");
        assert!(ws.is_empty());
        assert!(ws.dimensions().is_none());
    }

    #[test]
    fn test_set_cell_values() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value("A1", "Hello").unwrap();
        ws.set_cell_value("B1", 42.0).unwrap();

        assert_eq!(
            ws.cell("A1").unwrap().unwrap().value().as_string(),
            Some("Hello")
        );
        assert_eq!(ws.cell_at(1, 2).unwrap().value().as_number(), Some(42.0));
    }

    #[test]
    fn test_cell_access_is_sparse() {
        let mut ws = Worksheet::new("Test");
        ws.cell_at_mut(3, 5).unwrap();

        assert!(ws.cell_at(3, 5).is_some());
        assert!(ws.cell_at(1, 5).is_none());
        assert!(ws.cell_at(3, 1).is_none());
        assert!(ws.row(1).is_none());
        assert!(ws.column(5).is_none());
        assert_eq!(ws.cell_count(), 1);
    }

    #[test]
    fn test_cell_identity_is_stable() {
        let mut ws = Worksheet::new("Test");
        ws.cell_mut("C3").unwrap().style_mut().number_format = Some("0%".into());

        let again = ws.cell_mut("C3").unwrap();
        assert_eq!(again.style().number_format.as_deref(), Some("0%"));
        assert_eq!(ws.cell_count(), 1);
    }

    #[test]
    fn test_invalid_address() {
        let mut ws = Worksheet::new("Test");
        assert!(matches!(ws.cell("1A"), Err(Error::InvalidAddress(_))));
        assert!(matches!(
            ws.set_cell_value("a1", 1),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_dimensions() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value_at(5, 3, "A").unwrap();
        ws.set_cell_value_at(10, 7, "B").unwrap();
        ws.set_cell_value_at(7, 2, "C").unwrap();

        assert_eq!(ws.dimensions(), Some(CellRange::from_coords(5, 2, 10, 7)));
    }

    #[test]
    fn test_outline_levels_raise_properties() {
        let mut ws = Worksheet::new("Test");
        ws.set_row_outline_level(10, 1).unwrap();
        ws.set_column_outline_level(10, 1);

        assert_eq!(ws.properties().outline_level_row, 1);
        assert_eq!(ws.properties().outline_level_col, 1);
        assert!(ws.row_collapsed(10));
        assert!(ws.column_collapsed(10));
        assert!(!ws.row_collapsed(9));

        ws.set_row_outline_level(11, 2).unwrap();
        assert_eq!(ws.properties().outline_level_row, 2);
        assert!(!ws.row_collapsed(10));
        assert!(ws.row_collapsed(11));
    }

    #[test]
    fn test_commit_row_closes_earlier_rows() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("A1", 1).unwrap();
        ws.set_cell_value("J10", 1).unwrap();
        ws.commit_row(3);

        assert!(ws.row(1).unwrap().is_committed());
        assert!(!ws.row(10).unwrap().is_committed());
        assert!(matches!(
            ws.set_cell_value("B1", 2),
            Err(Error::RowCommitted(1))
        ));
        // Row 2 did not exist at commit time but is closed anyway
        assert!(matches!(
            ws.set_cell_value("A2", 2),
            Err(Error::RowCommitted(2))
        ));
        ws.set_cell_value("A4", 4).unwrap();
        ws.set_cell_value("K10", 2).unwrap();
        assert_eq!(ws.committed_through(), 3);
    }

    #[test]
    fn test_set_cell_style() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_style("A4", Style::new().number_format("# ?/?"))
            .unwrap();
        let cell = ws.cell("A4").unwrap().unwrap();
        assert_eq!(cell.value(), &CellValue::Null);
        assert_eq!(cell.style().number_format.as_deref(), Some("# ?/?"));
    }
}
