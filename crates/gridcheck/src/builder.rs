//! Reference document construction

use gridcheck_core::{Result, Workbook, Worksheet};

use crate::fixtures::{self, FeatureRow, Gate};

/// Builds the reference workbook
///
/// The first sheet, [`fixtures::SHEET_NAME`], holds one instance of every
/// feature in [`fixtures::feature_matrix`]. Each row is committed once
/// written, the way a streaming producer would emit it. A second sheet,
/// [`fixtures::VALIDATION_SHEET_NAME`], carries the data validation rules.
///
/// ```
/// use gridcheck::DocumentBuilder;
///
/// let workbook = DocumentBuilder::new().build().unwrap();
/// assert_eq!(workbook.worksheet(0).unwrap().name(), "blort");
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    bad_alignments: bool,
    validation_sheet: bool,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            bad_alignments: true,
            validation_sheet: true,
        }
    }

    /// Whether to write the row of alignments strict validation rejects
    pub fn with_bad_alignments(mut self, enabled: bool) -> Self {
        self.bad_alignments = enabled;
        self
    }

    /// Whether to add the data validation sheet
    pub fn with_validation_sheet(mut self, enabled: bool) -> Self {
        self.validation_sheet = enabled;
        self
    }

    pub fn build(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        workbook.set_views(fixtures::views());

        let mut sheet = Worksheet::new(fixtures::SHEET_NAME);
        sheet.set_properties(fixtures::sheet_properties());
        sheet.set_page_setup(fixtures::page_setup());

        // The outline row lies past every feature row and stays open
        sheet.set_cell_value_at(fixtures::OUTLINE_ROW, fixtures::OUTLINE_COL, 1)?;
        sheet.set_column_outline_level(fixtures::OUTLINE_COL, fixtures::OUTLINE_LEVEL);
        sheet.set_row_outline_level(fixtures::OUTLINE_ROW, fixtures::OUTLINE_LEVEL)?;

        for row in fixtures::feature_matrix() {
            if row.gate != Gate::BadAlignment || self.bad_alignments {
                write_row(&mut sheet, &row)?;
            }
            sheet.commit_row(row.number);
        }

        workbook.add_existing_worksheet(sheet)?;
        if self.validation_sheet {
            add_validation_sheet(&mut workbook)?;
        }
        Ok(workbook)
    }
}

/// Append the data validation sheet to a workbook
///
/// Fails with `DuplicateSheetName` if the workbook already has one.
pub fn add_validation_sheet(workbook: &mut Workbook) -> Result<()> {
    let mut sheet = Worksheet::new(fixtures::VALIDATION_SHEET_NAME);
    for entry in fixtures::validation_matrix() {
        sheet.set_cell_value_at(entry.row, 1, entry.label)?;
        sheet.add_data_validation(entry.validation)?;
    }
    workbook.add_existing_worksheet(sheet)?;
    Ok(())
}

fn write_row(sheet: &mut Worksheet, row: &FeatureRow) -> Result<()> {
    if let Some(height) = row.height {
        sheet.set_row_height(row.number, height)?;
    }

    for feature in &row.cells {
        let cell = sheet.cell_at_mut(feature.address.row, feature.address.col)?;
        *cell.style_mut() = feature.style.clone();
        sheet.set_cell_value_at(feature.address.row, feature.address.col, feature.value.clone())?;
    }

    for merge in &row.merges {
        let master = merge.range.top_left();
        if !merge.value.is_null() {
            sheet.set_cell_value_at(master.row, master.col, merge.value.clone())?;
        }
        sheet.merge_cells(&merge.range)?;
    }

    Ok(())
}
