//! Serializable document model
//!
//! [`WorkbookModel`] is the owned, flat form of a [`Workbook`]: every
//! materialized row, column and cell, every merged region as an A1 range,
//! and the workbook views. It is what representations serialize and what they
//! rebuild a workbook from.

use serde::{Deserialize, Serialize};

use crate::cell::{CellAddress, CellRange, CellValue};
use crate::error::Result;
use crate::style::Style;
use crate::validation::DataValidation;
use crate::workbook::{Workbook, WorkbookView};
use crate::worksheet::{PageSetup, SheetProperties, Worksheet};

/// Owned document form of a workbook
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkbookModel {
    pub sheets: Vec<SheetModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<WorkbookView>,
}

/// Owned document form of a worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetModel {
    pub name: String,
    pub properties: SheetProperties,
    #[serde(default)]
    pub page_setup: PageSetup,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnModel>,
    #[serde(default)]
    pub rows: Vec<RowModel>,
    /// Merged regions as A1 ranges, e.g. "A2:B3"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merges: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_validations: Vec<DataValidation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnModel {
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default)]
    pub outline_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowModel {
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub outline_level: u8,
    #[serde(default)]
    pub cells: Vec<CellModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellModel {
    /// A1 address
    pub address: String,
    #[serde(default, skip_serializing_if = "CellValue::is_null")]
    pub value: CellValue,
    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub style: Style,
}

impl WorkbookModel {
    /// Capture a workbook
    pub fn from_workbook(workbook: &Workbook) -> Self {
        Self {
            sheets: workbook.worksheets().map(SheetModel::from_worksheet).collect(),
            views: workbook.views().to_vec(),
        }
    }

    /// Rebuild a workbook
    ///
    /// Fails if a sheet name, address or merge range is invalid, or if merges
    /// overlap.
    pub fn into_workbook(self) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        for sheet in self.sheets {
            workbook.add_existing_worksheet(sheet.into_worksheet()?)?;
        }
        workbook.set_views(self.views);
        Ok(workbook)
    }

    /// Drop style attributes a strict writer refuses
    ///
    /// Returns how many attributes were dropped.
    pub fn sanitize(&mut self) -> usize {
        let mut dropped = 0;
        for sheet in &mut self.sheets {
            for cell in sheet.rows.iter_mut().flat_map(|r| r.cells.iter_mut()) {
                if let Some(alignment) = cell.style.sanitize() {
                    log::warn!(
                        "{}!{}: dropping invalid alignment {:?}",
                        sheet.name,
                        cell.address,
                        alignment
                    );
                    dropped += 1;
                }
            }
        }
        dropped
    }
}

impl SheetModel {
    /// Capture a worksheet
    pub fn from_worksheet(sheet: &Worksheet) -> Self {
        let columns = sheet
            .columns()
            .map(|col| ColumnModel {
                number: col.number(),
                width: col.width,
                outline_level: col.outline_level(),
            })
            .collect();

        let rows = sheet
            .rows()
            .map(|row| RowModel {
                number: row.number(),
                height: row.height(),
                outline_level: row.outline_level(),
                cells: row
                    .cells()
                    .map(|cell| CellModel {
                        address: cell.address().to_a1_string(),
                        value: cell.value().clone(),
                        style: cell.style().clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: sheet.name().to_string(),
            properties: sheet.properties().clone(),
            page_setup: sheet.page_setup().clone(),
            columns,
            rows,
            merges: sheet
                .merged_regions()
                .iter()
                .map(CellRange::to_a1_string)
                .collect(),
            data_validations: sheet.data_validations().to_vec(),
        }
    }

    /// Rebuild a worksheet
    pub fn into_worksheet(self) -> Result<Worksheet> {
        let mut sheet = Worksheet::new(self.name);

        for col in self.columns {
            sheet.column_mut(col.number).width = col.width;
            sheet.set_column_outline_level(col.number, col.outline_level);
        }

        for row in self.rows {
            // Touch the row so rows with neither cells nor settings survive
            let r = sheet.row_mut(row.number);
            if let Some(height) = row.height {
                r.set_height(height)?;
            }
            sheet.set_row_outline_level(row.number, row.outline_level)?;

            for cell in row.cells {
                let addr = CellAddress::parse(&cell.address)?;
                let target = sheet.cell_at_mut(addr.row, addr.col)?;
                *target.style_mut() = cell.style;
                sheet.set_cell_value_at(addr.row, addr.col, cell.value)?;
            }
        }

        for merge in &self.merges {
            sheet.merge_range(merge)?;
        }

        for validation in self.data_validations {
            sheet.add_data_validation(validation)?;
        }

        // Recorded properties win over levels raised while rebuilding
        sheet.set_properties(self.properties);
        sheet.set_page_setup(self.page_setup);
        Ok(sheet)
    }
}
