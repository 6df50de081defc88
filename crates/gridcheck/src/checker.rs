//! Fidelity checking over a materialized workbook
//!
//! [`FidelityChecker`] walks every address the reference layout uses,
//! derives what the cell should hold under the active profile, and compares
//! it with what the document actually holds. The first divergence aborts the
//! check.

use std::collections::BTreeSet;
use std::fmt::Debug;

use gridcheck_core::{
    column_locator, row_locator, CellAddress, CellValue, Color, SheetRead, Style, StyleAttribute,
    ValueType, Workbook, Worksheet,
};

use crate::error::FidelityError;
use crate::fixtures::{self, FeatureCell, FeatureMerge, FeatureRow, Gate};
use crate::profile::FidelityProfile;

/// Largest difference at which two numbers are considered equal
pub const NUMBER_TOLERANCE: f64 = 1e-8;

type CheckResult = Result<(), FidelityError>;

/// Checks a workbook against the reference layout under one profile
#[derive(Debug, Clone)]
pub struct FidelityChecker {
    profile: FidelityProfile,
    matrix: Vec<FeatureRow>,
}

impl FidelityChecker {
    pub fn new(profile: FidelityProfile) -> Self {
        Self {
            profile,
            matrix: fixtures::feature_matrix(),
        }
    }

    pub fn profile(&self) -> &FidelityProfile {
        &self.profile
    }

    /// Check a whole workbook
    pub fn check(&self, workbook: &Workbook) -> CheckResult {
        if self.profile.supports_views {
            self.check_views(workbook)?;
        }

        let sheet = workbook
            .worksheet_by_name(&self.profile.sheet_name)
            .ok_or_else(|| FidelityError::MissingSheet(self.profile.sheet_name.clone()))?;

        if self.profile.supports_sheet_properties {
            self.check_sheet_properties(sheet)?;
        }

        let rows = self.expected_rows();
        for &row in &rows {
            self.check_row(sheet, row)?;
        }

        if self.profile.supports_data_validations {
            let name = fixtures::VALIDATION_SHEET_NAME;
            let validations = workbook
                .worksheet_by_name(name)
                .ok_or_else(|| FidelityError::MissingSheet(name.to_string()))?;
            self.check_validation_sheet(validations)?;
        }

        tracing::debug!(
            sheet = sheet.name(),
            rows = rows.len(),
            "fidelity check passed"
        );
        Ok(())
    }

    /// Check the data validation sheet: every label and, for every covered
    /// cell, the rule governing it
    pub fn check_validation_sheet(&self, sheet: &Worksheet) -> CheckResult {
        for entry in fixtures::validation_matrix() {
            let label = CellAddress::new(entry.row, 1);
            let locator = label.to_a1_string();
            let expected = CellValue::string(entry.label);
            let view = sheet.cell_view(label);
            self.check_value(&locator, &expected, view.value)?;
            check_type(&locator, expected.value_type(), view.value_type)?;

            for address in entry.validation.ranges.iter().flat_map(|r| r.cells()) {
                let actual = sheet.data_validation_at(address);
                if actual != Some(&entry.validation) {
                    return Err(FidelityError::PropertyMismatch {
                        locator: address.to_a1_string(),
                        property: "data_validation",
                        expected: format!("{:?}", entry.validation),
                        actual: render(&actual),
                    });
                }
            }
        }
        Ok(())
    }

    /// Rows holding at least one assertion under this profile
    pub fn expected_rows(&self) -> BTreeSet<u32> {
        let mut rows: BTreeSet<u32> = self
            .matrix
            .iter()
            .filter(|row| self.profile.checks(row.gate) && !row.cells.is_empty())
            .map(|row| row.number)
            .collect();

        for merge in self.merges() {
            if self.profile.supports_merges {
                rows.extend(merge.range.start.row..=merge.range.end.row);
            } else {
                rows.insert(merge.range.start.row);
            }
        }
        rows
    }

    /// Check the cells of one row, reading nothing outside it
    pub fn check_row<S: SheetRead + ?Sized>(&self, sheet: &S, row: u32) -> CheckResult {
        if let Some(feature) = self
            .matrix
            .iter()
            .find(|r| r.number == row && self.profile.checks(r.gate))
        {
            for cell in &feature.cells {
                self.check_cell(sheet, cell, feature.gate)?;
            }
            if feature.gate != Gate::Always {
                check_row_height(sheet, feature)?;
            }
        }

        for merge in self.merges() {
            if (merge.range.start.row..=merge.range.end.row).contains(&row) {
                self.check_merge_row(sheet, merge, row)?;
            }
        }
        Ok(())
    }

    fn merges(&self) -> impl Iterator<Item = &FeatureMerge> {
        self.matrix.iter().flat_map(|row| row.merges.iter())
    }

    /// The value a feature takes in a representation with this profile
    fn degrade(&self, value: &CellValue) -> CellValue {
        if self.profile.supports_formulas {
            value.clone()
        } else {
            value.plain()
        }
    }

    fn check_cell<S: SheetRead + ?Sized>(
        &self,
        sheet: &S,
        feature: &FeatureCell,
        gate: Gate,
    ) -> CheckResult {
        let locator = feature.address.to_a1_string();
        let view = sheet.cell_view(feature.address);
        let expected = self.degrade(&feature.value);

        self.check_value(&locator, &expected, view.value)?;
        check_type(&locator, expected.value_type(), view.value_type)?;

        match gate {
            Gate::Always => Ok(()),
            Gate::Styles => check_style(&locator, &feature.style, view.style),
            Gate::BadAlignment => match view.style.alignment {
                None => Ok(()),
                Some(actual) => Err(FidelityError::StyleMismatch {
                    locator,
                    attribute: StyleAttribute::Alignment,
                    expected: "none".into(),
                    actual: format!("{:?}", actual),
                }),
            },
        }
    }

    fn check_merge_row<S: SheetRead + ?Sized>(
        &self,
        sheet: &S,
        merge: &FeatureMerge,
        row: u32,
    ) -> CheckResult {
        let master = merge.range.top_left();
        let expected = self.degrade(&merge.value);

        for address in merge.range.cells().filter(|a| a.row == row) {
            let is_master = address == master;
            if !is_master && !self.profile.supports_merges {
                continue;
            }

            let locator = address.to_a1_string();
            let view = sheet.cell_view(address);
            self.check_value(&locator, &expected, view.value)?;

            let expected_type = if is_master {
                expected.value_type()
            } else {
                ValueType::Merge
            };
            check_type(&locator, expected_type, view.value_type)?;

            if view.master != master {
                return Err(FidelityError::MasterMismatch {
                    locator,
                    expected: master,
                    actual: view.master,
                });
            }
        }
        Ok(())
    }

    fn check_value(&self, locator: &str, expected: &CellValue, actual: &CellValue) -> CheckResult {
        if values_match(expected, actual, self.profile.date_tolerance_ms) {
            Ok(())
        } else {
            Err(FidelityError::ValueMismatch {
                locator: locator.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            })
        }
    }

    fn check_views(&self, workbook: &Workbook) -> CheckResult {
        let expected = fixtures::views();
        check_property("workbook", "views", expected.as_slice(), workbook.views())
    }

    fn check_sheet_properties(&self, sheet: &Worksheet) -> CheckResult {
        let col = fixtures::OUTLINE_COL;
        let column_level = sheet.column(col).map_or(0, |c| c.outline_level());
        let locator = column_locator(col);
        check_property(&locator, "outline_level", &fixtures::OUTLINE_LEVEL, &column_level)?;
        check_property(&locator, "collapsed", &true, &sheet.column_collapsed(col))?;

        let row = fixtures::OUTLINE_ROW;
        let row_level = sheet.row(row).map_or(0, |r| r.outline_level());
        let locator = row_locator(row);
        check_property(&locator, "outline_level", &fixtures::OUTLINE_LEVEL, &row_level)?;
        check_property(&locator, "collapsed", &true, &sheet.row_collapsed(row))?;

        let properties = sheet.properties();
        let name = sheet.name();
        check_property(
            name,
            "outline_level_col",
            &fixtures::OUTLINE_LEVEL,
            &properties.outline_level_col,
        )?;
        check_property(
            name,
            "outline_level_row",
            &fixtures::OUTLINE_LEVEL,
            &properties.outline_level_row,
        )?;
        check_property(
            name,
            "tab_color",
            &Color::from_argb_hex(fixtures::TAB_COLOR),
            &properties.tab_color,
        )?;
        check_property(name, "properties", &fixtures::sheet_properties(), properties)?;
        check_property(name, "page_setup", &fixtures::page_setup(), sheet.page_setup())
    }
}

/// Compare two values, allowing numeric noise and the profile's date drift
pub fn values_match(expected: &CellValue, actual: &CellValue, date_tolerance_ms: u64) -> bool {
    match (expected, actual) {
        (CellValue::Number(a), CellValue::Number(b)) => (a - b).abs() < NUMBER_TOLERANCE,
        (CellValue::Date(a), CellValue::Date(b)) => (*a - *b)
            .num_nanoseconds()
            .map_or(false, |ns| {
                ns.unsigned_abs() <= date_tolerance_ms.saturating_mul(1_000_000)
            }),
        (CellValue::Formula(a), CellValue::Formula(b)) => {
            a.formula == b.formula
                && match (&a.result, &b.result) {
                    (None, None) => true,
                    (Some(x), Some(y)) => values_match(x, y, date_tolerance_ms),
                    _ => false,
                }
        }
        _ => expected == actual,
    }
}

fn check_type(locator: &str, expected: ValueType, actual: ValueType) -> CheckResult {
    if expected == actual {
        Ok(())
    } else {
        Err(FidelityError::TypeMismatch {
            locator: locator.to_string(),
            expected,
            actual,
        })
    }
}

/// Compare every attribute the expected style sets
fn check_style(locator: &str, expected: &Style, actual: &Style) -> CheckResult {
    check_attribute(
        locator,
        StyleAttribute::NumberFormat,
        &expected.number_format,
        &actual.number_format,
    )?;
    check_attribute(locator, StyleAttribute::Font, &expected.font, &actual.font)?;
    check_attribute(locator, StyleAttribute::Border, &expected.border, &actual.border)?;
    check_attribute(locator, StyleAttribute::Fill, &expected.fill, &actual.fill)?;
    check_attribute(
        locator,
        StyleAttribute::Alignment,
        &expected.alignment,
        &actual.alignment,
    )
}

fn check_attribute<T: PartialEq + Debug>(
    locator: &str,
    attribute: StyleAttribute,
    expected: &Option<T>,
    actual: &Option<T>,
) -> CheckResult {
    match expected {
        Some(value) if actual.as_ref() != Some(value) => Err(FidelityError::StyleMismatch {
            locator: locator.to_string(),
            attribute,
            expected: format!("{:?}", value),
            actual: render(actual),
        }),
        _ => Ok(()),
    }
}

fn check_row_height<S: SheetRead + ?Sized>(sheet: &S, feature: &FeatureRow) -> CheckResult {
    let actual = sheet.row_height(feature.number);
    if actual == feature.height {
        Ok(())
    } else {
        Err(FidelityError::StyleMismatch {
            locator: row_locator(feature.number),
            attribute: StyleAttribute::RowHeight,
            expected: render(&feature.height),
            actual: render(&actual),
        })
    }
}

fn check_property<T: PartialEq + Debug + ?Sized>(
    locator: &str,
    property: &'static str,
    expected: &T,
    actual: &T,
) -> CheckResult {
    if expected == actual {
        Ok(())
    } else {
        Err(FidelityError::PropertyMismatch {
            locator: locator.to_string(),
            property,
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        })
    }
}

fn render<T: Debug>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "none".to_string(), |v| format!("{:?}", v))
}
