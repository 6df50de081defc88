//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use gridcheck_core::{CellValue, Worksheet};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet
    ///
    /// Record `n` (1-based, header included) becomes row `n`. Empty fields
    /// leave their cell unmaterialized.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(options.sheet_name.as_str());
        let mut row = 1u32;

        if options.has_header {
            let headers = csv_reader.headers()?.clone();
            for (col, value) in (1u32..).zip(headers.iter()) {
                if !value.is_empty() {
                    worksheet.set_cell_value_at(row, col, value)?;
                }
            }
            row += 1;
        }

        for result in csv_reader.records() {
            let record = result?;

            for (col, field) in (1u32..).zip(record.iter()) {
                let value = if options.auto_detect_types {
                    Self::detect_type(field, options.date_format())
                } else {
                    CellValue::string(field)
                };

                if !value.is_null() {
                    worksheet.set_cell_value_at(row, col, value)?;
                }
            }

            row += 1;
        }

        log::debug!(
            "read {} rows into {:?} ({} cells)",
            row - 1,
            worksheet.name(),
            worksheet.cell_count()
        );
        Ok(worksheet)
    }

    /// Detect the type of a field value
    fn detect_type(field: &str, date_format: &str) -> CellValue {
        if field.trim().is_empty() {
            return CellValue::Null;
        }

        // Only numeric-looking text; f64 parsing also accepts "inf" and "NaN"
        let numeric_start = field
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'));
        if numeric_start {
            if let Ok(n) = field.trim().parse::<f64>() {
                return CellValue::Number(n);
            }
        }

        if let Some(date) = Self::parse_date(field.trim(), date_format) {
            return CellValue::Date(date);
        }

        CellValue::string(field)
    }

    fn parse_date(field: &str, date_format: &str) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(field, date_format)
            .map(|naive| naive.and_utc())
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(field)
                    .ok()
                    .map(|d| d.with_timezone(&Utc))
            })
    }
}
