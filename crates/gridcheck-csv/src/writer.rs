//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use gridcheck_core::{CellValue, Worksheet};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a worksheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        worksheet: &Worksheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Write a worksheet to a writer
    ///
    /// Records start at row 1 and column A so positions survive a read back.
    /// Merge members hold no value of their own and are written empty.
    pub fn write<W: Write>(
        worksheet: &Worksheet,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        if let Some(range) = worksheet.dimensions() {
            for row in 1..=range.end.row {
                let record: Vec<String> = (1..=range.end.col)
                    .map(|col| {
                        worksheet
                            .cell_at(row, col)
                            .map(|cell| Self::format_value(cell.value(), options))
                            .unwrap_or_default()
                    })
                    .collect();

                csv_writer.write_record(&record)?;
            }
            log::debug!("wrote {} rows from {:?}", range.end.row, worksheet.name());
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Render a value as a CSV field
    fn format_value(value: &CellValue, options: &CsvWriteOptions) -> String {
        match value.plain() {
            CellValue::Null => String::new(),
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s,
            CellValue::Date(d) => d.format(options.date_format()).to_string(),
            // plain() never yields these
            CellValue::Formula(_) | CellValue::Hyperlink(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gridcheck_core::{FormulaValue, HyperlinkValue};
    use pretty_assertions::assert_eq;

    fn write_lf(ws: &Worksheet) -> String {
        let options = CsvWriteOptions {
            line_terminator: LineTerminator::LF,
            ..Default::default()
        };
        let mut buf = Vec::new();
        CsvWriter::write(ws, &mut buf, &options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_plain_values() {
        let mut ws = Worksheet::new("blort");
        let date = Utc.with_ymd_and_hms(2016, 5, 11, 12, 30, 0).unwrap()
            + chrono::Duration::milliseconds(456);
        ws.set_cell_value("A1", 7).unwrap();
        ws.set_cell_value("B1", "a,b").unwrap();
        ws.set_cell_value("C1", date).unwrap();
        ws.set_cell_value("D1", FormulaValue::new("A1").with_result(7))
            .unwrap();
        ws.set_cell_value("E1", CellValue::formula("A2")).unwrap();
        ws.set_cell_value("F1", HyperlinkValue::new("site", "http://example.com"))
            .unwrap();

        assert_eq!(
            write_lf(&ws),
            "7,\"a,b\",2016-05-11T12:30:00Z,7,,http://example.com\n"
        );
    }

    #[test]
    fn test_write_starts_at_a1() {
        let mut ws = Worksheet::new("blort");
        ws.set_cell_value("B2", 1.5).unwrap();
        assert_eq!(write_lf(&ws), ",\n,1.5\n");
    }

    #[test]
    fn test_merge_members_are_empty() {
        let mut ws = Worksheet::new("blort");
        ws.set_cell_value("A1", 5).unwrap();
        ws.merge_range("A1:B1").unwrap();
        assert_eq!(write_lf(&ws), "5,\n");
    }
}
