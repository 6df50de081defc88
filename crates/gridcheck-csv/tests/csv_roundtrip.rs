//! End-to-end tests for CSV roundtrip (create -> save -> read -> verify)

use chrono::{Duration, TimeZone, Utc};
use gridcheck_core::{CellValue, FormulaValue, HyperlinkValue, Worksheet};
use gridcheck_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use pretty_assertions::assert_eq;

#[test]
fn test_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blort.csv");

    let date = Utc.with_ymd_and_hms(2016, 5, 11, 12, 30, 0).unwrap() + Duration::milliseconds(789);
    let mut ws = Worksheet::new("blort");
    ws.set_cell_value("A1", 7).unwrap();
    ws.set_cell_value("B1", "Hello, World!").unwrap();
    ws.set_cell_value("C1", date).unwrap();
    ws.set_cell_value("D1", FormulaValue::new("A1").with_result(7))
        .unwrap();
    ws.set_cell_value("E1", CellValue::formula("A2")).unwrap();
    ws.set_cell_value("F1", HyperlinkValue::new("site", "http://example.com"))
        .unwrap();
    ws.set_cell_value("A4", 1.5).unwrap();

    CsvWriter::write_file(&ws, &path, &CsvWriteOptions::default()).unwrap();
    let back = CsvReader::read_file(&path, &CsvReadOptions::default()).unwrap();

    assert_eq!(back.name(), "sheet1");
    assert_eq!(back.cell_at(1, 1).unwrap().value(), &CellValue::Number(7.0));
    assert_eq!(
        back.cell_at(1, 2).unwrap().value(),
        &CellValue::string("Hello, World!")
    );

    let read_date = back.cell_at(1, 3).unwrap().value().as_date().unwrap();
    assert!((date - read_date).num_milliseconds().abs() < 1000);

    assert_eq!(back.cell_at(1, 4).unwrap().value(), &CellValue::Number(7.0));
    assert!(back.cell_at(1, 5).is_none());
    assert_eq!(
        back.cell_at(1, 6).unwrap().value(),
        &CellValue::string("http://example.com")
    );
    assert_eq!(back.cell_at(4, 1).unwrap().value(), &CellValue::Number(1.5));
    assert!(back.row(2).map_or(true, |r| r.cell_count() == 0));
}

#[test]
fn test_custom_date_format() {
    let date = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
    let mut ws = Worksheet::new("blort");
    ws.set_cell_value("A1", date).unwrap();

    let mut buf = Vec::new();
    let write = CsvWriteOptions {
        date_format: Some("%d/%m/%Y %H:%M:%S".into()),
        ..Default::default()
    };
    CsvWriter::write(&ws, &mut buf, &write).unwrap();
    assert_eq!(String::from_utf8(buf.clone()).unwrap(), "02/01/2020 03:04:05\r\n");

    let read = CsvReadOptions {
        date_format: Some("%d/%m/%Y %H:%M:%S".into()),
        ..Default::default()
    };
    let back = CsvReader::read(buf.as_slice(), &read).unwrap();
    // Starts with a digit but is not a number, so it is tried as a date
    assert_eq!(back.cell_at(1, 1).unwrap().value(), &CellValue::Date(date));
}
