//! End-to-end fidelity tests (build -> reconstruct -> check)

use chrono::Duration;
use gridcheck::prelude::*;
use gridcheck::{fixtures, round_trip, spawn_row_producer, WorkbookModel};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

fn reference() -> Workbook {
    DocumentBuilder::new().build().unwrap()
}

fn addr(s: &str) -> CellAddress {
    CellAddress::parse(s).unwrap()
}

/// Rebuild the reference through its model with one cell replaced
fn with_cell(workbook: &Workbook, address: &str, value: CellValue) -> Workbook {
    let mut model = WorkbookModel::from_workbook(workbook);
    let target = addr(address);
    for row in model.sheets[0].rows.iter_mut() {
        for cell in row.cells.iter_mut() {
            if cell.address == target.to_a1_string() {
                cell.value = value.clone();
            }
        }
    }
    model.into_workbook().unwrap()
}

#[test]
fn test_json_round_trip_passes_full() {
    round_trip(&JsonDocument).unwrap();
}

#[test]
fn test_model_round_trip_passes_reduced_model() {
    round_trip(&ReducedModel).unwrap();
}

#[test]
fn test_csv_round_trip_passes_plain_text() {
    round_trip(&PlainText::default()).unwrap();
}

#[test]
fn test_full_expects_literal_formulas() {
    let wb = JsonDocument.reconstruct(&reference()).unwrap();
    let sheet = wb.worksheet_by_name("blort").unwrap();

    let d1 = sheet.cell_view(addr("D1"));
    assert_eq!(d1.value_type, ValueType::Formula);
    assert_eq!(d1.value, &CellValue::from(fixtures::formula_with_result()));

    let e1 = sheet.cell_view(addr("E1"));
    assert_eq!(e1.value_type, ValueType::Formula);
    assert_eq!(e1.value.formula_text(), Some("A2"));
}

#[test]
fn test_plain_text_degrades_formulas_and_links() {
    let wb = PlainText::default().reconstruct(&reference()).unwrap();
    let sheet = wb.worksheet_by_name("sheet1").unwrap();

    let d1 = sheet.cell_view(addr("D1"));
    assert_eq!(d1.value, &CellValue::Number(7.0));
    assert_eq!(d1.value_type, ValueType::Number);

    let e1 = sheet.cell_view(addr("E1"));
    assert_eq!(e1.value, &CellValue::Null);
    assert_eq!(e1.value_type, ValueType::Null);

    let f1 = sheet.cell_view(addr("F1"));
    assert_eq!(f1.value, &CellValue::string("http://www.link.com"));
    assert_eq!(f1.value_type, ValueType::String);
}

#[test]
fn test_literal_formula_fails_plain_text_profile() {
    // A representation that kept the formula does not satisfy plain-text
    let wb = ReducedModel.reconstruct(&reference()).unwrap();
    let mut profile = FidelityProfile::plain_text();
    profile.sheet_name = "blort".into();

    let err = FidelityChecker::new(profile).check(&wb).unwrap_err();
    assert_eq!(
        err,
        FidelityError::ValueMismatch {
            locator: "D1".into(),
            expected: "7".into(),
            actual: "=A1 (7)".into(),
        }
    );
}

#[test]
fn test_date_drift_within_tight_tolerance() {
    let reference = reference();
    for ms in [1, 3, -3] {
        let wb = with_cell(
            &reference,
            "C1",
            CellValue::Date(fixtures::date() + Duration::milliseconds(ms)),
        );
        FidelityChecker::new(FidelityProfile::reduced_model())
            .check(&wb)
            .unwrap();
    }

    let wb = with_cell(
        &reference,
        "C1",
        CellValue::Date(fixtures::date() + Duration::milliseconds(4)),
    );
    let err = FidelityChecker::new(FidelityProfile::reduced_model())
        .check(&wb)
        .unwrap_err();
    assert!(matches!(err, FidelityError::ValueMismatch { ref locator, .. } if locator == "C1"));
}

#[test]
fn test_date_drift_under_plain_text_tolerance() {
    let csv = PlainText::default().reconstruct(&reference()).unwrap();
    let checker = FidelityChecker::new(FidelityProfile::plain_text());

    let drifted = |ms: i64| {
        let mut model = WorkbookModel::from_workbook(&csv);
        let cell = model.sheets[0].rows[0]
            .cells
            .iter_mut()
            .find(|c| c.address == "C1")
            .unwrap();
        cell.value = CellValue::Date(fixtures::date() + Duration::milliseconds(ms));
        model.into_workbook().unwrap()
    };

    checker.check(&drifted(1000)).unwrap();
    checker.check(&drifted(-1000)).unwrap();
    assert!(matches!(
        checker.check(&drifted(1001)),
        Err(FidelityError::ValueMismatch { .. })
    ));
}

#[test]
fn test_full_rejects_kept_bad_alignments() {
    // The reduced model keeps the invalid alignments
    let kept = ReducedModel.reconstruct(&reference()).unwrap();
    let err = FidelityChecker::new(FidelityProfile::full())
        .check(&kept)
        .unwrap_err();
    assert!(matches!(err, FidelityError::StyleMismatch { ref locator, .. } if locator == "A7"));

    // JSON drops them and keeps the text
    let dropped = JsonDocument.reconstruct(&reference()).unwrap();
    let sheet = dropped.worksheet(0).unwrap();
    for (col, (text, _)) in (1u32..).zip(fixtures::bad_alignments()) {
        let view = sheet.cell_view(CellAddress::new(7, col));
        assert_eq!(view.value, &CellValue::string(text));
        assert_eq!(view.style.alignment, None);
    }
}

#[test]
fn test_full_requires_bad_alignment_row() {
    let wb = JsonDocument
        .reconstruct(
            &DocumentBuilder::new()
                .with_bad_alignments(false)
                .build()
                .unwrap(),
        )
        .unwrap();
    let err = FidelityChecker::new(FidelityProfile::full())
        .check(&wb)
        .unwrap_err();
    assert!(matches!(err, FidelityError::ValueMismatch { ref locator, .. } if locator == "A7"));

    FidelityChecker::new(FidelityProfile::full().with_styles(false))
        .check(&wb)
        .unwrap();
}

#[tokio::test]
async fn test_streamed_json_document_passes_full() {
    let wb = JsonDocument.reconstruct(&reference()).unwrap();
    let (tx, rx) = mpsc::channel(1);
    let producer = spawn_row_producer(wb.worksheet(0).unwrap(), tx);

    StreamingFidelityChecker::new(FidelityProfile::full())
        .check(rx)
        .await
        .unwrap();
    producer.await.unwrap();
}

#[tokio::test]
async fn test_streamed_mismatch_stops_consumer() {
    let wb = with_cell(&reference(), "B1", CellValue::string("changed"));
    let (tx, rx) = mpsc::channel(1);
    let producer = spawn_row_producer(wb.worksheet(0).unwrap(), tx);

    let err = StreamingFidelityChecker::new(FidelityProfile::reduced_model())
        .check(rx)
        .await
        .unwrap_err();
    assert!(matches!(err, FidelityError::ValueMismatch { ref locator, .. } if locator == "B1"));

    // The receiver is gone; the producer stops instead of blocking
    producer.await.unwrap();
}

#[test]
fn test_row_stream_without_end_is_incomplete() {
    let wb = reference();
    let events: Vec<RowEvent> = wb
        .worksheet(0)
        .unwrap()
        .row_events()
        .filter(|e| *e != RowEvent::End)
        .collect();

    let err = StreamingFidelityChecker::new(FidelityProfile::reduced_model())
        .check_events(events)
        .unwrap_err();
    assert!(matches!(err, FidelityError::IncompleteStream { .. }));
}

#[test]
fn test_saved_json_passes_full() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.json");
    reference().save(&path).unwrap();

    let opened = Workbook::open(&path).unwrap();
    FidelityChecker::new(FidelityProfile::full())
        .check(&opened)
        .unwrap();

    // The bad-alignment cells keep their text without an alignment
    let a7 = opened.worksheet(0).unwrap().cell_view(addr("A7"));
    assert_eq!(a7.value, &CellValue::string("Nothing"));
    assert_eq!(a7.style.alignment, None);
}

#[test]
fn test_saved_csv_passes_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.csv");
    reference().save(&path).unwrap();

    FidelityChecker::new(FidelityProfile::plain_text())
        .check(&Workbook::open(&path).unwrap())
        .unwrap();
}

#[test]
fn test_validation_sheet_survives_json_only() {
    let reference = reference();

    let json = JsonDocument.reconstruct(&reference).unwrap();
    let sheet = json
        .worksheet_by_name(fixtures::VALIDATION_SHEET_NAME)
        .unwrap();
    for entry in fixtures::validation_matrix() {
        for range in &entry.validation.ranges {
            assert_eq!(
                sheet.data_validation_at(range.top_left()),
                Some(&entry.validation),
                "{}",
                entry.label
            );
        }
    }
    FidelityChecker::new(FidelityProfile::full())
        .check_validation_sheet(sheet)
        .unwrap();

    let csv = PlainText::default().reconstruct(&reference).unwrap();
    assert_eq!(csv.sheet_count(), 1);
    assert!(csv
        .worksheet(0)
        .unwrap()
        .data_validations()
        .is_empty());
}
