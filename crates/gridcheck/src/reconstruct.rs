//! Reconstruction through concrete representations
//!
//! A [`Representation`] encodes a workbook the way some storage form would
//! and decodes it again. Each one pairs with the profile describing what it
//! preserves, so [`round_trip`] can build, reconstruct and check in one go.

use gridcheck_core::{Workbook, WorkbookModel};
use gridcheck_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};

use crate::builder::DocumentBuilder;
use crate::checker::FidelityChecker;
use crate::error::{ReconstructError, Result};
use crate::profile::{FidelityProfile, ProfileName};

/// A storage form a workbook can be pushed through
pub trait Representation {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// What this representation preserves
    fn profile(&self) -> FidelityProfile;

    /// Encode `workbook` and decode the result
    fn reconstruct(&self, workbook: &Workbook) -> std::result::Result<Workbook, ReconstructError>;
}

/// Full document as JSON text with strict style validation
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocument;

impl Representation for JsonDocument {
    fn name(&self) -> &'static str {
        "json"
    }

    fn profile(&self) -> FidelityProfile {
        FidelityProfile::full()
    }

    fn reconstruct(&self, workbook: &Workbook) -> std::result::Result<Workbook, ReconstructError> {
        let model = strict_model(workbook);
        let bytes = serde_json::to_vec(&model)?;
        tracing::debug!(bytes = bytes.len(), "encoded JSON document");
        let decoded: WorkbookModel = serde_json::from_slice(&bytes)?;
        Ok(decoded.into_workbook()?)
    }
}

/// The document model with everything a strict writer refuses removed
pub(crate) fn strict_model(workbook: &Workbook) -> WorkbookModel {
    let mut model = WorkbookModel::from_workbook(workbook);
    let dropped = model.sanitize();
    if dropped > 0 {
        tracing::warn!(dropped, "strict validation dropped style attributes");
    }
    model
}

/// The in-memory document model, without validation or encoding
#[derive(Debug, Clone, Copy, Default)]
pub struct ReducedModel;

impl Representation for ReducedModel {
    fn name(&self) -> &'static str {
        "model"
    }

    fn profile(&self) -> FidelityProfile {
        FidelityProfile::reduced_model()
    }

    fn reconstruct(&self, workbook: &Workbook) -> std::result::Result<Workbook, ReconstructError> {
        Ok(WorkbookModel::from_workbook(workbook).into_workbook()?)
    }
}

/// The first worksheet's values as CSV
#[derive(Debug, Clone, Default)]
pub struct PlainText {
    pub write: CsvWriteOptions,
    pub read: CsvReadOptions,
}

impl Representation for PlainText {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn profile(&self) -> FidelityProfile {
        FidelityProfile {
            sheet_name: self.read.sheet_name.clone(),
            ..FidelityProfile::plain_text()
        }
    }

    fn reconstruct(&self, workbook: &Workbook) -> std::result::Result<Workbook, ReconstructError> {
        let sheet = workbook.worksheet(0).ok_or(ReconstructError::NoWorksheet)?;

        let mut buf = Vec::new();
        CsvWriter::write(sheet, &mut buf, &self.write)?;
        tracing::debug!(bytes = buf.len(), sheet = sheet.name(), "encoded CSV");

        let mut decoded = Workbook::new();
        decoded.add_existing_worksheet(CsvReader::read(buf.as_slice(), &self.read)?)?;
        Ok(decoded)
    }
}

/// The representation matching a named profile
pub fn representation(name: ProfileName) -> Box<dyn Representation> {
    match name {
        ProfileName::Full => Box::new(JsonDocument),
        ProfileName::ReducedModel => Box::new(ReducedModel),
        ProfileName::PlainText => Box::new(PlainText::default()),
    }
}

/// Build the reference document, reconstruct it and check the result
pub fn round_trip(representation: &dyn Representation) -> Result<()> {
    let workbook = DocumentBuilder::new().build()?;
    let reconstructed = representation.reconstruct(&workbook)?;
    FidelityChecker::new(representation.profile()).check(&reconstructed)?;
    tracing::info!(representation = representation.name(), "round trip passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FidelityError;

    #[test]
    fn test_every_preset_round_trips() {
        for name in ProfileName::ALL {
            let rep = representation(name);
            assert_eq!(rep.profile(), name.profile(), "{name}");
            round_trip(rep.as_ref()).unwrap();
        }
    }

    #[test]
    fn test_plain_text_fails_full_profile() {
        let workbook = DocumentBuilder::new().build().unwrap();
        let reconstructed = PlainText::default().reconstruct(&workbook).unwrap();
        let mut profile = FidelityProfile::full();
        profile.sheet_name = "sheet1".into();

        let err = FidelityChecker::new(profile).check(&reconstructed).unwrap_err();
        // Views are the first thing CSV loses
        assert!(matches!(
            err,
            FidelityError::PropertyMismatch { property: "views", .. }
        ));
    }

    #[test]
    fn test_empty_workbook_cannot_be_encoded_as_csv() {
        let result = PlainText::default().reconstruct(&Workbook::new());
        assert!(matches!(result, Err(ReconstructError::NoWorksheet)));
    }
}
