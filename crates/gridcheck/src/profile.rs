//! Capability profiles
//!
//! A [`FidelityProfile`] states which features a representation preserves
//! and how much date precision it may lose. The checkers read every
//! degradation decision from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fixtures::{Gate, SHEET_NAME};

/// Capabilities of one representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FidelityProfile {
    /// Name the reference sheet has after reconstruction
    pub sheet_name: String,
    /// Formulas and hyperlinks survive; otherwise they degrade to plain values
    pub supports_formulas: bool,
    /// Merge members survive; otherwise they are not checked
    pub supports_merges: bool,
    /// Number formats, fonts, borders, fills, alignments and row heights survive
    pub supports_styles: bool,
    /// Invalid alignments are dropped on write
    pub supports_bad_alignment_rejection: bool,
    /// Outline levels, tab color and page setup survive
    pub supports_sheet_properties: bool,
    /// Workbook views survive
    pub supports_views: bool,
    /// The data validation sheet and its rules survive
    pub supports_data_validations: bool,
    /// Largest date drift accepted, in milliseconds
    pub date_tolerance_ms: u64,
}

impl FidelityProfile {
    /// Everything survives, dates within 3 ms
    pub fn full() -> Self {
        Self {
            sheet_name: SHEET_NAME.to_string(),
            supports_formulas: true,
            supports_merges: true,
            supports_styles: true,
            supports_bad_alignment_rejection: true,
            supports_sheet_properties: true,
            supports_views: true,
            supports_data_validations: true,
            date_tolerance_ms: 3,
        }
    }

    /// As [`full`](Self::full), but invalid alignments are kept
    pub fn reduced_model() -> Self {
        Self {
            supports_bad_alignment_rejection: false,
            ..Self::full()
        }
    }

    /// Values only, dates within a second
    pub fn plain_text() -> Self {
        Self {
            sheet_name: gridcheck_csv::DEFAULT_SHEET_NAME.to_string(),
            supports_formulas: false,
            supports_merges: false,
            supports_styles: false,
            supports_bad_alignment_rejection: false,
            supports_sheet_properties: false,
            supports_views: false,
            supports_data_validations: false,
            date_tolerance_ms: 1000,
        }
    }

    /// Switch style checking; turning it off also disables alignment rejection
    pub fn with_styles(self, styles: bool) -> Self {
        Self {
            supports_styles: styles,
            supports_bad_alignment_rejection: self.supports_bad_alignment_rejection && styles,
            ..self
        }
    }

    /// Whether rows behind `gate` are checked
    pub fn checks(&self, gate: Gate) -> bool {
        match gate {
            Gate::Always => true,
            Gate::Styles => self.supports_styles,
            Gate::BadAlignment => self.supports_styles && self.supports_bad_alignment_rejection,
        }
    }
}

impl Default for FidelityProfile {
    fn default() -> Self {
        Self::full()
    }
}

/// Named profile presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileName {
    Full,
    ReducedModel,
    PlainText,
}

impl ProfileName {
    pub const ALL: [ProfileName; 3] = [
        ProfileName::Full,
        ProfileName::ReducedModel,
        ProfileName::PlainText,
    ];

    /// The preset this name stands for
    pub fn profile(self) -> FidelityProfile {
        match self {
            ProfileName::Full => FidelityProfile::full(),
            ProfileName::ReducedModel => FidelityProfile::reduced_model(),
            ProfileName::PlainText => FidelityProfile::plain_text(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileName::Full => "full",
            ProfileName::ReducedModel => "reduced-model",
            ProfileName::PlainText => "plain-text",
        }
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized profile name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown profile '{0}' (expected full, reduced-model or plain-text)")]
pub struct UnknownProfile(pub String);

impl FromStr for ProfileName {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownProfile(s.to_string()))
    }
}
