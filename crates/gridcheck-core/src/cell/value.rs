//! Cell value types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Null,

    /// Numeric value
    Number(f64),

    /// String value
    String(String),

    /// Date-time value, millisecond precision is meaningful
    Date(DateTime<Utc>),

    /// Formula with an optional cached result
    Formula(FormulaValue),

    /// Hyperlink with display text
    Hyperlink(HyperlinkValue),
}

/// A formula and the result last calculated for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaValue {
    /// Formula text without the leading `=` (e.g., "A1")
    pub formula: String,
    /// Cached result, if the formula has been evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Box<CellValue>>,
}

impl FormulaValue {
    /// Create a formula with no cached result
    pub fn new<S: Into<String>>(formula: S) -> Self {
        Self {
            formula: formula.into(),
            result: None,
        }
    }

    /// Attach a cached result
    pub fn with_result<V: Into<CellValue>>(mut self, result: V) -> Self {
        self.result = Some(Box::new(result.into()));
        self
    }
}

/// A hyperlink cell value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperlinkValue {
    /// Text shown in the cell
    pub text: String,
    /// Link target
    pub hyperlink: String,
}

impl HyperlinkValue {
    /// Create a hyperlink value
    pub fn new<T: Into<String>, H: Into<String>>(text: T, hyperlink: H) -> Self {
        Self {
            text: text.into(),
            hyperlink: hyperlink.into(),
        }
    }
}

/// The type a cell reports when read
///
/// `Merge` is never stored; it is reported for every non-master cell of a
/// merged region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Null,
    Merge,
    Number,
    String,
    Date,
    Hyperlink,
    Formula,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "Null",
            ValueType::Merge => "Merge",
            ValueType::Number => "Number",
            ValueType::String => "String",
            ValueType::Date => "Date",
            ValueType::Hyperlink => "Hyperlink",
            ValueType::Formula => "Formula",
        };
        f.write_str(name)
    }
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Create a new formula value without a cached result
    pub fn formula<S: Into<String>>(formula: S) -> Self {
        CellValue::Formula(FormulaValue::new(formula))
    }

    /// Check if the cell is empty
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula(_))
    }

    /// The type this value reports when it is not part of a merge
    pub fn value_type(&self) -> ValueType {
        match self {
            CellValue::Null => ValueType::Null,
            CellValue::Number(_) => ValueType::Number,
            CellValue::String(_) => ValueType::String,
            CellValue::Date(_) => ValueType::Date,
            CellValue::Formula(_) => ValueType::Formula,
            CellValue::Hyperlink(_) => ValueType::Hyperlink,
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as a date
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Get the formula text if this is a formula cell
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula(f) => Some(&f.formula),
            _ => None,
        }
    }

    /// The value a representation without formulas or links keeps
    ///
    /// Formulas collapse to their cached result (or null) and hyperlinks to
    /// their target.
    pub fn plain(&self) -> CellValue {
        match self {
            CellValue::Formula(f) => f
                .result
                .as_deref()
                .map(CellValue::plain)
                .unwrap_or(CellValue::Null),
            CellValue::Hyperlink(h) => CellValue::String(h.hyperlink.clone()),
            other => other.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "null"),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => write!(f, "{:?}", s),
            CellValue::Date(d) => write!(f, "{}", d.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
            CellValue::Formula(fv) => match &fv.result {
                Some(result) => write!(f, "={} ({})", fv.formula, result),
                None => write!(f, "={}", fv.formula),
            },
            CellValue::Hyperlink(h) => write!(f, "{:?} <{}>", h.text, h.hyperlink),
        }
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(d: DateTime<Utc>) -> Self {
        CellValue::Date(d)
    }
}

impl From<FormulaValue> for CellValue {
    fn from(f: FormulaValue) -> Self {
        CellValue::Formula(f)
    }
}

impl From<HyperlinkValue> for CellValue {
    fn from(h: HyperlinkValue) -> Self {
        CellValue::Hyperlink(h)
    }
}
