//! Data validation
//!
//! A [`DataValidation`] restricts what may be entered into the cells of one
//! or more ranges and carries the prompt and error alert shown for them.
//! Operands are kept as formula text, exactly as a document stores them.
//!
//! ## Example
//!
//! ```rust
//! use gridcheck_core::{CellAddress, CellRange, DataValidation, Worksheet};
//!
//! let mut sheet = Worksheet::new("validations");
//! let validation = DataValidation::list("Yes,No,Maybe")
//!     .with_range(CellRange::parse("B1:B10").unwrap())
//!     .with_error_message("Invalid value", "Please select from the list");
//!
//! sheet.add_data_validation(validation).unwrap();
//! assert!(sheet.data_validation_at(CellAddress::new(4, 2)).is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::cell::{CellAddress, CellRange};
use crate::error::{Error, Result};

/// Data validation rule for the cells of one or more ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataValidation {
    #[serde(flatten)]
    pub validation_type: ValidationType,
    /// Ranges this rule applies to
    pub ranges: Vec<CellRange>,
    #[serde(default = "allow_blank_default")]
    pub allow_blank: bool,

    #[serde(default)]
    pub show_input_message: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    #[serde(default)]
    pub show_error_message: bool,
    #[serde(default)]
    pub error_style: ValidationErrorStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn allow_blank_default() -> bool {
    true
}

impl Default for DataValidation {
    fn default() -> Self {
        Self {
            validation_type: ValidationType::Any,
            ranges: Vec::new(),
            allow_blank: true,
            show_input_message: false,
            prompt_title: None,
            prompt: None,
            show_error_message: false,
            error_style: ValidationErrorStyle::Stop,
            error_title: None,
            error: None,
        }
    }
}

impl DataValidation {
    /// A rule that accepts anything
    pub fn new() -> Self {
        Self::default()
    }

    /// A list rule; `source` is comma separated values or a range reference
    pub fn list(source: impl Into<String>) -> Self {
        Self::of(ValidationType::List {
            source: source.into(),
        })
    }

    /// A whole number compared against one operand
    pub fn whole_number(operator: ValidationOperator, value: impl Into<String>) -> Self {
        Self::of(ValidationType::Whole(Comparison::new(operator, value)))
    }

    /// A whole number between (or not between) two operands
    pub fn whole_number_between(
        operator: ValidationOperator,
        low: impl Into<String>,
        high: impl Into<String>,
    ) -> Self {
        Self::of(ValidationType::Whole(Comparison::between(operator, low, high)))
    }

    /// A decimal number compared against one operand
    pub fn decimal(operator: ValidationOperator, value: impl Into<String>) -> Self {
        Self::of(ValidationType::Decimal(Comparison::new(operator, value)))
    }

    /// A date compared against one operand
    pub fn date(operator: ValidationOperator, value: impl Into<String>) -> Self {
        Self::of(ValidationType::Date(Comparison::new(operator, value)))
    }

    /// A text length compared against one operand
    pub fn text_length(operator: ValidationOperator, value: impl Into<String>) -> Self {
        Self::of(ValidationType::TextLength(Comparison::new(operator, value)))
    }

    /// A formula that must evaluate to true
    pub fn custom(formula: impl Into<String>) -> Self {
        Self::of(ValidationType::Custom {
            formula: formula.into(),
        })
    }

    fn of(validation_type: ValidationType) -> Self {
        Self {
            validation_type,
            ..Self::default()
        }
    }

    /// Add a range this rule applies to
    pub fn with_range(mut self, range: CellRange) -> Self {
        self.ranges.push(range);
        self
    }

    pub fn with_allow_blank(mut self, allow: bool) -> Self {
        self.allow_blank = allow;
        self
    }

    /// Set the prompt shown when a cell is selected
    pub fn with_input_message(
        mut self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.show_input_message = true;
        self.prompt_title = Some(title.into());
        self.prompt = Some(message.into());
        self
    }

    /// Set the alert shown when invalid data is entered
    pub fn with_error_message(
        mut self,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.show_error_message = true;
        self.error_title = Some(title.into());
        self.error = Some(message.into());
        self
    }

    pub fn with_error_style(mut self, style: ValidationErrorStyle) -> Self {
        self.error_style = style;
        self
    }

    /// Check if this rule covers an address
    pub fn applies_to(&self, addr: &CellAddress) -> bool {
        self.ranges.iter().any(|r| r.contains(addr))
    }

    /// Check that the rule covers at least one range and that comparisons
    /// carry the operands their operator needs
    pub fn validate(&self) -> Result<()> {
        if self.ranges.is_empty() {
            return Err(Error::InvalidValidation("no ranges".into()));
        }
        match self.validation_type.comparison() {
            Some(c) if c.operator.requires_two_values() != c.high.is_some() => {
                Err(Error::InvalidValidation(format!(
                    "operator {} takes {} operand(s)",
                    c.operator.as_str(),
                    if c.operator.requires_two_values() { 2 } else { 1 }
                )))
            }
            _ => Ok(()),
        }
    }
}

/// What a rule accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationType {
    /// Anything
    Any,
    Whole(Comparison),
    Decimal(Comparison),
    List {
        /// Comma separated values or a range reference
        source: String,
    },
    Date(Comparison),
    TextLength(Comparison),
    Custom {
        /// Formula that evaluates to true for valid input
        formula: String,
    },
}

impl ValidationType {
    /// The comparison of an operator-based rule
    pub fn comparison(&self) -> Option<&Comparison> {
        match self {
            ValidationType::Whole(c)
            | ValidationType::Decimal(c)
            | ValidationType::Date(c)
            | ValidationType::TextLength(c) => Some(c),
            _ => None,
        }
    }
}

/// An operator with one or two formula operands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub operator: ValidationOperator,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<String>,
}

impl Comparison {
    pub fn new(operator: ValidationOperator, value: impl Into<String>) -> Self {
        Self {
            operator,
            value: value.into(),
            high: None,
        }
    }

    pub fn between(
        operator: ValidationOperator,
        low: impl Into<String>,
        high: impl Into<String>,
    ) -> Self {
        Self {
            operator,
            value: low.into(),
            high: Some(high.into()),
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationOperator {
    #[default]
    Between,
    NotBetween,
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl ValidationOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationOperator::Between => "between",
            ValidationOperator::NotBetween => "notBetween",
            ValidationOperator::Equal => "equal",
            ValidationOperator::NotEqual => "notEqual",
            ValidationOperator::GreaterThan => "greaterThan",
            ValidationOperator::LessThan => "lessThan",
            ValidationOperator::GreaterThanOrEqual => "greaterThanOrEqual",
            ValidationOperator::LessThanOrEqual => "lessThanOrEqual",
        }
    }

    /// Check if this operator takes a low and a high operand
    pub fn requires_two_values(&self) -> bool {
        matches!(
            self,
            ValidationOperator::Between | ValidationOperator::NotBetween
        )
    }
}

/// Error alert styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorStyle {
    /// Reject invalid data
    #[default]
    Stop,
    /// Warn but allow
    Warning,
    /// Just inform
    Information,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(s: &str) -> CellRange {
        CellRange::parse(s).unwrap()
    }

    #[test]
    fn test_list_validation() {
        let v = DataValidation::list("Yes,No,Maybe").with_range(range("A1:A3"));
        assert_eq!(
            v.validation_type,
            ValidationType::List {
                source: "Yes,No,Maybe".into()
            }
        );
        assert!(v.allow_blank);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn test_between_takes_two_operands() {
        let v = DataValidation::whole_number_between(ValidationOperator::Between, "1", "100")
            .with_range(range("B2"));
        let c = v.validation_type.comparison().unwrap();
        assert_eq!(c.value, "1");
        assert_eq!(c.high.as_deref(), Some("100"));
        assert!(v.validate().is_ok());

        let one_sided =
            DataValidation::whole_number(ValidationOperator::Between, "1").with_range(range("B2"));
        assert!(matches!(
            one_sided.validate(),
            Err(Error::InvalidValidation(_))
        ));
    }

    #[test]
    fn test_rule_needs_a_range() {
        assert!(matches!(
            DataValidation::custom("A1>0").validate(),
            Err(Error::InvalidValidation(_))
        ));
    }

    #[test]
    fn test_with_messages() {
        let v = DataValidation::list("A,B,C")
            .with_input_message("Choose", "Select a value from the list")
            .with_error_message("Error", "Invalid selection")
            .with_error_style(ValidationErrorStyle::Warning);

        assert!(v.show_input_message);
        assert_eq!(v.prompt_title.as_deref(), Some("Choose"));
        assert_eq!(v.prompt.as_deref(), Some("Select a value from the list"));
        assert!(v.show_error_message);
        assert_eq!(v.error.as_deref(), Some("Invalid selection"));
        assert_eq!(v.error_style, ValidationErrorStyle::Warning);
    }

    #[test]
    fn test_applies_to() {
        let v = DataValidation::list("A,B").with_range(range("A1:C10"));

        assert!(v.applies_to(&CellAddress::new(1, 1)));
        assert!(v.applies_to(&CellAddress::new(6, 3)));
        assert!(!v.applies_to(&CellAddress::new(11, 1)));
        assert!(!v.applies_to(&CellAddress::new(1, 4)));
    }

    #[test]
    fn test_serde_shape() {
        let v = DataValidation::decimal(ValidationOperator::LessThan, "7.5").with_range(range("B4"));
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "decimal");
        assert_eq!(json["operator"], "lessThan");
        assert_eq!(json["value"], "7.5");

        let back: DataValidation = serde_json::from_value(json).unwrap();
        assert_eq!(back, v);

        let sparse: DataValidation = serde_json::from_str(
            r#"{"type":"list","source":"A,B","ranges":[{"start":{"row":1,"col":1},"end":{"row":1,"col":1}}]}"#,
        )
        .unwrap();
        assert!(sparse.allow_blank);
    }
}
