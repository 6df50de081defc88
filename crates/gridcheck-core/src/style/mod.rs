//! Cell styling types
//!
//! This module contains types for cell formatting:
//! - [`Style`] - The style attributes of one cell
//! - [`Font`] - Font settings
//! - [`Fill`] - Background fill
//! - [`Border`] - Cell borders
//! - [`Alignment`] - Text alignment
//! - [`Color`] - Color representation

mod alignment;
mod border;
mod color;
mod fill;
mod font;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use alignment::{
    Alignment, HorizontalAlignment, ReadingOrder, TextRotation, VerticalAlignment, MAX_INDENT,
};
pub use border::{Border, BorderEdge, BorderLineStyle};
pub use color::Color;
pub use fill::{Fill, GradientStop, GradientType, PatternType};
pub use font::{Font, Underline};

/// Style attributes of a cell
///
/// Every attribute is optional; `None` means the attribute was never set,
/// which is distinct from a default-valued attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    /// Number format code (e.g., "0.00%")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl Style {
    /// A style with no attribute set
    pub const EMPTY: Style = Style {
        number_format: None,
        font: None,
        border: None,
        fill: None,
        alignment: None,
    };

    /// Create a new empty style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number format code
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = Some(format.into());
        self
    }

    /// Set font
    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Set border
    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Set fill
    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Set alignment
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Check if no attribute is set
    pub fn is_empty(&self) -> bool {
        self.number_format.is_none()
            && self.font.is_none()
            && self.border.is_none()
            && self.fill.is_none()
            && self.alignment.is_none()
    }

    /// Drop attributes a strict serializer would refuse to write
    ///
    /// Returns the rejected alignment, if any.
    pub fn sanitize(&mut self) -> Option<Alignment> {
        match self.alignment {
            Some(alignment) if alignment.validate().is_err() => self.alignment.take(),
            _ => None,
        }
    }
}

/// Names one style attribute, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleAttribute {
    NumberFormat,
    Font,
    Border,
    Fill,
    Alignment,
    RowHeight,
}

impl fmt::Display for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StyleAttribute::NumberFormat => "numFmt",
            StyleAttribute::Font => "font",
            StyleAttribute::Border => "border",
            StyleAttribute::Fill => "fill",
            StyleAttribute::Alignment => "alignment",
            StyleAttribute::RowHeight => "height",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_style() {
        assert!(Style::new().is_empty());
        assert_eq!(Style::EMPTY, Style::default());
        assert!(!Style::new().number_format("0.00").is_empty());
    }

    #[test]
    fn test_sanitize_drops_invalid_alignment_only() {
        let mut style = Style::new()
            .number_format("0.00")
            .alignment(Alignment::new().with_rotation(91));
        let rejected = style.sanitize();

        assert_eq!(rejected, Some(Alignment::new().with_rotation(91)));
        assert_eq!(style.alignment, None);
        assert_eq!(style.number_format.as_deref(), Some("0.00"));

        let mut ok = Style::new().alignment(Alignment::new().with_wrap(true));
        assert_eq!(ok.sanitize(), None);
        assert!(ok.alignment.is_some());
    }
}
