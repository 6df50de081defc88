//! Text alignment types

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest indent a strict serializer accepts
pub const MAX_INDENT: i16 = 250;

/// Text alignment settings
///
/// Out-of-range indents and rotations are representable so a loosely typed
/// document can carry them; [`Alignment::validate`] is the strict check a
/// full-fidelity serializer applies before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Alignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HorizontalAlignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VerticalAlignment>,
    #[serde(default)]
    pub wrap_text: bool,
    #[serde(default)]
    pub shrink_to_fit: bool,
    /// Indent level (0-250 when valid)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<i16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_rotation: Option<TextRotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_order: Option<ReadingOrder>,
}

impl Alignment {
    /// Create an alignment with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set horizontal alignment
    pub fn with_horizontal(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = Some(align);
        self
    }

    /// Set vertical alignment
    pub fn with_vertical(mut self, align: VerticalAlignment) -> Self {
        self.vertical = Some(align);
        self
    }

    /// Enable text wrapping
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap_text = wrap;
        self
    }

    /// Enable shrink to fit
    pub fn with_shrink_to_fit(mut self, shrink: bool) -> Self {
        self.shrink_to_fit = shrink;
        self
    }

    /// Set indent level
    pub fn with_indent(mut self, indent: i16) -> Self {
        self.indent = Some(indent);
        self
    }

    /// Set rotation angle in degrees, unchecked
    pub fn with_rotation(mut self, degrees: i16) -> Self {
        self.text_rotation = Some(TextRotation::Degrees(degrees));
        self
    }

    /// Stack characters vertically
    pub fn vertical_text(mut self) -> Self {
        self.text_rotation = Some(TextRotation::Vertical);
        self
    }

    /// Set reading order
    pub fn with_reading_order(mut self, order: ReadingOrder) -> Self {
        self.reading_order = Some(order);
        self
    }

    /// Check if no attribute is set
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Strict validation
    ///
    /// Rejects blank alignments, indents outside `0..=250` and rotations
    /// outside `-90..=90`.
    pub fn validate(&self) -> Result<()> {
        if self.is_blank() {
            return Err(Error::InvalidAlignment("no alignment attribute set".into()));
        }

        if let Some(indent) = self.indent {
            if !(0..=MAX_INDENT).contains(&indent) {
                return Err(Error::InvalidAlignment(format!(
                    "indent {} outside 0..={}",
                    indent, MAX_INDENT
                )));
            }
        }

        if let Some(TextRotation::Degrees(degrees)) = self.text_rotation {
            if !(-90..=90).contains(&degrees) {
                return Err(Error::InvalidAlignment(format!(
                    "text rotation {} outside -90..=90",
                    degrees
                )));
            }
        }

        Ok(())
    }
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
    /// Repeat content to fill cell width
    Fill,
    Justify,
    /// Center across selection
    CenterContinuous,
    Distributed,
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    Top,
    Middle,
    Bottom,
    Justify,
    Distributed,
}

/// Text rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRotation {
    /// Rotation angle in degrees, positive is counter-clockwise
    Degrees(i16),
    /// Characters stacked top to bottom
    Vertical,
}

/// Reading order for text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingOrder {
    LeftToRight,
    RightToLeft,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_alignments() {
        assert!(Alignment::new()
            .with_horizontal(HorizontalAlignment::Left)
            .with_vertical(VerticalAlignment::Top)
            .validate()
            .is_ok());
        assert!(Alignment::new().with_rotation(-90).validate().is_ok());
        assert!(Alignment::new().with_rotation(90).validate().is_ok());
        assert!(Alignment::new().vertical_text().validate().is_ok());
        assert!(Alignment::new().with_indent(0).validate().is_ok());
    }

    #[test]
    fn test_invalid_alignments() {
        assert!(Alignment::new().validate().is_err());
        assert!(Alignment::new().with_rotation(-91).validate().is_err());
        assert!(Alignment::new().with_rotation(91).validate().is_err());
        assert!(Alignment::new().with_indent(-1).validate().is_err());
        assert!(Alignment::new().with_indent(251).validate().is_err());
    }
}
