//! Font style types

use serde::{Deserialize, Serialize};

use super::Color;

/// Font settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Font family name (e.g., "Calibri", "Arial")
    pub name: String,
    /// Font family class (1 = roman, 2 = swiss, 3 = modern, 4 = script, 5 = decorative)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<u8>,
    /// Font size in points
    pub size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: Underline,
    #[serde(default)]
    pub strike: bool,
    /// Outline (hollow) glyphs
    #[serde(default)]
    pub outline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            family: None,
            size: 11.0,
            bold: false,
            italic: false,
            underline: Underline::None,
            strike: false,
            outline: false,
            color: None,
        }
    }
}

impl Font {
    /// Create a font with a name and size
    pub fn new<S: Into<String>>(name: S, size: f64) -> Self {
        Self {
            name: name.into(),
            size,
            ..Self::default()
        }
    }

    /// Set family class
    pub fn with_family(mut self, family: u8) -> Self {
        self.family = Some(family);
        self
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set underline
    pub fn with_underline(mut self, underline: Underline) -> Self {
        self.underline = underline;
        self
    }

    /// Set strikethrough
    pub fn with_strike(mut self, strike: bool) -> Self {
        self.strike = strike;
        self
    }

    /// Set outline
    pub fn with_outline(mut self, outline: bool) -> Self {
        self.outline = outline;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Underline style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Underline {
    /// No underline
    #[default]
    None,
    /// Single underline
    Single,
    /// Double underline
    Double,
    /// Single accounting underline (extends to cell width)
    SingleAccounting,
    /// Double accounting underline
    DoubleAccounting,
}
