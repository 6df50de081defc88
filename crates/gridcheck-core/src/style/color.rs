//! Color representation

use std::fmt;

use serde::{Deserialize, Serialize};

/// Color representation
///
/// Supports ARGB and theme colors, the two forms a styled document keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// ARGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },

    /// Theme color with optional tint
    Theme {
        /// Theme color index (0-9)
        index: u8,
        /// Tint value (-100 to 100, percentage)
        tint: i8,
    },
}

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color::argb(0xFF, 0x00, 0x00, 0x00);
    /// Opaque white
    pub const WHITE: Color = Color::argb(0xFF, 0xFF, 0xFF, 0xFF);

    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// Create an opaque RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a: 0xFF, r, g, b }
    }

    /// Create a theme color
    pub const fn theme(index: u8, tint: i8) -> Self {
        Color::Theme { index, tint }
    }

    /// Create from an 8-digit ARGB hex string (e.g., "FF00FF00")
    pub fn from_argb_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 8 {
            return None;
        }

        let a = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let r = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let g = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let b = u8::from_str_radix(&hex[6..8], 16).ok()?;
        Some(Color::Argb { a, r, g, b })
    }

    /// Convert to ARGB hex string
    ///
    /// Theme colors have no fixed ARGB value and return `None`.
    pub fn to_argb_hex(&self) -> Option<String> {
        match self {
            Color::Argb { a, r, g, b } => Some(format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b)),
            Color::Theme { .. } => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Argb { a, r, g, b } => write!(f, "{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
            Color::Theme { index, tint } => write!(f, "theme{}({:+}%)", index, tint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_hex() {
        let green = Color::from_argb_hex("FF00FF00").unwrap();
        assert_eq!(green, Color::rgb(0, 255, 0));
        assert_eq!(green.to_argb_hex().as_deref(), Some("FF00FF00"));

        assert!(Color::from_argb_hex("00FF00").is_none());
        assert!(Color::from_argb_hex("GG00FF00").is_none());
        assert_eq!(Color::theme(4, 0).to_argb_hex(), None);
    }
}
