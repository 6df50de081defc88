//! Column types

/// Column metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    number: u32,
    /// Custom width in characters (None = default)
    pub width: Option<f64>,
    outline_level: u8,
}

impl Column {
    /// Create a new column with default settings
    pub fn new(number: u32) -> Self {
        Self {
            number,
            width: None,
            outline_level: 0,
        }
    }

    /// Column number (1-based)
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Outline/grouping level (0-7)
    pub fn outline_level(&self) -> u8 {
        self.outline_level
    }

    pub(crate) fn set_outline_level(&mut self, level: u8) {
        self.outline_level = level;
    }

    /// Check if this column has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.width.is_some() || self.outline_level > 0
    }
}
