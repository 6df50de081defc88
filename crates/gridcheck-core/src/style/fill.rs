//! Fill/background style types

use serde::{Deserialize, Serialize};

use super::Color;

/// Fill style for cell background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    /// Pattern fill
    Pattern {
        pattern: PatternType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fg_color: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bg_color: Option<Color>,
    },

    /// Gradient fill
    Gradient {
        gradient: GradientType,
        stops: Vec<GradientStop>,
    },
}

impl Fill {
    /// Create a pattern fill
    pub fn pattern(pattern: PatternType, fg_color: Option<Color>, bg_color: Option<Color>) -> Self {
        Fill::Pattern {
            pattern,
            fg_color,
            bg_color,
        }
    }

    /// Create a linear gradient running at `degree`
    pub fn linear_gradient(degree: f64, stops: Vec<GradientStop>) -> Self {
        Fill::Gradient {
            gradient: GradientType::Angle { degree },
            stops,
        }
    }

    /// Create a path gradient radiating from a center point
    pub fn path_gradient(left: f64, top: f64, stops: Vec<GradientStop>) -> Self {
        Fill::Gradient {
            gradient: GradientType::Path { left, top },
            stops,
        }
    }
}

/// Pattern fill types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    None,
    Solid,
    MediumGray,
    DarkGray,
    LightGray,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
    LightHorizontal,
    LightVertical,
    LightDown,
    LightUp,
    LightGrid,
    LightTrellis,
    Gray125,
    Gray0625,
}

/// Gradient geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GradientType {
    /// Linear gradient at an angle in degrees
    Angle { degree: f64 },
    /// Path gradient around a center given as fractions of the cell
    Path { left: f64, top: f64 },
}

/// Gradient stop (position and color)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position (0.0 to 1.0)
    pub position: f64,
    pub color: Color,
}

impl GradientStop {
    /// Create a new gradient stop
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}
