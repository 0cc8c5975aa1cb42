//! Presentation settings passed through to the charting surface.

use crate::metadata::Color;
use serde::{Deserialize, Serialize};

/// Line, marker and figure settings.
///
/// Not interpreted by the engine. Deserializable from JSON where every
/// field is optional, e.g. `{"marker_size": 8}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub branch_color: Color,
    pub branch_width: f64,
    pub marker_size: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle {
            branch_color: Color::named("black"),
            branch_width: 1.0,
            marker_size: 6.0,
            width: 1500,
            height: 900,
        }
    }
}

impl RenderStyle {
    pub fn with_branch_color(mut self, color: Color) -> Self {
        self.branch_color = color;
        self
    }

    pub fn with_branch_width(mut self, width: f64) -> Self {
        self.branch_width = width;
        self
    }

    pub fn with_marker_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    /// Sets the figure size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
