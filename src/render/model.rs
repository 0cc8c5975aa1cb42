//! Renderer-agnostic drawing primitives.

use crate::layout::{Extent, Point};
use crate::metadata::Color;
use crate::model::VertexIndex;
use crate::render::legend::Legend;
use crate::render::style::RenderStyle;
use serde::Serialize;

/// Direction of a branch segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Along the order axis at the parent's depth
    Vertical,
    /// Along the depth axis at the child's order
    Horizontal,
}

/// One straight line of a branch elbow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// The non-root vertex whose branch this segment belongs to
    pub vertex: VertexIndex,
    pub kind: SegmentKind,
    pub from: Point,
    pub to: Point,
}

/// An annotated leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub vertex: VertexIndex,
    pub position: Point,
    /// The leaf's sample identifier
    pub label: String,
    pub tooltip: String,
    /// `None` only in uncategorized renderings
    pub category: Option<String>,
    pub color: Color,
    /// Set on the first marker of each category
    pub show_legend: bool,
}

/// Axis titles and ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisMeta {
    pub x_title: String,
    pub y_title: String,
    pub y_ticks_visible: bool,
    pub y_note: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

pub const X_AXIS_TITLE: &str = "Tree Depth";
pub const Y_AXIS_TITLE: &str = "Leaf Nodes";
pub const Y_AXIS_NOTE: &str = "Vertical order is an arbitrary leaf ordering with no scale";

impl AxisMeta {
    /// Axes covering a layout of the given extent.
    pub fn for_extent(extent: Extent) -> Self {
        AxisMeta {
            x_title: X_AXIS_TITLE.to_string(),
            y_title: Y_AXIS_TITLE.to_string(),
            y_ticks_visible: false,
            y_note: Y_AXIS_NOTE.to_string(),
            x_range: (0.0, extent.max_depth as f64),
            y_range: (0.0, extent.num_leaves.saturating_sub(1) as f64),
        }
    }
}

/// Everything a charting surface needs to draw one tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub segments: Vec<Segment>,
    pub markers: Vec<Marker>,
    pub legend: Legend,
    pub axes: AxisMeta,
    pub style: RenderStyle,
}

impl RenderModel {
    /// Returns the markers that own a legend entry.
    pub fn legend_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|m| m.show_legend)
    }
}
