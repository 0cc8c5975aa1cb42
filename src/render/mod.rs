//! Render assembly: from layout, bindings and colors to flat drawing
//! primitives.
//!
//! The output [RenderModel] holds branch [Segment]s, leaf [Marker]s, a
//! [Legend] and [AxisMeta]. It is pure data (serializable with serde);
//! drawing it is left to a charting surface.

pub mod assemble;
pub mod legend;
pub mod model;
pub mod style;

pub use assemble::{assemble, assemble_uncategorized};
pub use legend::{Legend, LegendEntry};
pub use model::{AxisMeta, Marker, RenderModel, Segment, SegmentKind};
pub use style::RenderStyle;
