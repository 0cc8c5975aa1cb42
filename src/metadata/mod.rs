//! Sample metadata and category coloring.
//!
//! A [MetadataTable] is joined to the leaves of a tree with [bind], using a
//! designated identifier column. One other column is then chosen for
//! coloring: [assign_colors] gives each of its categories a [Color] from a
//! [Palette].
//!
//! Configuration problems (missing columns, an empty palette) are reported
//! as [ConfigurationError]; problems reading the table as [MetadataError].

pub mod binding;
pub mod color;
pub mod error;
pub mod table;

pub use binding::{bind, default_selection, Bindings};
pub use color::{assign_colors, Color, ColorMap, Palette, DEFAULT_COLORS, FALLBACK_COLOR};
pub use error::{ColumnRole, ConfigurationError, MetadataError};
pub use table::{MetadataTable, Record, MISSING_MARKERS};

/// Identifier column used when none is configured.
pub const DEFAULT_JOIN_COLUMN: &str = "IGIB_id";
