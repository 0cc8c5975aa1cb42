//! Cladeview lays out phylogenetic trees as rectangular cladograms and
//! annotates their leaves with sample metadata.
//!
//! The pipeline, leaf-first:
//! - Tree model: a Newick string is parsed into a [PhyloTree], an ordered,
//!   multifurcating arena tree whose leaves carry unique
//!   [SampleId](crate::model::SampleId)s. See [crate::model] and
//!   [crate::newick].
//! - Layout: [layout::layout] assigns every vertex a depth (generations from
//!   the root) and an order (leaf rank, averaged upward). Branch lengths are
//!   ignored. Parse + layout results can be memoized with a
//!   [LayoutCache](crate::layout::LayoutCache).
//! - Metadata binding: rows of a
//!   [MetadataTable](crate::metadata::MetadataTable) are joined to leaves by
//!   exact identifier match, and the categories of one column get colors
//!   from a [Palette](crate::metadata::Palette).
//! - Render assembly: branch elbows, leaf markers for the selected
//!   categories and a de-duplicated legend are collected into a
//!   serializable [RenderModel](crate::render::RenderModel).
//!
//! [TreeView](crate::view::TreeView) ties the steps together for an
//! interactive session where only the coloring column and the category
//! filter change between requests.
//!
//! # Example
//! ```
//! use cladeview::layout::LayoutCache;
//! use cladeview::metadata::MetadataTable;
//! use cladeview::view::{RenderRequest, TreeView};
//!
//! let mut cache = LayoutCache::new();
//! let tree = cache.get_or_parse("(A:0.1,(B:0.2,C:0.3):0.15):0.0").unwrap();
//! let table = MetadataTable::from_rows(
//!     ["IGIB_id", "severity"],
//!     [["A", "Mild"], ["B", "Severe"], ["C", "Severe"]],
//! ).unwrap();
//!
//! let view = TreeView::new(tree, table);
//! let model = view.render(&RenderRequest::new("severity", ["Mild", "Severe"]));
//! assert_eq!(model.markers.len(), 3);
//! assert_eq!(model.legend.len(), 2);
//! assert_eq!(model.segments.len(), 4);
//! ```

pub mod layout;
pub mod metadata;
pub mod model;
pub mod newick;
pub mod parser;
pub mod render;
pub mod view;

use crate::model::PhyloTree;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parses a Newick string using default settings, returning a [PhyloTree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    newick::parse_str(newick)
}

/// Parses a file holding one Newick tree using default settings.
///
/// See [`newick::parse_file`] for full documentation of this convenience function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<PhyloTree, ParsingError> {
    newick::parse_file(path)
}
