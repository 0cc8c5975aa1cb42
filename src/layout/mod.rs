//! Topology-only rectangular layout of a [PhyloTree](crate::model::PhyloTree).
//!
//! Each vertex gets a discrete depth (generations from the root, drawn on
//! the x axis) and an order (drawn on the y axis). Leaves are ordered
//! `0, 1, 2, ...` from left to right in the source text; internal vertices
//! sit at the mean order of their children.
//!
//! * [`layout`] - computes [Coordinates] for a tree
//! * [LaidOutTree] - a tree bundled with its coordinates
//! * [LayoutCache] - memoizes parse + layout by source text

pub mod cache;
pub mod cladogram;

pub use cache::{LaidOutTree, LayoutCache};
pub use cladogram::{layout, Coordinates, Extent, Point};
