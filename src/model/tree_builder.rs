//! Trait for constructing phylogenetic trees during parsing.
//!
//! The [`TreeBuilder`] trait decouples parsers from concrete tree representations.
//! Parsers call builder methods as they read Newick syntax, and the
//! builder assembles whatever tree structure it wants.
//!
//! # Built-in implementation
//! * [`PhyloTreeBuilder`] - Builds [`PhyloTree`] with a [`LeafIndex`]
//!
//! # Custom implementations
//! You can implement [`TreeBuilder`] to construct your own tree representation,
//! allowing you to reuse the parsing logic without adopting this crate's tree model.
//!
//! # Builder lifecycle
//! A builder can construct multiple trees sequentially:
//!
//! ```text
//! Empty ──→ init_next() ──→ Building ──→ add_* ──→ finish_tree(root) ──→ Empty
//!   ↑                                                                    │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```
// Imports for doc links
#[allow(unused_imports)]
use crate::model::{LeafIndex, PhyloTree, PhyloTreeBuilder};

use crate::model::leaf_index::DuplicateSampleId;
use crate::model::sample_id::SampleId;
use crate::model::vertex::BranchLength;

// =#========================================================================#=
// TREE BUILDER (trait)
// =#========================================================================T=
/// Abstraction for constructing trees during parsing.
///
/// Parsers are generic over this trait, calling its methods as they encounter
/// leaves and internal vertices in the input, bottom-up. This allows the same
/// parser to build different tree representations.
///
/// # Implementing this trait
/// The parser drives the lifecycle:
///
/// 1. [`init_next`](Self::init_next) -> prepare for a new tree
/// 2. [`add_leaf`](Self::add_leaf), [`add_internal`](Self::add_internal)
///    -> build structure, children always before their parent
/// 3. [`finish_tree`](Self::finish_tree) -> mark the root and return the tree
///
/// After `finish_tree`, the builder returns to an empty state,
/// ready for `init_next` again.
pub trait TreeBuilder {
    /// The type used to identify vertices during construction.
    ///
    /// Returned by the `add_*` methods, then passed to subsequent calls to
    /// connect parent-child relationships.
    type VertexIdx: Copy;

    /// The tree type produced by this builder.
    type Tree;

    /// Prepares the builder for constructing a new tree.
    ///
    /// # Arguments
    /// * `num_leaves` — Expected number of leaves (hint for allocation)
    fn init_next(&mut self, num_leaves: usize);

    /// Adds a leaf vertex to the tree under construction.
    ///
    /// # Arguments
    /// * `sample_id` — Leaf label
    /// * `branch_len` — Branch length to parent, if specified in the Newick
    ///
    /// # Errors
    /// [DuplicateSampleId] if a leaf with the same label was already added,
    /// since labels are the join key for metadata.
    fn add_leaf(
        &mut self,
        sample_id: SampleId,
        branch_len: Option<BranchLength>,
    ) -> Result<Self::VertexIdx, DuplicateSampleId>;

    /// Adds an internal vertex with the given ordered children.
    ///
    /// # Arguments
    /// * `children` — Indices returned by previous `add_*` calls, in source order
    /// * `name` — Optional label following the closing parenthesis
    /// * `branch_len` — Branch length to parent, if specified
    fn add_internal(
        &mut self,
        children: Vec<Self::VertexIdx>,
        name: Option<String>,
        branch_len: Option<BranchLength>,
    ) -> Self::VertexIdx;

    /// Finalizes the building process with the given root and returns the tree.
    ///
    /// Returns `None` if [`init_next`](Self::init_next) was not called.
    fn finish_tree(&mut self, root: Self::VertexIdx) -> Option<Self::Tree>;
}
