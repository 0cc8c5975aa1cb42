//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [PhyloTree], which uses the arena pattern to store
//! [Vertex] nodes referenced by [VertexIndex]. Vertices have an ordered list
//! of any number of children; a vertex without children is a leaf.
//!
//! # Leaf identity
//! Each leaf carries a [SampleId], the typed join key used to attach
//! metadata. Uniqueness is enforced while the tree is built, through the
//! tree's [LeafIndex].
//!
//! # Building trees
//! Trees are typically constructed during parsing via the [TreeBuilder]
//! trait, which decouples parsers from concrete tree types:
//!
//! - [PhyloTreeBuilder] → [PhyloTree]
//!
//! You can implement [TreeBuilder] to construct your own tree representation
//! while reusing the Newick parser.

pub mod leaf_index;
pub mod phylo_tree_builder;
pub mod sample_id;
pub mod tree;
pub mod tree_builder;
pub mod vertex;

pub use leaf_index::{DuplicateSampleId, LeafIndex};
pub use phylo_tree_builder::PhyloTreeBuilder;
pub use sample_id::SampleId;
pub use tree::{PhyloTree, VertexIndex};
pub use tree_builder::TreeBuilder;
pub use vertex::{BranchLength, Vertex};
