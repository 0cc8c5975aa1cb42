//! Provides [TreeBuilder] implementation for [PhyloTree].

use crate::model::leaf_index::DuplicateSampleId;
use crate::model::sample_id::SampleId;
use crate::model::tree_builder::TreeBuilder;
use crate::model::vertex::BranchLength;
use crate::model::{PhyloTree, VertexIndex};

/// Builder that constructs [PhyloTree] instances.
///
/// # Example
/// ```
/// use cladeview::newick::NewickParser;
/// use cladeview::parser::byte_parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("(A,(B,C));");
/// let mut parser = NewickParser::default();
/// let tree = parser.parse_str(&mut byte_parser)?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct PhyloTreeBuilder {
    current_tree: Option<PhyloTree>,
}

impl PhyloTreeBuilder {
    /// Creates a new builder in the empty state.
    pub fn new() -> Self {
        Self { current_tree: None }
    }

    fn tree_mut(&mut self) -> &mut PhyloTree {
        // Parsers always call init_next first; fall back to an empty tree otherwise.
        self.current_tree.get_or_insert_with(|| PhyloTree::new(0))
    }
}

impl TreeBuilder for PhyloTreeBuilder {
    type VertexIdx = VertexIndex;
    type Tree = PhyloTree;

    fn init_next(&mut self, num_leaves: usize) {
        self.current_tree = Some(PhyloTree::new(num_leaves));
    }

    fn add_leaf(
        &mut self,
        sample_id: SampleId,
        branch_len: Option<BranchLength>,
    ) -> Result<Self::VertexIdx, DuplicateSampleId> {
        self.tree_mut().add_leaf(sample_id, branch_len)
    }

    fn add_internal(
        &mut self,
        children: Vec<Self::VertexIdx>,
        name: Option<String>,
        branch_len: Option<BranchLength>,
    ) -> Self::VertexIdx {
        self.tree_mut().add_internal(children, name, branch_len)
    }

    fn finish_tree(&mut self, root: Self::VertexIdx) -> Option<Self::Tree> {
        let mut tree = self.current_tree.take()?;
        tree.set_root(root);
        debug_assert!(tree.is_valid());
        Some(tree)
    }
}
