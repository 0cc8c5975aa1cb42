//! Vertex module for phylogenetic tree representation.

use crate::model::sample_id::SampleId;
use crate::model::tree::VertexIndex;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a rooted, ordered phylogenetic tree.
///
/// A vertex is either:
/// - **Leaf**: has no children and carries a [SampleId]
/// - **Internal**: has one or more children and might carry a free-form label
///
/// The root is the single vertex without a parent; it can be a leaf only in a
/// single-vertex tree.
///
/// # Invariants
/// - `index` is the position of this vertex in the tree arena
/// - `children` keeps the order of the source text, which is the left-to-right
///   order of the drawn tree
/// - `branch_length` is finite if set; it is kept but never used for layout
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Index of the parent vertex, `None` for the root
    parent: Option<VertexIndex>,
    /// Ordered child indices, empty iff leaf
    children: Vec<VertexIndex>,
    /// Sample identifier (leaves) or optional clade name (internal vertices)
    label: VertexLabel,
    /// Distance to parent (optional, finite if present)
    branch_length: Option<BranchLength>,
}

/// Label carried by a vertex.
#[derive(PartialEq, Debug, Clone)]
pub enum VertexLabel {
    /// Leaves are identified by a validated sample identifier.
    Sample(SampleId),
    /// Internal vertices may be named, e.g. by a clade label.
    Clade(Option<String>),
}

impl Vertex {
    /// Creates a new leaf vertex without parent.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `sample_id` - Identifier of the sample this leaf represents
    /// * `branch_length` - Distance to parent node
    pub fn new_leaf(
        index: VertexIndex,
        sample_id: SampleId,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex {
            index,
            parent: None,
            children: Vec::new(),
            label: VertexLabel::Sample(sample_id),
            branch_length,
        }
    }

    /// Creates a new internal vertex without parent.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Ordered child indices; must not be empty
    /// * `name` - Optional clade name
    /// * `branch_length` - Distance to parent node
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        name: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        debug_assert!(!children.is_empty(), "internal vertex without children");
        Vertex {
            index,
            parent: None,
            children,
            label: VertexLabel::Clade(name),
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns `true` if this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex has children.
    pub fn is_internal(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns `true` if this vertex has no parent.
    ///
    /// Note that during construction every vertex is parentless until it gets
    /// attached, so this is only meaningful on a finished tree.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the ordered child indices, empty for a leaf.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns the index of the parent, `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Returns `true` if this vertex has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        self.parent = Some(parent);
    }

    /// Returns the sample identifier if this is a leaf, else `None`.
    pub fn sample_id(&self) -> Option<&SampleId> {
        match &self.label {
            VertexLabel::Sample(id) => Some(id),
            VertexLabel::Clade(_) => None,
        }
    }

    /// Returns the display label: the sample identifier of a leaf or the
    /// clade name of an internal vertex, if any.
    pub fn label(&self) -> Option<&str> {
        match &self.label {
            VertexLabel::Sample(id) => Some(id.as_str()),
            VertexLabel::Clade(name) => name.as_deref(),
        }
    }

    /// Returns the branch length to the parent if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Returns whether this vertex has a [BranchLength].
    pub fn has_branch_length(&self) -> bool {
        self.branch_length.is_some()
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced finite.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// Negative values occur in distance-based trees (e.g. neighbor joining)
/// and are kept as they are.
/// A cladogram ignores it for placement, but it survives a round trip
/// through the Newick writer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length, or `None` if `length` is not finite.
    pub fn new(length: f64) -> Option<Self> {
        if length.is_finite() {
            Some(BranchLength(length))
        } else {
            None
        }
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_length_rejects_non_finite() {
        assert!(BranchLength::new(0.0).is_some());
        assert_eq!(*BranchLength::new(1.5).unwrap(), 1.5);
        assert_eq!(*BranchLength::new(-0.1).unwrap(), -0.1);
        assert!(BranchLength::new(f64::NAN).is_none());
        assert!(BranchLength::new(f64::INFINITY).is_none());
    }

    #[test]
    fn leaf_and_internal_labels() {
        let leaf = Vertex::new_leaf(0, SampleId::new("A").unwrap(), None);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.sample_id().map(SampleId::as_str), Some("A"));
        assert_eq!(leaf.label(), Some("A"));

        let internal = Vertex::new_internal(1, vec![0], None, None);
        assert!(internal.is_internal());
        assert_eq!(internal.sample_id(), None);
        assert_eq!(internal.label(), None);
    }
}
