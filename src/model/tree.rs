//! Provides the phylogenetic tree representation.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [PhyloTree] - Rooted, ordered, multi-child tree using the arena pattern
//!   for efficient memory layout
//! * [VertexIndex] as type used to index vertices in tree
//! * [PreOrderIter], [PostOrderIter] and [LeafIter] for stack-based traversal

use crate::model::leaf_index::{DuplicateSampleId, LeafIndex};
use crate::model::sample_id::SampleId;
use crate::model::vertex::{BranchLength, Vertex};

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Aim is to avoid referencing troubles as well as to provide
/// efficient memory layout and cache locality for traversal operations.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - Vertices may have any positive number of children; the order of
///   children is the order in the source text and is significant.
/// - Leaves carry a [SampleId], unique within the tree, registered in a
///   [LeafIndex].
/// - Branch lengths are optional, but if provided must be finite.
///
/// # Construction
/// Bottom-up: add leaves, then internal vertices referring to already added
/// children, and finally mark the root with [`PhyloTree::set_root()`].
/// The [Newick parser](crate::newick::NewickParser) does exactly this.
/// Test validity with [`PhyloTree::is_valid()`].
///
/// The tree is immutable once built; nothing in this crate edits or
/// re-roots it.
///
/// # Example
/// ```
/// use cladeview::model::{PhyloTree, SampleId};
///
/// // ((A,B),C);
/// let mut tree = PhyloTree::new(3);
/// let a = tree.add_leaf(SampleId::new("A").unwrap(), None).unwrap();
/// let b = tree.add_leaf(SampleId::new("B").unwrap(), None).unwrap();
/// let c = tree.add_leaf(SampleId::new("C").unwrap(), None).unwrap();
/// let ab = tree.add_internal(vec![a, b], None, None);
/// let root = tree.add_internal(vec![ab, c], None, None);
/// tree.set_root(root);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.num_leaves(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PhyloTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Leaves by sample identifier
    leaves: LeafIndex,
}

// ============================================================================
// New, Construction, Getters / Accessors (pub)
// ============================================================================
impl PhyloTree {
    /// Creates a new empty tree with capacity for a tree with about `num_leaves` leaves.
    pub fn new(num_leaves: usize) -> Self {
        // Exact for binary trees, an overestimate otherwise
        let capacity = (2 * num_leaves).saturating_sub(1);
        PhyloTree {
            vertices: Vec::with_capacity(capacity),
            root_index: NO_ROOT_SET_INDEX,
            leaves: LeafIndex::with_capacity(num_leaves),
        }
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `sample_id` - Identifier of the sample; must be unique within the tree
    /// * `branch_length` - Length of incoming branch
    ///
    /// # Returns
    /// * The index of the newly created leaf vertex
    /// * [DuplicateSampleId] if another leaf already carries `sample_id`
    pub fn add_leaf(
        &mut self,
        sample_id: SampleId,
        branch_length: Option<BranchLength>,
    ) -> Result<VertexIndex, DuplicateSampleId> {
        let index = self.vertices.len();
        self.leaves.insert(sample_id.clone(), index)?;
        self.vertices
            .push(Vertex::new_leaf(index, sample_id, branch_length));
        Ok(index)
    }

    /// Adds an internal vertex to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Ordered indices of already added, parentless vertices
    /// * `name` - Optional clade name
    /// * `branch_length` - Length of incoming branch
    ///
    /// # Panics
    /// Panics if `children` is empty or contains an index out of bounds.
    pub fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        name: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        assert!(!children.is_empty(), "internal vertex needs at least one child");
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices
            .push(Vertex::new_internal(index, children, name, branch_length));
        index
    }

    /// Marks the vertex at `index` as root, completing construction.
    pub fn set_root(&mut self, index: VertexIndex) {
        self.root_index = index;
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the parent of the vertex at `index`, or `None` for the root.
    pub fn parent_of(&self, index: VertexIndex) -> Option<&Vertex> {
        self[index].parent().map(|parent| &self[parent])
    }

    /// Returns the children of the vertex at `index` in source order;
    /// empty iff the vertex is a leaf.
    pub fn children_of(&self, index: VertexIndex) -> impl ExactSizeIterator<Item = &Vertex> + '_ {
        self[index].children().iter().map(move |&child| &self[child])
    }

    /// Returns the leaf carrying the given sample identifier.
    pub fn leaf_by_id(&self, id: &str) -> Option<&Vertex> {
        self.leaves.vertex_of(id).map(|index| &self[index])
    }

    /// Returns the [LeafIndex] of this tree.
    pub fn leaf_index(&self) -> &LeafIndex {
        &self.leaves
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.leaves.num_leaves()
    }

    /// Returns the number of internal vertices in this tree, root included
    /// unless the tree is a single leaf.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges from the root to the deepest leaf.
    pub fn height(&self) -> usize {
        if !self.is_root_set() {
            return 0;
        }

        let mut max_depth = 0;
        let mut stack = vec![(self.root_index, 0)];
        while let Some((index, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &child in self[index].children() {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }

    /// Checks if all non-root vertices have branch lengths set.
    pub fn vertices_have_branch_lengths(&self) -> bool {
        self.vertices
            .iter()
            .filter(|v| v.index() != self.root_index)
            .all(Vertex::has_branch_length)
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is set, in bounds, and the root has no parent
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - Every non-root vertex has a parent listing it as child
    /// - Every vertex is reachable from the root
    /// - Leaves carry sample identifiers registered in the [LeafIndex]
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        // Check root index is set and within bounds
        if self.root_index >= self.vertices.len() {
            return false;
        }

        // Check root has no parent
        if self.vertices[self.root_index].has_parent() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            // Check vertex index matches its arena position
            if vertex.index() != index {
                return false;
            }

            // Check children point back to this vertex as parent
            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }

            // Check parent references
            if index != self.root_index {
                match vertex.parent() {
                    None => return false,
                    Some(parent) => {
                        if parent >= self.vertices.len()
                            || !self.vertices[parent].children().contains(&index)
                        {
                            return false;
                        }
                    }
                }
            }

            // Check leaves have registered identifiers
            if vertex.is_leaf() {
                match vertex.sample_id() {
                    Some(id) if self.leaves.vertex_of(id.as_str()) == Some(index) => {}
                    _ => return false,
                }
            }
        }

        // Check all vertices are reachable from the root
        self.pre_order_iter().count() == self.vertices.len()
    }
}

impl std::ops::Index<VertexIndex> for PhyloTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl PhyloTree {
    /// Returns an iterator over the tree in pre-order (parents before
    /// children, children in source order).
    ///
    /// This is the documented traversal order of the tree: restartable,
    /// finite, lazy, and including the root.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the leaves from left to right.
    pub fn leaves(&self) -> LeafIter<'_> {
        LeafIter {
            inner: self.pre_order_iter(),
        }
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        // Push children in reverse, so the leftmost is processed first
        self.stack.extend(vertex.children().iter().rev());

        Some(vertex)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            self.stack
                .extend(vertex.children().iter().rev().map(|&child| (child, false)));
        }
        None
    }
}

/// Iterator over the leaves of a tree, left to right.
pub struct LeafIter<'a> {
    inner: PreOrderIter<'a>,
}

impl<'a> Iterator for LeafIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|v| v.is_leaf())
    }
}
