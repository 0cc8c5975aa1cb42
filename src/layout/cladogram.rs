//! Rectangular cladogram coordinates.

use crate::model::tree::{PhyloTree, VertexIndex};
use serde::Serialize;

/// A position in layout space: `x` is the depth, `y` the leaf order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Size of a layout, used for axis ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Extent {
    /// Largest depth of any vertex
    pub max_depth: usize,
    /// Number of leaves, i.e. one more than the largest leaf order
    pub num_leaves: usize,
}

// =#========================================================================#=
// COORDINATES
// =#========================================================================#=
/// Depth and order of every vertex of a tree, indexed by [VertexIndex].
///
/// # Invariants
/// - `depth(child) == depth(parent) + 1` and the root has depth 0
/// - leaf orders are exactly `0..num_leaves`, left to right
/// - the order of an internal vertex is the mean of its children's orders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinates {
    depth: Vec<usize>,
    order: Vec<f64>,
    num_leaves: usize,
}

impl Coordinates {
    /// Returns the number of edges between the root and `vertex`.
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    pub fn depth(&self, vertex: VertexIndex) -> usize {
        self.depth[vertex]
    }

    /// Returns the vertical position of `vertex`.
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    pub fn order(&self, vertex: VertexIndex) -> f64 {
        self.order[vertex]
    }

    /// Returns `(depth, order)` of `vertex` as a [Point].
    pub fn point(&self, vertex: VertexIndex) -> Point {
        Point::new(self.depth[vertex] as f64, self.order[vertex])
    }

    /// Returns the number of vertices covered.
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    /// Returns `true` if no vertex is covered.
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Returns the largest depth and the number of leaves.
    pub fn extent(&self) -> Extent {
        Extent {
            max_depth: self.depth.iter().copied().max().unwrap_or(0),
            num_leaves: self.num_leaves,
        }
    }
}

/// Computes the rectangular cladogram layout of `tree`.
///
/// Single post-order pass over an explicit stack: children are visited in
/// their stored order, each leaf takes the next order from a counter local
/// to this call, and each internal vertex takes the mean order of its
/// children once they are all placed. Depth is the generation count from
/// the root. Branch lengths are ignored.
///
/// The result is a pure function of the topology, so it can be cached
/// alongside the tree (see [LayoutCache](crate::layout::LayoutCache)).
///
/// # Example
/// ```
/// use cladeview::layout::layout;
/// use cladeview::parse_newick_str;
///
/// let tree = parse_newick_str("((A,B),C);").unwrap();
/// let coordinates = layout(&tree);
///
/// let ab = tree.parent_of(tree.leaf_by_id("A").unwrap().index()).unwrap();
/// assert_eq!(coordinates.order(ab.index()), 0.5);
/// assert_eq!(coordinates.order(tree.root_index()), 1.25);
/// assert_eq!(coordinates.depth(ab.index()), 1);
/// ```
pub fn layout(tree: &PhyloTree) -> Coordinates {
    let num_vertices = tree.num_vertices();
    let mut depth = vec![0; num_vertices];
    let mut order = vec![0.0; num_vertices];
    let mut next_leaf_order = 0;

    if tree.is_root_set() {
        // (vertex, depth, children_placed)
        let mut stack: Vec<(VertexIndex, usize, bool)> = vec![(tree.root_index(), 0, false)];

        while let Some((index, vertex_depth, children_placed)) = stack.pop() {
            let vertex = &tree[index];
            depth[index] = vertex_depth;

            if vertex.is_leaf() {
                order[index] = next_leaf_order as f64;
                next_leaf_order += 1;
            } else if children_placed {
                let children = vertex.children();
                let sum: f64 = children.iter().map(|&child| order[child]).sum();
                order[index] = sum / children.len() as f64;
            } else {
                stack.push((index, vertex_depth, true));
                // Push children in reverse, so the leftmost is placed first
                stack.extend(
                    vertex
                        .children()
                        .iter()
                        .rev()
                        .map(|&child| (child, vertex_depth + 1, false)),
                );
            }
        }
    }

    Coordinates {
        depth,
        order,
        num_leaves: next_leaf_order,
    }
}
