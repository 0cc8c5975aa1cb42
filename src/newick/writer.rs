//! Newick serialization of a [PhyloTree].

use crate::model::tree::{PhyloTree, VertexIndex};
use crate::model::vertex::Vertex;
use crate::parser::utils::escape_label;

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Returns the Newick representation of a tree with closing semicolon.
///
/// Children keep their order, internal vertex names and branch lengths are
/// written when present, and labels are escaped so that parsing the output
/// yields the same sample identifiers.
///
/// # Example
/// ```
/// use cladeview::newick::to_newick;
/// use cladeview::parse_newick_str;
///
/// let tree = parse_newick_str("(A:1,('B 2':0.5,C)clade)").unwrap();
/// assert_eq!(to_newick(&tree), "(A:1,('B 2':0.5,C)clade);");
/// ```
pub fn to_newick(tree: &PhyloTree) -> String {
    // Helper for label and branch length of a finished vertex
    fn push_suffix(newick: &mut String, vertex: &Vertex) {
        if let Some(label) = vertex.label() {
            newick.push_str(&escape_label(label));
        }
        if let Some(branch_length) = vertex.branch_length() {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    if !tree.is_root_set() {
        return newick;
    }

    // (vertex, next child to visit)
    let mut stack: Vec<(VertexIndex, usize)> = vec![(tree.root_index(), 0)];
    while let Some((index, next_child)) = stack.pop() {
        let vertex = &tree[index];
        let children = vertex.children();

        if children.is_empty() {
            push_suffix(&mut newick, vertex);
        } else if next_child < children.len() {
            newick.push(if next_child == 0 { '(' } else { ',' });
            stack.push((index, next_child + 1));
            stack.push((children[next_child], 0));
        } else {
            newick.push(')');
            push_suffix(&mut newick, vertex);
        }
    }

    newick.push(';');
    newick
}

/// Estimates the length of the Newick string for the given tree.
fn estimate_newick_len(tree: &PhyloTree) -> usize {
    // Each vertex: a '(' / ',' / ')' on average
    const STRUCTURE_CHARS: usize = 2;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let label_len: usize = tree
        .leaf_index()
        .ids()
        .iter()
        .map(|id| id.as_str().len())
        .sum();
    let branch_len = if tree.vertices_have_branch_lengths() {
        tree.num_vertices() * BRANCH_LENGTH_CHARS
    } else {
        0
    };

    tree.num_vertices() * STRUCTURE_CHARS + label_len + branch_len + BUFFER_CHARS
}
