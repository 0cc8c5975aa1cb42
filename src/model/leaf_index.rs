//! Leaf index module: unique mapping between sample identifiers and leaves.
//!
//! - [LeafIndex]: lookup of leaf vertices by [SampleId], in left-to-right leaf order.

use crate::model::sample_id::SampleId;
use crate::model::tree::VertexIndex;
use std::collections::HashMap;
use std::fmt;

// =#========================================================================#=
// LEAF INDEX
// =#========================================================================#=
/// Maps each [SampleId] of a tree to its leaf vertex and back.
///
/// Leaf labels double as join keys for metadata, so they must be unique
/// within a tree. Inserting an identifier twice is rejected, which the
/// Newick parser turns into a parsing error.
///
/// Identifiers are kept in insertion order. The parser inserts leaves as it
/// reads them, so this is the left-to-right order of the leaves in the
/// source text.
///
/// # Example
/// ```
/// use cladeview::model::{LeafIndex, SampleId};
///
/// let mut leaves = LeafIndex::with_capacity(2);
/// leaves.insert(SampleId::new("A").unwrap(), 0).unwrap();
/// leaves.insert(SampleId::new("B").unwrap(), 1).unwrap();
/// assert!(leaves.insert(SampleId::new("A").unwrap(), 2).is_err());
///
/// assert_eq!(leaves.vertex_of("B"), Some(1));
/// assert_eq!(leaves.num_leaves(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeafIndex {
    /// Identifiers in left-to-right leaf order
    ids: Vec<SampleId>,
    /// Leaf vertex for each identifier
    vertices: HashMap<SampleId, VertexIndex>,
}

impl LeafIndex {
    /// Creates an empty [LeafIndex] with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `num_leaves` - Expected number of leaves
    pub fn with_capacity(num_leaves: usize) -> Self {
        LeafIndex {
            ids: Vec::with_capacity(num_leaves),
            vertices: HashMap::with_capacity(num_leaves),
        }
    }

    /// Registers a leaf.
    ///
    /// # Returns
    /// * `Ok(())` if the identifier was new
    /// * `Err(DuplicateSampleId)` carrying the vertex already registered under it
    pub fn insert(&mut self, id: SampleId, vertex: VertexIndex) -> Result<(), DuplicateSampleId> {
        if let Some(&existing) = self.vertices.get(&id) {
            return Err(DuplicateSampleId { id, existing });
        }
        self.ids.push(id.clone());
        self.vertices.insert(id, vertex);
        Ok(())
    }

    /// Returns the leaf vertex carrying the given identifier.
    pub fn vertex_of(&self, id: &str) -> Option<VertexIndex> {
        self.vertices.get(id).copied()
    }

    /// Returns whether a leaf carries the given identifier.
    pub fn contains(&self, id: &str) -> bool {
        self.vertices.contains_key(id)
    }

    /// Returns the identifiers in insertion order.
    pub fn ids(&self) -> &[SampleId] {
        &self.ids
    }

    /// Returns the number of registered leaves.
    pub fn num_leaves(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if no leaf has been registered.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Error returned when a [SampleId] is registered twice.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateSampleId {
    /// The identifier that was seen twice
    pub id: SampleId,
    /// Vertex registered first under this identifier
    pub existing: VertexIndex,
}

impl fmt::Display for DuplicateSampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leaf label '{}' already used by vertex {}", self.id, self.existing)
    }
}

impl std::error::Error for DuplicateSampleId {}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SampleId {
        SampleId::new(s).unwrap()
    }

    #[test]
    fn keeps_insertion_order() {
        let mut index = LeafIndex::with_capacity(3);
        index.insert(id("Kea"), 4).unwrap();
        index.insert(id("Kaka"), 2).unwrap();
        index.insert(id("Kakapo"), 9).unwrap();

        let ids: Vec<&str> = index.ids().iter().map(SampleId::as_str).collect();
        assert_eq!(ids, vec!["Kea", "Kaka", "Kakapo"]);
        assert_eq!(index.vertex_of("Kakapo"), Some(9));
        assert_eq!(index.vertex_of("Takahe"), None);
    }

    #[test]
    fn duplicate_reports_first_vertex() {
        let mut index = LeafIndex::default();
        index.insert(id("Weka"), 0).unwrap();
        let err = index.insert(id("Weka"), 3).unwrap_err();
        assert_eq!(err.existing, 0);
        assert_eq!(err.id.as_str(), "Weka");
        assert_eq!(index.num_leaves(), 1);
    }
}
