//! Memoization of parse + layout results by source text.

use crate::layout::cladogram::{layout, Coordinates};
use crate::model::PhyloTree;
use crate::newick;
use crate::parser::ParsingError;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// A parsed tree together with its cladogram layout.
///
/// Both parts are immutable; interactions that only change the coloring
/// column or the category filter reuse them as they are.
#[derive(Debug, Clone)]
pub struct LaidOutTree {
    tree: PhyloTree,
    coordinates: Coordinates,
}

impl LaidOutTree {
    /// Lays out an already parsed tree.
    pub fn new(tree: PhyloTree) -> Self {
        let coordinates = layout(&tree);
        LaidOutTree { tree, coordinates }
    }

    /// Parses `newick` and lays out the resulting tree.
    pub fn from_newick(newick: &str) -> Result<Self, ParsingError> {
        newick::parse_str(newick).map(Self::new)
    }

    pub fn tree(&self) -> &PhyloTree {
        &self.tree
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }
}

// =#========================================================================#=
// LAYOUT CACHE
// =#========================================================================#=
/// Cache of [LaidOutTree]s keyed by their Newick source text.
///
/// Parsing and layout are the only steps proportional to tree size, and both
/// are pure functions of the source text. A session keeps one cache and
/// asks it for the tree on every interaction; only the first request for a
/// text does the work. Failed parses are not cached.
///
/// # Example
/// ```
/// use cladeview::layout::LayoutCache;
/// use std::sync::Arc;
///
/// let mut cache = LayoutCache::new();
/// let first = cache.get_or_parse("((A,B),C);").unwrap();
/// let second = cache.get_or_parse("((A,B),C);").unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LayoutCache {
    entries: HashMap<String, Arc<LaidOutTree>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the laid out tree for `newick`, parsing it on first request.
    ///
    /// # Errors
    /// Returns the [ParsingError] if `newick` is not a valid tree; nothing
    /// is stored in that case.
    pub fn get_or_parse(&mut self, newick: &str) -> Result<Arc<LaidOutTree>, ParsingError> {
        if let Some(entry) = self.entries.get(newick) {
            return Ok(Arc::clone(entry));
        }

        let laid_out = Arc::new(LaidOutTree::from_newick(newick)?);
        debug!(
            "Cached layout for tree with {} vertices",
            laid_out.tree().num_vertices()
        );
        self.entries.insert(newick.to_string(), Arc::clone(&laid_out));
        Ok(laid_out)
    }

    /// Returns the number of cached trees.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all cached trees.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_parse_is_not_cached() {
        let mut cache = LayoutCache::new();
        assert!(cache.get_or_parse("((A,B)").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn different_texts_get_different_entries() {
        let mut cache = LayoutCache::new();
        let a = cache.get_or_parse("(A,B);").unwrap();
        let b = cache.get_or_parse("(A,B,C);").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
        assert_eq!(b.coordinates().extent().num_leaves, 3);

        cache.clear();
        assert!(cache.is_empty());
    }
}
