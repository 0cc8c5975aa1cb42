//! Joining metadata rows to tree leaves.

use crate::metadata::error::ConfigurationError;
use crate::metadata::table::{MetadataTable, Record};
use crate::model::{PhyloTree, VertexIndex};
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// Metadata rows matched to the leaves of one tree.
///
/// Leaves without a row and rows without a leaf are both normal: the first
/// are rendered without a marker, the second are ignored.
#[derive(Debug, Clone)]
pub struct Bindings<'a> {
    table: &'a MetadataTable,
    /// Row per vertex, `None` for internal vertices and unmatched leaves
    rows: Vec<Option<usize>>,
    num_bound: usize,
}

/// Matches each leaf of `tree` to the row whose `join_column` equals the
/// leaf's sample identifier exactly.
///
/// If several rows carry the same identifier, the first one wins.
///
/// # Errors
/// [ConfigurationError::MissingColumn] if `join_column` does not exist.
///
/// # Example
/// ```
/// use cladeview::metadata::{bind, MetadataTable};
/// use cladeview::parse_newick_str;
///
/// let tree = parse_newick_str("((A,B),C)").unwrap();
/// let table = MetadataTable::from_rows(
///     ["IGIB_id", "clade"],
///     [["A", "x"], ["B", "y"], ["D", "x"]],
/// ).unwrap();
///
/// let bindings = bind(&tree, &table, "IGIB_id").unwrap();
/// assert_eq!(bindings.num_bound(), 2);
/// let c = tree.leaf_by_id("C").unwrap().index();
/// assert!(bindings.record(c).is_none());
/// ```
pub fn bind<'a>(
    tree: &PhyloTree,
    table: &'a MetadataTable,
    join_column: &str,
) -> Result<Bindings<'a>, ConfigurationError> {
    let join = table.require_column(join_column, ConfigurationError::missing_join_column)?;

    let mut row_of_id: HashMap<&str, usize> = HashMap::with_capacity(table.num_rows());
    let mut num_duplicates = 0;
    for record in table.rows() {
        if let Some(id) = record.get_at(join) {
            if row_of_id.contains_key(id) {
                num_duplicates += 1;
            } else {
                row_of_id.insert(id, record.index());
            }
        }
    }

    let mut rows = vec![None; tree.num_vertices()];
    let mut num_bound = 0;
    for leaf in tree.leaves() {
        let Some(id) = leaf.sample_id() else { continue };
        if let Some(&row) = row_of_id.get(id.as_str()) {
            rows[leaf.index()] = Some(row);
            num_bound += 1;
        }
    }

    debug!(
        "Bound {num_bound} of {} leaves on '{join_column}'; {} rows without leaf, {num_duplicates} duplicate ids",
        tree.num_leaves(),
        row_of_id.len() - num_bound,
    );

    Ok(Bindings {
        table,
        rows,
        num_bound,
    })
}

impl<'a> Bindings<'a> {
    /// Returns the table the bindings refer to.
    pub fn table(&self) -> &'a MetadataTable {
        self.table
    }

    /// Returns the row bound to `vertex`, if any.
    pub fn record(&self, vertex: VertexIndex) -> Option<Record<'a>> {
        self.rows
            .get(vertex)
            .copied()
            .flatten()
            .map(|row| self.table.row(row))
    }

    /// Returns the value of column position `column` for `vertex`.
    ///
    /// `None` if the leaf is unbound or the value is missing.
    pub fn value(&self, vertex: VertexIndex, column: usize) -> Option<&'a str> {
        self.record(vertex).and_then(|record| record.get_at(column))
    }

    /// Returns the number of leaves with a row.
    pub fn num_bound(&self) -> usize {
        self.num_bound
    }

    /// Resolves a categorical column by name.
    ///
    /// # Errors
    /// [ConfigurationError::MissingColumn] if the table has no such column.
    pub fn column(&self, name: &str) -> Result<usize, ConfigurationError> {
        self.table
            .require_column(name, ConfigurationError::missing_color_column)
    }

    /// Returns the distinct non-missing values of `column` over all bound
    /// leaves, sorted.
    ///
    /// These are the categories a user can select for display.
    pub fn categories(
        &self,
        tree: &PhyloTree,
        column: &str,
    ) -> Result<Vec<String>, ConfigurationError> {
        let column = self.column(column)?;
        let distinct: BTreeSet<&str> = tree
            .leaves()
            .filter_map(|leaf| self.value(leaf.index(), column))
            .collect();
        Ok(distinct.into_iter().map(str::to_string).collect())
    }
}

/// Initial selection when a user has not chosen any categories yet: the
/// first `n` of the sorted categories.
pub fn default_selection(categories: &[String], n: usize) -> Vec<String> {
    categories.iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_newick_str;

    fn table() -> MetadataTable {
        MetadataTable::from_rows(
            ["IGIB_id", "serotype"],
            [
                ["B", "DENV-2"],
                ["A", "DENV-1"],
                ["B", "DENV-4"],
                ["E", ""],
                ["Z", "DENV-3"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn first_row_wins_on_duplicate_ids() {
        let tree = parse_newick_str("(A,(B,C,D)clade,E)").unwrap();
        let table = table();
        let bindings = bind(&tree, &table, "IGIB_id").unwrap();
        let serotype = bindings.column("serotype").unwrap();

        let b = tree.leaf_by_id("B").unwrap().index();
        assert_eq!(bindings.value(b, serotype), Some("DENV-2"));
        assert_eq!(bindings.record(b).unwrap().index(), 0);
        assert_eq!(bindings.num_bound(), 3);
    }

    #[test]
    fn internal_vertices_are_never_bound() {
        let tree = parse_newick_str("(A,(B,C,D)B,E)").unwrap();
        let table = table();
        let bindings = bind(&tree, &table, "IGIB_id").unwrap();
        assert!(bindings.record(tree.root_index()).is_none());
        let clade = tree.leaf_by_id("C").unwrap().parent().unwrap();
        assert!(bindings.record(clade).is_none());
    }

    #[test]
    fn missing_join_column() {
        let tree = parse_newick_str("(A,B)").unwrap();
        let table = table();
        let err = bind(&tree, &table, "id").unwrap_err();
        assert_eq!(err, ConfigurationError::missing_join_column("id"));
    }

    #[test]
    fn categories_cover_bound_leaves_only() {
        let tree = parse_newick_str("(A,(B,C,D)clade,E)").unwrap();
        let table = table();
        let bindings = bind(&tree, &table, "IGIB_id").unwrap();
        let categories = bindings.categories(&tree, "serotype").unwrap();
        assert_eq!(categories, ["DENV-1", "DENV-2"]);
        assert_eq!(
            bindings.categories(&tree, "country").unwrap_err(),
            ConfigurationError::missing_color_column("country")
        );
    }

    #[test]
    fn default_selection_takes_prefix() {
        let categories: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(default_selection(&categories, 2), ["a", "b"]);
        assert_eq!(default_selection(&categories, 5), categories);
    }
}
