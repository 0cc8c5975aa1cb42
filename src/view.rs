//! Request/response session over one tree and one metadata table.
//!
//! The tree and its layout are computed once (usually through a
//! [LayoutCache](crate::layout::LayoutCache)) and shared; every render
//! request recomputes bindings, colors and the render model from them.

use crate::layout::LaidOutTree;
use crate::metadata::{
    assign_colors, bind, default_selection, ConfigurationError, MetadataTable, Palette,
    DEFAULT_JOIN_COLUMN,
};
use crate::render::{assemble, assemble_uncategorized, RenderModel, RenderStyle};
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;

/// What the user currently asks to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Metadata column whose categories color the leaves
    pub column: String,
    /// Categories whose leaves get a marker
    pub selected: HashSet<String>,
}

impl RenderRequest {
    pub fn new<S, I>(column: &str, selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RenderRequest {
            column: column.to_string(),
            selected: selected.into_iter().map(Into::into).collect(),
        }
    }
}

/// A laid out tree bound to a metadata table.
///
/// # Example
/// ```
/// use cladeview::layout::LayoutCache;
/// use cladeview::metadata::MetadataTable;
/// use cladeview::view::{RenderRequest, TreeView};
///
/// let mut cache = LayoutCache::new();
/// let tree = cache.get_or_parse("(A,(B,C))").unwrap();
/// let table = MetadataTable::from_rows(
///     ["IGIB_id", "severity"],
///     [["A", "Mild"], ["B", "Severe"]],
/// ).unwrap();
/// let view = TreeView::new(tree, table);
///
/// let model = view.render(&RenderRequest::new("severity", ["Severe"]));
/// assert_eq!(model.markers.len(), 1);
///
/// // Unknown column: neutral rendering instead of an error
/// let model = view.render(&RenderRequest::new("country", ["IN"]));
/// assert_eq!(model.markers.len(), 3);
/// assert!(model.legend.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct TreeView {
    laid_out: Arc<LaidOutTree>,
    table: MetadataTable,
    join_column: String,
    palette: Palette,
    style: RenderStyle,
}

impl TreeView {
    /// Creates a view joining on [DEFAULT_JOIN_COLUMN] with the default
    /// palette and style.
    pub fn new(laid_out: Arc<LaidOutTree>, table: MetadataTable) -> Self {
        TreeView {
            laid_out,
            table,
            join_column: DEFAULT_JOIN_COLUMN.to_string(),
            palette: Palette::default(),
            style: RenderStyle::default(),
        }
    }

    pub fn with_join_column(mut self, column: &str) -> Self {
        self.join_column = column.to_string();
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn laid_out(&self) -> &LaidOutTree {
        &self.laid_out
    }

    pub fn table(&self) -> &MetadataTable {
        &self.table
    }

    /// Returns the sorted categories of `column` among bound leaves.
    pub fn categories(&self, column: &str) -> Result<Vec<String>, ConfigurationError> {
        let tree = self.laid_out.tree();
        bind(tree, &self.table, &self.join_column)?.categories(tree, column)
    }

    /// Returns a request for `column` with its first `n` categories selected.
    pub fn default_request(
        &self,
        column: &str,
        n: usize,
    ) -> Result<RenderRequest, ConfigurationError> {
        let categories = self.categories(column)?;
        Ok(RenderRequest::new(column, default_selection(&categories, n)))
    }

    /// Renders `request`, falling back to a neutral rendering if the
    /// coloring cannot be applied.
    pub fn render(&self, request: &RenderRequest) -> RenderModel {
        self.render_strict(request).unwrap_or_else(|err| {
            warn!("{err}; rendering without categories");
            self.render_uncategorized()
        })
    }

    /// Renders `request`.
    ///
    /// # Errors
    /// [ConfigurationError] if the join or the coloring column is missing.
    pub fn render_strict(
        &self,
        request: &RenderRequest,
    ) -> Result<RenderModel, ConfigurationError> {
        let tree = self.laid_out.tree();
        let bindings = bind(tree, &self.table, &self.join_column)?;
        let colors = assign_colors(tree, &bindings, &request.column, &self.palette)?;
        debug!(
            "Rendering '{}' with {} of {} categories selected",
            request.column,
            request.selected.len(),
            colors.len()
        );
        Ok(assemble(
            tree,
            self.laid_out.coordinates(),
            &bindings,
            &colors,
            &request.selected,
            self.style.clone(),
        ))
    }

    /// Renders every leaf in the fallback color, without legend.
    pub fn render_uncategorized(&self) -> RenderModel {
        assemble_uncategorized(
            self.laid_out.tree(),
            self.laid_out.coordinates(),
            self.style.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ColumnRole;

    fn view() -> TreeView {
        let laid_out = Arc::new(LaidOutTree::from_newick("((A,B),(C,D))").unwrap());
        let table = MetadataTable::from_rows(
            ["IGIB_id", "lineage", "clade"],
            [
                ["A", "B.1", "x"],
                ["B", "B.2", "y"],
                ["C", "B.1", "z"],
                ["D", "A.1", "x"],
            ],
        )
        .unwrap();
        TreeView::new(laid_out, table)
    }

    #[test]
    fn strict_render_reports_missing_columns() {
        let view = view();
        let request = RenderRequest::new("country", ["IN"]);
        assert_eq!(
            view.render_strict(&request).unwrap_err(),
            ConfigurationError::MissingColumn {
                column: "country".to_string(),
                role: ColumnRole::Color
            }
        );

        let view = view.with_join_column("id");
        let request = RenderRequest::new("clade", ["x"]);
        assert_eq!(
            view.render_strict(&request).unwrap_err(),
            ConfigurationError::missing_join_column("id")
        );
        assert_eq!(view.render(&request).markers.len(), 4);
    }

    #[test]
    fn default_request_takes_sorted_prefix() {
        let view = view();
        let request = view.default_request("lineage", 2).unwrap();
        assert_eq!(
            request.selected,
            HashSet::from(["A.1".to_string(), "B.1".to_string()])
        );
        let model = view.render(&request);
        let labels: Vec<_> = model.markers.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["A", "C", "D"]);
    }

    #[test]
    fn switching_columns_reassigns_colors() {
        let view = view();
        let by_lineage = view.render(&RenderRequest::new("lineage", ["B.1", "B.2", "A.1"]));
        let by_clade = view.render(&RenderRequest::new("clade", ["x", "y", "z"]));
        assert_eq!(by_lineage.legend.len(), 3);
        assert_eq!(by_clade.legend.title, "clade");
        assert_eq!(by_clade.markers[3].color, by_clade.markers[0].color);
        assert_eq!(by_lineage.segments, by_clade.segments);
    }
}
