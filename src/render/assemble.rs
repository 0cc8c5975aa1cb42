//! Turning a laid out, annotated tree into a [RenderModel].

use crate::layout::{Coordinates, Point};
use crate::metadata::{Bindings, ColorMap, FALLBACK_COLOR};
use crate::model::PhyloTree;
use crate::render::legend::Legend;
use crate::render::model::{AxisMeta, Marker, RenderModel, Segment, SegmentKind};
use crate::render::style::RenderStyle;
use log::debug;
use std::collections::HashSet;

/// Builds the render model for one coloring column and category filter.
///
/// Every non-root vertex contributes a vertical and a horizontal segment,
/// regardless of filtering. A leaf gets a marker only if it is bound and
/// its value in `colors.column()` is in `selected`. The legend is derived
/// from the final marker list.
///
/// # Example
/// ```
/// use cladeview::layout::layout;
/// use cladeview::metadata::{assign_colors, bind, MetadataTable, Palette};
/// use cladeview::render::{assemble, RenderStyle};
/// use cladeview::parse_newick_str;
/// use std::collections::HashSet;
///
/// let tree = parse_newick_str("(A:0.1,(B:0.2,C:0.3):0.15):0.0").unwrap();
/// let coordinates = layout(&tree);
/// let table = MetadataTable::from_rows(
///     ["IGIB_id", "severity"],
///     [["A", "Mild"], ["B", "Severe"], ["C", "Severe"]],
/// ).unwrap();
/// let bindings = bind(&tree, &table, "IGIB_id").unwrap();
/// let colors = assign_colors(&tree, &bindings, "severity", &Palette::default()).unwrap();
/// let selected: HashSet<String> = ["Mild".to_string(), "Severe".to_string()].into();
///
/// let model = assemble(&tree, &coordinates, &bindings, &colors, &selected, RenderStyle::default());
/// assert_eq!(model.markers.len(), 3);
/// assert_eq!(model.legend.len(), 2);
/// assert_eq!(model.segments.len(), 4);
/// ```
pub fn assemble(
    tree: &PhyloTree,
    coordinates: &Coordinates,
    bindings: &Bindings<'_>,
    colors: &ColorMap,
    selected: &HashSet<String>,
    style: RenderStyle,
) -> RenderModel {
    let column = colors.column_index();

    let mut markers = Vec::new();
    for leaf in tree.leaves() {
        let Some(id) = leaf.sample_id() else { continue };
        let Some(value) = bindings.value(leaf.index(), column) else {
            continue;
        };
        if !selected.contains(value) {
            continue;
        }
        markers.push(Marker {
            vertex: leaf.index(),
            position: coordinates.point(leaf.index()),
            label: id.to_string(),
            tooltip: format!("{id}\n{}: {value}", colors.column()),
            category: Some(value.to_string()),
            color: colors.color_for(value).clone(),
            show_legend: false,
        });
    }

    let legend = Legend::from_markers(colors.column(), &markers);
    for entry in &legend.entries {
        markers[entry.marker].show_legend = true;
    }

    debug!(
        "Assembled {} of {} leaf markers in {} categories",
        markers.len(),
        tree.num_leaves(),
        legend.len()
    );

    RenderModel {
        segments: branch_segments(tree, coordinates),
        markers,
        legend,
        axes: AxisMeta::for_extent(coordinates.extent()),
        style,
    }
}

/// Builds a neutral render model: every leaf gets a marker in the fallback
/// color, labelled with its identifier, and the legend is empty.
///
/// Used when the requested coloring cannot be applied.
pub fn assemble_uncategorized(
    tree: &PhyloTree,
    coordinates: &Coordinates,
    style: RenderStyle,
) -> RenderModel {
    let markers = tree
        .leaves()
        .filter_map(|leaf| {
            let id = leaf.sample_id()?;
            Some(Marker {
                vertex: leaf.index(),
                position: coordinates.point(leaf.index()),
                label: id.to_string(),
                tooltip: id.to_string(),
                category: None,
                color: FALLBACK_COLOR,
                show_legend: false,
            })
        })
        .collect();

    RenderModel {
        segments: branch_segments(tree, coordinates),
        markers,
        legend: Legend::default(),
        axes: AxisMeta::for_extent(coordinates.extent()),
        style,
    }
}

/// Two-segment elbow for every non-root vertex, in pre-order.
fn branch_segments(tree: &PhyloTree, coordinates: &Coordinates) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(2 * tree.num_vertices().saturating_sub(1));
    for vertex in tree.pre_order_iter() {
        let Some(parent) = vertex.parent() else { continue };
        let parent_point = coordinates.point(parent);
        let point = coordinates.point(vertex.index());
        let elbow = Point::new(parent_point.x, point.y);

        segments.push(Segment {
            vertex: vertex.index(),
            kind: SegmentKind::Vertical,
            from: parent_point,
            to: elbow,
        });
        segments.push(Segment {
            vertex: vertex.index(),
            kind: SegmentKind::Horizontal,
            from: elbow,
            to: point,
        });
    }
    segments
}
