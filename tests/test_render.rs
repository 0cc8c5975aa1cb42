use cladeview::layout::{layout, Point};
use cladeview::metadata::{assign_colors, bind, Color, MetadataTable, Palette, FALLBACK_COLOR};
use cladeview::model::PhyloTree;
use cladeview::parse_newick_str;
use cladeview::render::{assemble, RenderModel, RenderStyle, SegmentKind};
use std::collections::HashSet;

const SCENARIO_TREE: &str = "(A:0.1,(B:0.2,C:0.3):0.15):0.0";

fn severity_table(rows: &[[&str; 2]]) -> MetadataTable {
    MetadataTable::from_rows(["IGIB_id", "severity"], rows.iter().copied()).unwrap()
}

fn selection(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn render(tree: &PhyloTree, table: &MetadataTable, selected: &[&str]) -> RenderModel {
    let coordinates = layout(tree);
    let bindings = bind(tree, table, "IGIB_id").unwrap();
    let colors = assign_colors(tree, &bindings, "severity", &Palette::default()).unwrap();
    assemble(
        tree,
        &coordinates,
        &bindings,
        &colors,
        &selection(selected),
        RenderStyle::default(),
    )
}

fn marker_labels(model: &RenderModel) -> Vec<&str> {
    model.markers.iter().map(|m| m.label.as_str()).collect()
}

#[test]
fn test_severity_scenario() {
    let tree = parse_newick_str(SCENARIO_TREE).unwrap();
    let table = severity_table(&[["A", "Mild"], ["B", "Severe"], ["C", "Severe"]]);
    let model = render(&tree, &table, &["Mild", "Severe"]);

    assert_eq!(model.markers.len(), 3);
    assert_eq!(model.segments.len(), 4);

    let legend: Vec<_> = model
        .legend
        .entries
        .iter()
        .map(|e| (e.category.as_str(), e.color.as_str()))
        .collect();
    assert_eq!(legend, [("Mild", "blue"), ("Severe", "green")]);
    assert_eq!(model.legend.title, "severity");

    // B owns the Severe entry, C does not
    let owners: Vec<_> = model.legend_markers().map(|m| m.label.as_str()).collect();
    assert_eq!(owners, ["A", "B"]);

    let c = &model.markers[2];
    assert_eq!(c.position, Point::new(2.0, 2.0));
    assert_eq!(c.tooltip, "C\nseverity: Severe");
    assert_eq!(c.category.as_deref(), Some("Severe"));
}

#[test]
fn test_metadata_row_without_leaf_is_ignored() {
    let tree = parse_newick_str(SCENARIO_TREE).unwrap();
    let base = severity_table(&[["A", "Mild"], ["B", "Severe"], ["C", "Severe"]]);
    let extra = severity_table(&[
        ["A", "Mild"],
        ["D", "Critical"],
        ["B", "Severe"],
        ["C", "Severe"],
    ]);

    let all = ["Mild", "Severe", "Critical"];
    assert_eq!(render(&tree, &base, &all), render(&tree, &extra, &all));
}

#[test]
fn test_leaf_without_metadata_gets_no_marker() {
    let tree = parse_newick_str(SCENARIO_TREE).unwrap();
    let table = severity_table(&[["A", "Mild"], ["B", "Severe"]]);
    let model = render(&tree, &table, &["Mild", "Severe"]);

    assert_eq!(marker_labels(&model), ["A", "B"]);
    let c = tree.leaf_by_id("C").unwrap().index();
    let c_segments: Vec<_> = model.segments.iter().filter(|s| s.vertex == c).collect();
    assert_eq!(c_segments.len(), 2);
    assert_eq!(c_segments[1].kind, SegmentKind::Horizontal);
    assert_eq!(c_segments[1].to, Point::new(2.0, 2.0));
}

#[test]
fn test_missing_value_gets_no_marker() {
    let tree = parse_newick_str(SCENARIO_TREE).unwrap();
    let table = severity_table(&[["A", "Mild"], ["B", ""], ["C", "Severe"]]);
    let model = render(&tree, &table, &["Mild", "Severe"]);
    assert_eq!(marker_labels(&model), ["A", "C"]);
}

#[test]
fn test_empty_selection_renders_branches_only() {
    let tree = parse_newick_str(SCENARIO_TREE).unwrap();
    let table = severity_table(&[["A", "Mild"], ["B", "Severe"], ["C", "Severe"]]);
    let model = render(&tree, &table, &[]);

    assert!(model.markers.is_empty());
    assert!(model.legend.is_empty());
    assert_eq!(model.segments.len(), 4);
}

#[test]
fn test_filter_keeps_colors_of_unselected_categories_stable() {
    let tree = parse_newick_str("(A,B,C,D)").unwrap();
    let table = severity_table(&[["A", "Mild"], ["B", "Severe"], ["C", "Moderate"], ["D", "Mild"]]);

    let all = render(&tree, &table, &["Mild", "Severe", "Moderate"]);
    let some = render(&tree, &table, &["Moderate"]);

    assert_eq!(marker_labels(&some), ["C"]);
    assert_eq!(some.markers[0].color, all.markers[2].color);
    assert_eq!(some.markers[0].color.as_str(), "red");
    assert!(some.markers[0].show_legend);
    assert_eq!(some.legend.len(), 1);
}

#[test]
fn test_custom_palette_wraps() {
    let tree = parse_newick_str("(A,B,C)").unwrap();
    let table = severity_table(&[["A", "x"], ["B", "y"], ["C", "z"]]);
    let palette = Palette::new(vec![Color::new("#111111")], FALLBACK_COLOR).unwrap();
    let bindings = bind(&tree, &table, "IGIB_id").unwrap();
    let colors = assign_colors(&tree, &bindings, "severity", &palette).unwrap();
    assert!(colors.entries().all(|(_, c)| c.as_str() == "#111111"));
}

#[test]
fn test_axes_and_style() {
    let tree = parse_newick_str("((A,B),(C,(D,E)))").unwrap();
    let table = severity_table(&[]);
    let model = render(&tree, &table, &[]);

    assert_eq!(model.axes.x_title, "Tree Depth");
    assert_eq!(model.axes.y_title, "Leaf Nodes");
    assert!(!model.axes.y_ticks_visible);
    assert_eq!(model.axes.x_range, (0.0, 3.0));
    assert_eq!(model.axes.y_range, (0.0, 4.0));
    assert_eq!(model.style, RenderStyle::default());
    assert_eq!(model.style.width, 1500);
    assert_eq!(model.style.height, 900);
}

#[test]
fn test_render_model_serializes() {
    let tree = parse_newick_str(SCENARIO_TREE).unwrap();
    let table = severity_table(&[["A", "Mild"], ["B", "Severe"], ["C", "Severe"]]);
    let model = render(&tree, &table, &["Mild"]);

    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["segments"].as_array().unwrap().len(), 4);
    assert_eq!(json["segments"][0]["kind"], "vertical");
    assert_eq!(json["markers"][0]["label"], "A");
    assert_eq!(json["markers"][0]["color"], "blue");
    assert_eq!(json["markers"][0]["position"]["y"], 0.0);
    assert_eq!(json["legend"]["entries"][0]["category"], "Mild");
    assert_eq!(json["style"]["marker_size"], 6.0);
}
