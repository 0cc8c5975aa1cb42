use cladeview::layout::LayoutCache;
use cladeview::metadata::{bind, ConfigurationError, MetadataError, MetadataTable, Palette};
use cladeview::parse_newick_str;
use cladeview::view::{RenderRequest, TreeView};
use std::io::Write;
use std::sync::Arc;

const METADATA_CSV: &str = "\
IGIB_id , Collection date ,Clade,Lineage
IGIB_001,2021-04-02,21A,B.1.617.2
IGIB_002,2021-04-09,20A,B.1.1.7
IGIB_003,2021-05-11,21A,
IGIB_999,2021-06-01,19B,A.1
";

const TREE: &str = "((IGIB_001:0.01,IGIB_002:0.02):0.005,(IGIB_003:0.01,IGIB_004:0.03):0.002);";

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_csv_from_path() {
    let file = write_csv(METADATA_CSV);
    let table = MetadataTable::from_path(file.path()).unwrap();

    assert_eq!(table.columns(), ["IGIB_id", "Collection date", "Clade", "Lineage"]);
    assert_eq!(table.num_rows(), 4);
    assert_eq!(table.row(2).get("Lineage"), None);
    assert_eq!(table.row(0).get("Lineage"), Some("B.1.617.2"));
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = MetadataTable::from_path(dir.path().join("nope.csv"));
    assert!(matches!(result, Err(MetadataError::Csv(_))));
}

#[test]
fn test_join_is_exact() {
    let tree = parse_newick_str("(IGIB_001,igib_002,' IGIB_003')").unwrap();
    let table = MetadataTable::from_reader(METADATA_CSV.as_bytes()).unwrap();
    let bindings = bind(&tree, &table, "IGIB_id").unwrap();
    assert_eq!(bindings.num_bound(), 1);
}

#[test]
fn test_categories_and_default_selection() {
    let laid_out = LayoutCache::new().get_or_parse(TREE).unwrap();
    let table = MetadataTable::from_reader(METADATA_CSV.as_bytes()).unwrap();
    let view = TreeView::new(laid_out, table);

    // IGIB_999 is not in the tree, so 19B is not offered
    assert_eq!(view.categories("Clade").unwrap(), ["20A", "21A"]);
    assert_eq!(view.categories("Lineage").unwrap(), ["B.1.1.7", "B.1.617.2"]);

    let request = view.default_request("Clade", 1).unwrap();
    let model = view.render(&request);
    let labels: Vec<_> = model.markers.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, ["IGIB_002"]);
}

#[test]
fn test_view_fallback_on_missing_join_column() {
    let laid_out = LayoutCache::new().get_or_parse(TREE).unwrap();
    let table = MetadataTable::from_reader(METADATA_CSV.as_bytes()).unwrap();
    let view = TreeView::new(Arc::clone(&laid_out), table).with_join_column("sample");

    let request = RenderRequest::new("Clade", ["21A"]);
    assert!(matches!(
        view.render_strict(&request),
        Err(ConfigurationError::MissingColumn { .. })
    ));

    let model = view.render(&request);
    assert_eq!(model.markers.len(), 4);
    assert!(model.markers.iter().all(|m| m.category.is_none()));
    assert!(model.legend.is_empty());
    assert_eq!(model.segments.len(), 2 * (laid_out.tree().num_vertices() - 1));
}

#[test]
fn test_view_reuses_cached_layout() {
    let mut cache = LayoutCache::new();
    let table = MetadataTable::from_reader(METADATA_CSV.as_bytes()).unwrap();

    let first = TreeView::new(cache.get_or_parse(TREE).unwrap(), table.clone());
    let second = TreeView::new(cache.get_or_parse(TREE).unwrap(), table);
    assert!(std::ptr::eq(first.laid_out(), second.laid_out()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_palette_from_style_json() {
    let palette: Palette =
        serde_json::from_str(r#"{"colors": ["navy", "gold"], "fallback": "silver"}"#).unwrap();
    let laid_out = LayoutCache::new().get_or_parse(TREE).unwrap();
    let table = MetadataTable::from_reader(METADATA_CSV.as_bytes()).unwrap();
    let view = TreeView::new(laid_out, table).with_palette(palette);

    let model = view.render(&RenderRequest::new("Clade", ["20A", "21A"]));
    let colors: Vec<_> = model.legend.entries.iter().map(|e| e.color.as_str()).collect();
    assert_eq!(colors, ["navy", "gold"]);
}
