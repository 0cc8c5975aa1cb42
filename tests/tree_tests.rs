use cladeview::model::{BranchLength, PhyloTree, PhyloTreeBuilder, SampleId, TreeBuilder};

fn id(s: &str) -> SampleId {
    SampleId::new(s).unwrap()
}

#[test]
fn test_building_tree() {
    let mut tree = PhyloTree::new(3);
    let index_l1 = tree.add_leaf(id("A"), BranchLength::new(1.0)).unwrap();
    let index_l2 = tree.add_leaf(id("B"), BranchLength::new(1.0)).unwrap();
    let index_l3 = tree.add_leaf(id("C"), BranchLength::new(0.5)).unwrap();
    let index_i1 = tree.add_internal(vec![index_l1, index_l2], None, BranchLength::new(1.5));
    let index_root = tree.add_internal(vec![index_l3, index_i1], Some("root".to_string()), None);
    tree.set_root(index_root);

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_vertices(), 5);
    assert_eq!(tree.height(), 2);
    assert!(tree.is_valid());

    // Root
    let root = tree.root();
    assert_eq!(root.index(), index_root);
    assert!(root.is_root());
    assert_eq!(root.label(), Some("root"));
    assert_eq!(root.children(), [index_l3, index_i1]);

    // Leaf
    let l2 = &tree[index_l2];
    assert!(l2.is_leaf());
    assert_eq!(l2.index(), index_l2);
    assert_eq!(l2.sample_id(), Some(&id("B")));
    assert_eq!(l2.parent(), Some(index_i1));

    // Internal
    let inti = &tree[index_i1];
    assert!(inti.is_internal());
    assert_eq!(*inti.branch_length().unwrap(), 1.5);
}

#[test]
fn test_duplicate_sample_id_is_rejected() {
    let mut tree = PhyloTree::new(2);
    let first = tree.add_leaf(id("A"), None).unwrap();
    let err = tree.add_leaf(id("A"), None).unwrap_err();
    assert_eq!(err.existing, first);
    assert_eq!(err.id.as_str(), "A");
    assert_eq!(tree.num_vertices(), 1);
}

#[test]
fn test_traversals_visit_every_vertex_once() {
    let tree = cladeview::parse_newick_str("((A,B)ab,(C,D,E)cde,F)").unwrap();

    let pre: Vec<_> = tree.pre_order_iter().map(|v| v.index()).collect();
    let post: Vec<_> = tree.post_order_iter().map(|v| v.index()).collect();
    assert_eq!(pre.len(), tree.num_vertices());
    assert_eq!(post.len(), tree.num_vertices());
    assert_eq!(pre[0], tree.root_index());
    assert_eq!(*post.last().unwrap(), tree.root_index());

    // Restartable: a second traversal yields the same sequence
    let again: Vec<_> = tree.pre_order_iter().map(|v| v.index()).collect();
    assert_eq!(pre, again);

    // Parents come before children in pre-order, after them in post-order
    for vertex in tree.pre_order_iter() {
        if let Some(parent) = vertex.parent() {
            let pos = |order: &[usize], v| order.iter().position(|&x| x == v).unwrap();
            assert!(pos(&pre, parent) < pos(&pre, vertex.index()));
            assert!(pos(&post, parent) > pos(&post, vertex.index()));
        }
    }
}

#[test]
fn test_leaf_lookup_and_children() {
    let tree = cladeview::parse_newick_str("((A,B)ab,(C,D,E)cde,F)").unwrap();
    let c = tree.leaf_by_id("C").unwrap();
    let cde = tree.parent_of(c.index()).unwrap();
    assert_eq!(cde.label(), Some("cde"));

    let kids: Vec<_> = tree.children_of(cde.index()).map(|v| v.label().unwrap()).collect();
    assert_eq!(kids, ["C", "D", "E"]);
    assert_eq!(tree.children_of(c.index()).len(), 0);
    assert!(tree.leaf_by_id("cde").is_none());

    let ids: Vec<_> = tree.leaf_index().ids().iter().map(|s| s.as_str()).collect();
    assert_eq!(ids, ["A", "B", "C", "D", "E", "F"]);
}

#[test]
fn test_builder_produces_valid_tree() {
    let mut builder = PhyloTreeBuilder::default();
    builder.init_next(2);
    let a = builder.add_leaf(id("A"), None).unwrap();
    let b = builder.add_leaf(id("B"), None).unwrap();
    let root = builder.add_internal(vec![a, b], None, None);
    let tree = builder.finish_tree(root).unwrap();
    assert!(tree.is_valid());
    assert_eq!(tree.root_index(), root);
}

#[test]
#[should_panic]
fn test_get_root_panics_on_empty_tree() {
    let tree = PhyloTree::new(2);
    tree.root(); // Should panic
}

#[test]
#[should_panic]
fn test_get_vertex_out_of_bounds() {
    let tree = PhyloTree::new(2);
    let _ = &tree[55];
}

#[test]
fn test_sample_id_rejects_empty() {
    assert!(SampleId::new("").is_none());
    assert_eq!(id("IGIB_1").to_string(), "IGIB_1");
}
