use criterion::{Criterion, criterion_group, criterion_main};
use cladeview::layout::{LaidOutTree, layout};
use cladeview::metadata::{MetadataError, MetadataTable};
use cladeview::parse_newick_str;
use cladeview::view::{RenderRequest, TreeView};
use std::hint::black_box;
use std::sync::Arc;

/// Balanced binary tree over `num_leaves` leaves named `S0, S1, ...`.
fn balanced_newick(num_leaves: usize) -> String {
    fn subtree(from: usize, to: usize, out: &mut String) {
        if to - from == 1 {
            out.push_str(&format!("S{from}:0.1"));
            return;
        }
        let mid = from + (to - from) / 2;
        out.push('(');
        subtree(from, mid, out);
        out.push(',');
        subtree(mid, to, out);
        out.push_str("):0.05");
    }
    let mut newick = String::new();
    subtree(0, num_leaves, &mut newick);
    newick.push(';');
    newick
}

/// Caterpillar tree, height equal to the number of leaves minus one.
fn caterpillar_newick(num_leaves: usize) -> String {
    let mut newick = "(".repeat(num_leaves - 1);
    newick.push_str("S0");
    for i in 1..num_leaves {
        newick.push_str(&format!(",S{i})"));
    }
    newick.push(';');
    newick
}

fn metadata(num_leaves: usize) -> Result<MetadataTable, MetadataError> {
    let rows: Vec<[String; 3]> = (0..num_leaves)
        .map(|i| [format!("S{i}"), format!("L{}", i % 7), format!("C{}", i % 23)])
        .collect();
    MetadataTable::from_rows(
        ["IGIB_id".to_string(), "lineage".to_string(), "clade".to_string()],
        rows,
    )
}

const TREES: &[(&str, usize)] = &[("balanced-1k", 1_000), ("balanced-10k", 10_000)];

fn parse_and_layout(c: &mut Criterion) {
    for &(name, num_leaves) in TREES {
        let newick = balanced_newick(num_leaves);
        c.bench_function(&format!("parse-{name}"), |b| {
            b.iter(|| parse_newick_str(black_box(&newick)).unwrap());
        });

        let tree = parse_newick_str(&newick).unwrap();
        c.bench_function(&format!("layout-{name}"), |b| {
            b.iter(|| layout(black_box(&tree)));
        });
    }

    let newick = caterpillar_newick(5_000);
    c.bench_function("parse-layout-caterpillar-5k", |b| {
        b.iter(|| layout(&parse_newick_str(black_box(&newick)).unwrap()));
    });
}

fn render_requests(c: &mut Criterion) {
    let num_leaves = 10_000;
    let laid_out = Arc::new(LaidOutTree::from_newick(&balanced_newick(num_leaves)).unwrap());
    let view = TreeView::new(laid_out, metadata(num_leaves).unwrap());
    let request = RenderRequest::new("clade", ["C1", "C2", "C3", "C4", "C5"]);

    c.bench_function("render-balanced-10k", |b| {
        b.iter(|| view.render(black_box(&request)));
    });
}

criterion_group!(regression, parse_and_layout);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = render_requests
}
criterion_main!(regression, reporting);
