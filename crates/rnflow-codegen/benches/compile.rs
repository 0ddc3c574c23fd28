//! Pipeline benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rnflow_codegen::{CompileOptions, Compiler};
use rnflow_core::{
    FontName, LayoutMode, NodeId, NodeKind, NullSource, Paint, Rgb, SceneNode, SceneTree, TextContent, TextRun,
};

/// A vertical list of `rows` cards, each with a background, a title and a
/// badge row.
fn card_list(rows: usize) -> (SceneTree, NodeId) {
    let mut tree = SceneTree::new();
    let root = tree.add_root(
        SceneNode::new(NodeKind::Frame, "List")
            .with_bounds(0.0, 0.0, 360.0, 120.0 * rows as f64)
            .with_auto_layout(LayoutMode::Vertical, 8.0)
            .with_padding(16.0, 16.0, 16.0, 16.0),
    );
    for i in 0..rows {
        let card = tree.add_child(
            root,
            SceneNode::new(NodeKind::Frame, "Card")
                .with_bounds(16.0, 16.0 + 128.0 * i as f64, 328.0, 112.0)
                .with_fills(vec![Paint::solid(Rgb::new(1.0, 1.0, 1.0), 1.0)]),
        );
        tree.add_child(
            card,
            SceneNode::new(NodeKind::Text, "Title")
                .with_bounds(12.0, 12.0, 200.0, 24.0)
                .with_fills(vec![Paint::solid(Rgb::new(0.1, 0.1, 0.1), 1.0)])
                .with_text(TextContent::new(
                    "Card title",
                    vec![TextRun::new(0, 10, FontName::new("Inter", "Semi Bold"), 18.0)],
                )),
        );
        let badges = tree.add_child(
            card,
            SceneNode::new(NodeKind::Frame, "Badges")
                .with_bounds(12.0, 48.0, 200.0, 24.0)
                .with_auto_layout(LayoutMode::Horizontal, 4.0),
        );
        for _ in 0..3 {
            tree.add_child(badges, SceneNode::new(NodeKind::Rectangle, "Badge").with_bounds(0.0, 0.0, 40.0, 24.0));
        }
    }
    (tree, root)
}

fn compile_small(c: &mut Criterion) {
    let (tree, root) = card_list(4);
    let compiler = Compiler::new(CompileOptions::default()).unwrap();
    c.bench_function("compile_small", |b| {
        b.iter(|| pollster::block_on(compiler.compile(black_box(&tree), root, &NullSource)))
    });
}

fn compile_large(c: &mut Criterion) {
    let (tree, root) = card_list(100);
    let compiler = Compiler::new(CompileOptions::default()).unwrap();
    c.bench_function("compile_large", |b| {
        b.iter(|| pollster::block_on(compiler.compile(black_box(&tree), root, &NullSource)))
    });
}

criterion_group!(benches, compile_small, compile_large);
criterion_main!(benches);
