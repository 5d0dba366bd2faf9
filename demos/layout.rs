//! Layout demo: builds a small dashboard tree, lays it out at two viewport
//! widths, and prints the resulting rects as an ASCII sketch.
//!
//! Run with: cargo run --example layout

use flexcell::{
    compute_layout, compute_signatures, ComputedLayout, Dimension, LayoutTree, Node, NodeKind,
    Overflow, Responsive, Viewport,
};

fn build_tree() -> LayoutTree {
    let mut tree = LayoutTree::new();
    let root = tree.insert(None, Node::new(1, NodeKind::Column));

    let _header = tree.insert(
        Some(root),
        Node::new(2, NodeKind::Row).with_style(|s| {
            s.height = Dimension::Cells(3).into();
            s.border = flexcell::Edges::all(1);
        }),
    );

    let body = tree.insert(
        Some(root),
        Node::new(3, NodeKind::Row).with_style(|s| s.grow = 1.0),
    );

    // Sidebar collapses below 100 columns.
    let sidebar = tree.insert(
        Some(body),
        Node::new(4, NodeKind::Column).with_style(|s| {
            s.width = Responsive::Breakpoints(vec![
                (0, Dimension::Cells(0).into()),
                (100, Dimension::Cells(24).into()),
            ]);
        }),
    );
    tree.insert(Some(sidebar), Node::text(5, "nav item one\nnav item two"));

    let content = tree.insert(
        Some(body),
        Node::new(6, NodeKind::Column).with_style(|s| {
            s.grow = 1.0;
            s.padding = flexcell::Edges::all(1);
            s.overflow = Overflow::Scroll;
        }),
    );
    tree.insert(
        Some(content),
        Node::text(
            7,
            "The quick brown fox jumps over the lazy dog, wrapping wherever \
             the content column runs out of cells.",
        ),
    );

    tree.insert(
        Some(root),
        Node::new(8, NodeKind::Row).with_style(|s| s.height = Dimension::Cells(1).into()),
    );

    tree
}

fn print_layout(tree: &LayoutTree, layout: &ComputedLayout) {
    for (idx, node) in tree.iter() {
        let r = layout.rect(idx);
        let scroll = layout.max_scroll(idx);
        print!(
            "  #{:<3} {:?}  at ({:>3},{:>3})  {:>3}x{:<3}",
            node.id, node.kind, r.x, r.y, r.width, r.height
        );
        if scroll.width > 0 || scroll.height > 0 {
            print!("  scroll {}x{}", scroll.width, scroll.height);
        }
        println!();
    }
}

fn main() {
    let tree = build_tree();

    for viewport in [Viewport::new(80, 24), Viewport::new(140, 40)] {
        println!("viewport {}x{}:", viewport.width, viewport.height);
        let layout = compute_layout(&tree, viewport);
        print_layout(&tree, &layout);
        println!();
    }

    let sigs = compute_signatures(&tree);
    let cached = sigs.iter().filter(|s| s.is_some()).count();
    println!("signatures: {cached}/{} subtrees cacheable", sigs.len());
}
