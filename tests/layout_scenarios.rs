//! End-to-end layout scenarios.
//!
//! Exercises the whole pipeline through the public API: build a tree, run
//! `compute_layout`, assert rects. Each section covers one of the engine's
//! behavioral guarantees (exact settlement, wrapping, grid occupancy,
//! absolute isolation, clipping, responsiveness, signatures).

use flexcell::{
    compute_layout, compute_signatures, wrap_lines, Dimension, Display, FlexDirection, FlexWrap,
    LayoutTree, Node, NodeKind, Overflow, Rect, Responsive, SignatureCache, Size, TextWrap,
    Viewport,
};

fn row(id: u64) -> Node {
    Node::new(id, NodeKind::Row)
}

fn column(id: u64) -> Node {
    Node::new(id, NodeKind::Column)
}

fn grow_box(id: u64, grow: f32) -> Node {
    Node::new(id, NodeKind::Box).with_style(|s| s.grow = grow)
}

// =============================================================================
// EXACT SETTLEMENT
// =============================================================================

#[test]
fn grow_weights_split_one_hundred_cells() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(None, row(1));
    let a = tree.insert(Some(root), grow_box(2, 1.0));
    let b = tree.insert(Some(root), grow_box(3, 1.0));
    let c = tree.insert(Some(root), grow_box(4, 2.0));

    let layout = compute_layout(&tree, Viewport::new(100, 10));
    assert_eq!(layout.rect(a).width, 25);
    assert_eq!(layout.rect(b).width, 25);
    assert_eq!(layout.rect(c).width, 50);
    // No holes, no overlap: children tile the row exactly.
    assert_eq!(layout.rect(b).x, 25);
    assert_eq!(layout.rect(c).x, 50);
}

#[test]
fn odd_width_remainder_lands_on_early_children() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(None, row(1));
    let kids: Vec<_> = (0..3).map(|i| tree.insert(Some(root), grow_box(2 + i, 1.0))).collect();

    let layout = compute_layout(&tree, Viewport::new(101, 10));
    let widths: Vec<u16> = kids.iter().map(|&k| layout.rect(k).width).collect();
    assert_eq!(widths, vec![34, 34, 33]);
    let total: u16 = widths.iter().sum();
    assert_eq!(total, 101);
}

#[test]
fn grown_children_fill_exactly_with_gaps() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(None, row(1).with_style(|s| s.gap = 3.into()));
    let kids: Vec<_> = (0..4).map(|i| tree.insert(Some(root), grow_box(2 + i, 1.0))).collect();

    let layout = compute_layout(&tree, Viewport::new(97, 5));
    let widths: u16 = kids.iter().map(|&k| layout.rect(k).width).sum();
    // 3 gaps × 3 cells leave 88 for children; it is all allocated.
    assert_eq!(widths + 9, 97);
    assert_eq!(layout.rect(kids[3]).right(), 97);
}

#[test]
fn shrink_floors_at_min_content_and_overflows() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(
        None,
        row(1).with_style(|s| s.width = Dimension::Cells(50).into()),
    );
    let a = tree.insert(
        Some(root),
        Node::new(2, NodeKind::Box).with_style(|s| {
            s.basis = Dimension::Cells(40);
            s.min_width = Dimension::Cells(30);
        }),
    );
    let b = tree.insert(
        Some(root),
        Node::new(3, NodeKind::Box).with_style(|s| {
            s.basis = Dimension::Cells(40);
            s.min_width = Dimension::Cells(30);
        }),
    );

    let layout = compute_layout(&tree, Viewport::new(100, 10));
    // Both floor at 30; the remaining 10-cell deficit stays as overflow.
    assert_eq!(layout.rect(a).width, 30);
    assert_eq!(layout.rect(b).width, 30);
    assert_eq!(layout.rect(b).right(), 60);
}

// =============================================================================
// TEXT WRAPPING
// =============================================================================

#[test]
fn hello_world_wraps_at_ten() {
    let mut lines = Vec::new();
    wrap_lines("hello world", Some(10), TextWrap::Word, &mut lines);
    let slices: Vec<&str> = lines.iter().map(|l| l.slice("hello world")).collect();
    assert_eq!(slices, vec!["hello", "world"]);
}

#[test]
fn wrapped_text_gets_taller_not_wider() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(
        None,
        column(1).with_style(|s| s.width = Dimension::Cells(6).into()),
    );
    let t = tree.insert(Some(root), Node::text(2, "hello world"));

    let layout = compute_layout(&tree, Viewport::new(80, 24));
    assert!(layout.rect(t).width <= 6);
    assert_eq!(layout.rect(t).height, 2);
}

#[test]
fn cjk_text_measures_two_cells_per_character() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(None, column(1));
    let t = tree.insert(Some(root), Node::text(2, "你好"));

    let layout = compute_layout(&tree, Viewport::new(80, 24));
    // Stretch is default on the column cross axis; the line itself is 4
    // cells and fits on one row.
    assert_eq!(layout.rect(t).height, 1);

    let mut lines = Vec::new();
    wrap_lines("你好世界", Some(4), TextWrap::Char, &mut lines);
    // Two double-width characters per 4-cell line, never split.
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].width, 4);
}

// =============================================================================
// GRID
// =============================================================================

#[test]
fn grid_children_never_overlap() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(
        None,
        Node::new(1, NodeKind::Grid).with_style(|s| {
            s.grid.columns = vec![1.0, 1.0, 1.0];
            s.gap = 1.into();
        }),
    );
    let kids: Vec<_> = (0..6)
        .map(|i| {
            tree.insert(
                Some(root),
                Node::new(10 + i, NodeKind::Box)
                    .with_style(|s| s.grid.col_span = if i % 3 == 0 { 2 } else { 1 }),
            )
        })
        .collect();

    let layout = compute_layout(&tree, Viewport::new(31, 20));
    for (i, &a) in kids.iter().enumerate() {
        for &b in &kids[i + 1..] {
            let inter = layout.rect(a).intersect(&layout.rect(b));
            assert!(
                inter.is_empty(),
                "children {i} and later overlap: {:?} vs {:?}",
                layout.rect(a),
                layout.rect(b)
            );
        }
    }
}

#[test]
fn explicit_grid_placement_wins_and_auto_flows_around() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(
        None,
        Node::new(1, NodeKind::Grid).with_style(|s| s.grid.columns = vec![1.0, 1.0]),
    );
    let pinned = tree.insert(
        Some(root),
        Node::new(2, NodeKind::Box).with_style(|s| {
            s.grid.row = Some(1);
            s.grid.column = Some(1);
        }),
    );
    let auto = tree.insert(Some(root), Node::new(3, NodeKind::Box));

    let layout = compute_layout(&tree, Viewport::new(20, 10));
    // Pinned lands bottom-right; the auto child takes the first free cell.
    assert_eq!(layout.rect(pinned), Rect::new(10, 5, 10, 5));
    assert_eq!(layout.rect(auto), Rect::new(0, 0, 10, 5));
}

// =============================================================================
// ABSOLUTE AND DISPLAY
// =============================================================================

#[test]
fn overlay_leaves_flow_untouched() {
    let build = |with_overlay: bool| {
        let mut tree = LayoutTree::new();
        let root = tree.insert(None, column(1));
        tree.insert(
            Some(root),
            Node::new(2, NodeKind::Box).with_style(|s| s.height = Dimension::Cells(4).into()),
        );
        if with_overlay {
            tree.insert(
                Some(root),
                Node::new(9, NodeKind::Box).with_style(|s| {
                    s.display = Display::Absolute;
                    s.inset.left = Some(10);
                    s.inset.top = Some(3);
                    s.width = Dimension::Cells(20).into();
                    s.height = Dimension::Cells(5).into();
                }),
            );
        }
        tree.insert(
            Some(root),
            Node::new(3, NodeKind::Box).with_style(|s| s.height = Dimension::Cells(4).into()),
        );
        tree
    };

    let with = build(true);
    let without = build(false);
    let layout_with = compute_layout(&with, Viewport::new(80, 24));
    let layout_without = compute_layout(&without, Viewport::new(80, 24));

    // Flow siblings land identically whether or not the overlay exists.
    assert_eq!(layout_with.rect_of(2), layout_without.rect_of(2));
    assert_eq!(layout_with.rect_of(3), layout_without.rect_of(3));
    assert_eq!(layout_with.rect_of(9), Some(Rect::new(10, 3, 20, 5)));
}

#[test]
fn display_none_collapses_space() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(None, column(1));
    tree.insert(
        Some(root),
        Node::new(2, NodeKind::Box).with_style(|s| {
            s.display = Display::None;
            s.height = Dimension::Cells(10).into();
        }),
    );
    let visible = tree.insert(
        Some(root),
        Node::new(3, NodeKind::Box).with_style(|s| s.height = Dimension::Cells(4).into()),
    );

    let layout = compute_layout(&tree, Viewport::new(80, 24));
    assert_eq!(layout.rect(visible).y, 0);
}

// =============================================================================
// OVERFLOW
// =============================================================================

#[test]
fn scroll_container_clips_and_reports_range() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(None, column(1));
    let scroller = tree.insert(
        Some(root),
        column(2).with_style(|s| {
            s.overflow = Overflow::Scroll;
            s.height = Dimension::Cells(8).into();
        }),
    );
    for i in 0..6 {
        tree.insert(
            Some(scroller),
            Node::new(10 + i, NodeKind::Box).with_style(|s| s.height = Dimension::Cells(3).into()),
        );
    }

    let layout = compute_layout(&tree, Viewport::new(80, 24));
    // 18 cells of content in an 8-cell box.
    assert_eq!(layout.max_scroll(layout.index_of(2).unwrap()), Size::new(0, 10));
    // Descendants are clipped to the scroller's box.
    let last = layout.index_of(15).unwrap();
    assert_eq!(layout.clip(last), Rect::new(0, 0, 80, 8));
    // But their rects still describe their true position.
    assert_eq!(layout.rect(last).y, 15);
}

// =============================================================================
// RESPONSIVE
// =============================================================================

#[test]
fn breakpoints_change_layout_with_viewport() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(None, row(1));
    let sidebar = tree.insert(
        Some(root),
        Node::new(2, NodeKind::Box).with_style(|s| {
            s.width = Responsive::Breakpoints(vec![
                (0, Dimension::Cells(0).into()),
                (100, Dimension::Cells(30).into()),
            ]);
        }),
    );

    let narrow = compute_layout(&tree, Viewport::new(80, 24));
    let wide = compute_layout(&tree, Viewport::new(120, 24));
    assert_eq!(narrow.rect(sidebar).width, 0);
    assert_eq!(wide.rect(sidebar).width, 30);
}

// =============================================================================
// SIGNATURES
// =============================================================================

#[test]
fn unchanged_tree_hits_the_cache() {
    let mut tree = LayoutTree::new();
    let root = tree.insert(None, column(1));
    tree.insert(Some(root), Node::text(2, "stable"));

    let sigs = compute_signatures(&tree);
    let mut cache = SignatureCache::new();
    for (idx, node) in tree.iter() {
        cache.commit(node.id, sigs[idx]);
    }
    for (idx, node) in tree.iter() {
        assert!(cache.is_unchanged(node.id, sigs[idx]));
    }

    // Editing the text invalidates the leaf and its ancestors.
    if let Some(t) = tree.node_mut(1).text.as_mut() {
        t.content.push('!');
    }
    let changed = compute_signatures(&tree);
    assert!(!cache.is_unchanged(2, changed[1]));
    assert!(!cache.is_unchanged(1, changed[0]));
}

// =============================================================================
// COMPOSITE
// =============================================================================

#[test]
fn dashboard_shell_lays_out_stably() {
    // header / (sidebar | content) / status — the classic TUI shell.
    let mut tree = LayoutTree::new();
    let root = tree.insert(None, column(1));
    let header = tree.insert(
        Some(root),
        row(2).with_style(|s| s.height = Dimension::Cells(1).into()),
    );
    let body = tree.insert(
        Some(root),
        row(3).with_style(|s| {
            s.grow = 1.0;
            s.direction = FlexDirection::Row;
        }),
    );
    let status = tree.insert(
        Some(root),
        row(4).with_style(|s| s.height = Dimension::Cells(1).into()),
    );
    let sidebar = tree.insert(
        Some(body),
        column(5).with_style(|s| s.width = Dimension::Cells(20).into()),
    );
    let content = tree.insert(
        Some(body),
        column(6).with_style(|s| {
            s.grow = 1.0;
            s.wrap = FlexWrap::NoWrap;
        }),
    );

    let layout = compute_layout(&tree, Viewport::new(80, 24));
    assert_eq!(layout.rect(header), Rect::new(0, 0, 80, 1));
    assert_eq!(layout.rect(body), Rect::new(0, 1, 80, 22));
    assert_eq!(layout.rect(status), Rect::new(0, 23, 80, 1));
    assert_eq!(layout.rect(sidebar), Rect::new(0, 1, 20, 22));
    assert_eq!(layout.rect(content), Rect::new(20, 1, 60, 22));
}
