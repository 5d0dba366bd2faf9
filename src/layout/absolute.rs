//! Absolute positioning.
//!
//! Children with `display: Absolute` leave normal flow entirely: they never
//! enter flex/grid solving or container measurement, and they resolve after
//! the flow pass against their parent's content box (the containing block).
//!
//! Size resolution per axis: paired opposite offsets imply the size
//! (`left` + `right` ⇒ width), else the explicit style size, else intrinsic
//! measurement constrained by the remaining block. Offsets may be negative;
//! the final rect clamps into non-negative cell space.

use crate::layout::box_model::{clamp_size, resolve_size, SizeTarget};
use crate::layout::measure::{measure, AvailableSpace, Constraint};
use crate::layout::ResolvedDims;
use crate::tree::LayoutTree;
use crate::types::Rect;

/// Resolve one absolutely positioned child against its containing block,
/// writing its border-box rect.
pub(crate) fn place_absolute(
    tree: &LayoutTree,
    dims: &[ResolvedDims],
    child: usize,
    containing: Rect,
    rects: &mut [Rect],
) {
    let style = &tree.node(child).style;
    let inset = style.inset;

    // ── size per axis ──
    let width_from_offsets = match (inset.left, inset.right) {
        (Some(l), Some(r)) => {
            Some((containing.width as i32 - l as i32 - r as i32).max(0) as u16)
        }
        _ => None,
    };
    let height_from_offsets = match (inset.top, inset.bottom) {
        (Some(t), Some(b)) => {
            Some((containing.height as i32 - t as i32 - b as i32).max(0) as u16)
        }
        _ => None,
    };

    let explicit_width = match resolve_size(dims[child].width, Some(containing.width)) {
        SizeTarget::Definite(n) => Some(n),
        SizeTarget::Auto | SizeTarget::FitContent => None,
    };
    let explicit_height = match resolve_size(dims[child].height, Some(containing.height)) {
        SizeTarget::Definite(n) => Some(n),
        SizeTarget::Auto | SizeTarget::FitContent => None,
    };

    let mut width = width_from_offsets.or(explicit_width);
    let mut height = height_from_offsets.or(explicit_height);

    // Any remaining axis sizes intrinsically within the block left over
    // after the set offsets.
    if width.is_none() || height.is_none() {
        let remaining_w = (containing.width as i32
            - inset.left.unwrap_or(0) as i32
            - inset.right.unwrap_or(0) as i32)
            .max(0) as u16;
        let remaining_h = (containing.height as i32
            - inset.top.unwrap_or(0) as i32
            - inset.bottom.unwrap_or(0) as i32)
            .max(0) as u16;
        let constraint = Constraint::new(
            match width {
                Some(w) => AvailableSpace::Definite(w),
                None => AvailableSpace::Definite(remaining_w),
            },
            match height {
                Some(h) => AvailableSpace::Definite(h),
                None => AvailableSpace::Definite(remaining_h),
            },
        );
        let measured = measure(tree, dims, child, constraint);
        width = Some(width.unwrap_or(measured.width));
        height = Some(height.unwrap_or(measured.height));
    }

    let width = clamp_size(
        width.unwrap_or(0),
        style.min_width,
        style.max_width,
        Some(containing.width),
    );
    let height = clamp_size(
        height.unwrap_or(0),
        style.min_height,
        style.max_height,
        Some(containing.height),
    );

    // ── position ──
    let x = match (inset.left, inset.right) {
        (Some(l), _) => containing.x as i32 + l as i32,
        (None, Some(r)) => containing.right() as i32 - r as i32 - width as i32,
        (None, None) => containing.x as i32,
    };
    let y = match (inset.top, inset.bottom) {
        (Some(t), _) => containing.y as i32 + t as i32,
        (None, Some(b)) => containing.bottom() as i32 - b as i32 - height as i32,
        (None, None) => containing.y as i32,
    };

    rects[child] = Rect::new(
        x.clamp(0, u16::MAX as i32) as u16,
        y.clamp(0, u16::MAX as i32) as u16,
        width,
        height,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::engine::resolve_dims;
    use crate::types::{Dimension, Node, NodeKind, Viewport};

    fn place(tree: &LayoutTree, child: usize, containing: Rect) -> Rect {
        let dims = resolve_dims(tree, Viewport::new(100, 50));
        let mut rects = vec![Rect::ZERO; tree.len()];
        place_absolute(tree, &dims, child, containing, &mut rects);
        rects[child]
    }

    #[test]
    fn paired_offsets_imply_size() {
        let mut tree = LayoutTree::new();
        let c = tree.insert(
            None,
            Node::new(1, NodeKind::Box).with_style(|s| {
                s.inset.left = Some(2);
                s.inset.right = Some(3);
                s.inset.top = Some(1);
                s.inset.bottom = Some(1);
            }),
        );
        let r = place(&tree, c, Rect::new(10, 5, 40, 20));
        assert_eq!(r, Rect::new(12, 6, 35, 18));
    }

    #[test]
    fn explicit_size_with_single_offset() {
        let mut tree = LayoutTree::new();
        let c = tree.insert(
            None,
            Node::new(1, NodeKind::Box).with_style(|s| {
                s.width = Dimension::Cells(10).into();
                s.height = Dimension::Cells(4).into();
                s.inset.left = Some(5);
                s.inset.top = Some(2);
            }),
        );
        let r = place(&tree, c, Rect::new(0, 0, 40, 20));
        assert_eq!(r, Rect::new(5, 2, 10, 4));
    }

    #[test]
    fn right_bottom_anchor_from_far_edges() {
        let mut tree = LayoutTree::new();
        let c = tree.insert(
            None,
            Node::new(1, NodeKind::Box).with_style(|s| {
                s.width = Dimension::Cells(10).into();
                s.height = Dimension::Cells(4).into();
                s.inset.right = Some(2);
                s.inset.bottom = Some(1);
            }),
        );
        let r = place(&tree, c, Rect::new(0, 0, 40, 20));
        assert_eq!(r, Rect::new(28, 15, 10, 4));
    }

    #[test]
    fn unsized_child_measures_intrinsically() {
        let mut tree = LayoutTree::new();
        let c = tree.insert(
            None,
            Node::text(1, "hello world").with_style(|s| {
                s.inset.left = Some(0);
                s.inset.top = Some(0);
            }),
        );
        let r = place(&tree, c, Rect::new(0, 0, 40, 20));
        assert_eq!(r, Rect::new(0, 0, 11, 1));
    }

    #[test]
    fn narrow_block_wraps_intrinsic_text() {
        let mut tree = LayoutTree::new();
        let c = tree.insert(
            None,
            Node::text(1, "hello world").with_style(|s| {
                s.inset.left = Some(0);
                s.inset.top = Some(0);
            }),
        );
        let r = place(&tree, c, Rect::new(0, 0, 6, 20));
        assert_eq!(r.width, 5);
        assert_eq!(r.height, 2);
    }

    #[test]
    fn max_width_clamped_text_wraps_to_height() {
        let mut tree = LayoutTree::new();
        let c = tree.insert(
            None,
            Node::text(1, "hello world").with_style(|s| {
                s.max_width = Dimension::Cells(5);
                s.inset.left = Some(0);
                s.inset.top = Some(0);
            }),
        );
        // The block is wide enough for one line, but the max-width clamp
        // wraps the text; the rect must carry the wrapped height.
        let r = place(&tree, c, Rect::new(0, 0, 40, 20));
        assert_eq!(r, Rect::new(0, 0, 5, 2));
    }

    #[test]
    fn negative_offsets_clamp_into_viewport_space() {
        let mut tree = LayoutTree::new();
        let c = tree.insert(
            None,
            Node::new(1, NodeKind::Box).with_style(|s| {
                s.width = Dimension::Cells(8).into();
                s.height = Dimension::Cells(3).into();
                s.inset.left = Some(-5);
                s.inset.top = Some(-2);
            }),
        );
        let r = place(&tree, c, Rect::new(0, 0, 40, 20));
        assert_eq!(r.x, 0);
        assert_eq!(r.y, 0);
    }

    #[test]
    fn no_offsets_default_to_content_origin() {
        let mut tree = LayoutTree::new();
        let c = tree.insert(
            None,
            Node::new(1, NodeKind::Box).with_style(|s| {
                s.width = Dimension::Cells(8).into();
                s.height = Dimension::Cells(3).into();
            }),
        );
        let r = place(&tree, c, Rect::new(7, 4, 40, 20));
        assert_eq!(r, Rect::new(7, 4, 8, 3));
    }

    #[test]
    fn offsets_beat_explicit_size() {
        let mut tree = LayoutTree::new();
        let c = tree.insert(
            None,
            Node::new(1, NodeKind::Box).with_style(|s| {
                s.width = Dimension::Cells(100).into();
                s.inset.left = Some(2);
                s.inset.right = Some(2);
                s.height = Dimension::Cells(3).into();
            }),
        );
        let r = place(&tree, c, Rect::new(0, 0, 40, 20));
        assert_eq!(r.width, 36);
    }
}
