//! Intrinsic sizing.
//!
//! Measures what a subtree wants to be without (or within) an imposed
//! constraint: min-content (smallest size that avoids overflow and forced
//! breaks beyond hard breaks), max-content (size if never wrapped), or a
//! content size under a definite extent. Used by `auto` flex basis,
//! `fit-content` sizing, the shrink floor, and absolute-position sizing.
//!
//! Dispatch is a closed match over `NodeKind` so no kind is silently
//! skipped. Children with `display: Absolute` or `None` never contribute
//! to a container's measurement.

use crate::layout::box_model::{clamp_size, resolve_size, SizeTarget};
use crate::layout::text_measure::{
    line_count, max_content_width, min_content_width, wrapped_width,
};
use crate::layout::{grid, ResolvedDims};
use crate::tree::LayoutTree;
use crate::types::{Display, FlexDirection, FlexWrap, NodeKind, Size, TextWrap};

// =============================================================================
// Constraint
// =============================================================================

/// Available space along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailableSpace {
    /// A concrete extent in cells.
    Definite(u16),
    /// Indefinite; size to the smallest non-overflowing content.
    MinContent,
    /// Indefinite; size as if never constrained.
    MaxContent,
}

impl AvailableSpace {
    /// The concrete extent, if any.
    #[inline]
    pub const fn definite(&self) -> Option<u16> {
        match self {
            Self::Definite(n) => Some(*n),
            _ => None,
        }
    }

    /// Shrink a definite extent by `amount`, saturating; indefinite modes
    /// pass through.
    #[inline]
    pub const fn shrink(&self, amount: u16) -> Self {
        match self {
            Self::Definite(n) => Self::Definite(n.saturating_sub(amount)),
            other => *other,
        }
    }
}

/// The measurement context handed top-down: an availability per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    pub width: AvailableSpace,
    pub height: AvailableSpace,
}

impl Constraint {
    /// Fully indefinite min-content measurement.
    pub const MIN_CONTENT: Self = Self {
        width: AvailableSpace::MinContent,
        height: AvailableSpace::MinContent,
    };

    /// Fully indefinite max-content measurement.
    pub const MAX_CONTENT: Self = Self {
        width: AvailableSpace::MaxContent,
        height: AvailableSpace::MaxContent,
    };

    pub const fn new(width: AvailableSpace, height: AvailableSpace) -> Self {
        Self { width, height }
    }

    /// A definite layout-mode constraint.
    pub const fn definite(width: u16, height: u16) -> Self {
        Self {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        }
    }

    /// Availability along the main axis of `dir`.
    #[inline]
    pub const fn main(&self, dir: FlexDirection) -> AvailableSpace {
        if dir.is_row() { self.width } else { self.height }
    }
}

// =============================================================================
// Measurement
// =============================================================================

/// Measure the size a subtree takes under `constraint`.
///
/// Always total: malformed styles degrade per the box model and the result
/// is clamped by the node's min/max.
pub(crate) fn measure(
    tree: &LayoutTree,
    dims: &[ResolvedDims],
    idx: usize,
    constraint: Constraint,
) -> Size {
    let node = tree.node(idx);
    let style = &node.style;

    let width_base = constraint.width.definite();
    let height_base = constraint.height.definite();
    let width_target = resolve_size(dims[idx].width, width_base);
    let height_target = resolve_size(dims[idx].height, height_base);

    let width = resolve_axis_size(
        tree, dims, idx, Axis::Horizontal, width_target, constraint,
    );
    // Clamp before the cross pass: min/max width changes where text wraps,
    // so the height must be measured under the final width.
    let width = clamp_size(width, style.min_width, style.max_width, width_base);
    let height_constraint = Constraint {
        width: AvailableSpace::Definite(width),
        height: constraint.height,
    };
    let height = resolve_axis_size(
        tree, dims, idx, Axis::Vertical, height_target, height_constraint,
    );

    Size {
        width,
        height: clamp_size(height, style.min_height, style.max_height, height_base),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Resolve one axis of a node's measured size.
fn resolve_axis_size(
    tree: &LayoutTree,
    dims: &[ResolvedDims],
    idx: usize,
    axis: Axis,
    target: SizeTarget,
    constraint: Constraint,
) -> u16 {
    match target {
        SizeTarget::Definite(n) => n,
        SizeTarget::Auto => {
            let content = content_size(tree, dims, idx, constraint);
            let own = match axis {
                Axis::Horizontal => content.width,
                Axis::Vertical => content.height,
            };
            // Auto under a definite extent never reports larger than the
            // extent; overflow is the solver's concern.
            let avail = match axis {
                Axis::Horizontal => constraint.width.definite(),
                Axis::Vertical => constraint.height.definite(),
            };
            match avail {
                Some(a) => own.min(a),
                None => own,
            }
        }
        SizeTarget::FitContent => {
            // fit-content: clamp max-content into the available extent,
            // floored at min-content (the floor wins if min > max).
            let (max_c, min_c) = match axis {
                Axis::Horizontal => (
                    content_size(tree, dims, idx, Constraint::MAX_CONTENT).width,
                    content_size(tree, dims, idx, Constraint::MIN_CONTENT).width,
                ),
                Axis::Vertical => (
                    content_size(tree, dims, idx, Constraint::MAX_CONTENT).height,
                    content_size(tree, dims, idx, Constraint::MIN_CONTENT).height,
                ),
            };
            let avail = match axis {
                Axis::Horizontal => constraint.width.definite(),
                Axis::Vertical => constraint.height.definite(),
            };
            let upper = match avail {
                Some(a) => max_c.min(a),
                None => max_c,
            };
            upper.max(min_c)
        }
    }
}

/// Content-box-driven size of a node (its border box), before min/max.
fn content_size(
    tree: &LayoutTree,
    dims: &[ResolvedDims],
    idx: usize,
    constraint: Constraint,
) -> Size {
    let node = tree.node(idx);
    let style = &node.style;
    let insets = style.padding.add(style.border);

    match node.kind {
        NodeKind::Text => {
            let (content, wrap) = match &node.text {
                Some(t) => (t.content.as_str(), t.wrap),
                None => ("", TextWrap::Word),
            };
            let inner_w = constraint.width.shrink(insets.horizontal());
            let text_w = match inner_w {
                AvailableSpace::Definite(w) => wrapped_width(content, Some(w), wrap),
                AvailableSpace::MinContent => min_content_width(content, wrap),
                AvailableSpace::MaxContent => max_content_width(content),
            };
            let wrap_at = match inner_w {
                AvailableSpace::Definite(w) => Some(w),
                AvailableSpace::MinContent => Some(min_content_width(content, wrap)),
                AvailableSpace::MaxContent => None,
            };
            let text_h = line_count(content, wrap_at, wrap);
            Size {
                width: text_w.saturating_add(insets.horizontal()),
                height: text_h.saturating_add(insets.vertical()),
            }
        }

        NodeKind::Fixed => {
            // A fixed leaf has no content of its own; its size is whatever
            // the style declares (resolved by the caller) or zero.
            let w = match resolve_size(dims[idx].width, constraint.width.definite()) {
                SizeTarget::Definite(n) => n,
                SizeTarget::Auto | SizeTarget::FitContent => 0,
            };
            let h = match resolve_size(dims[idx].height, constraint.height.definite()) {
                SizeTarget::Definite(n) => n,
                SizeTarget::Auto | SizeTarget::FitContent => 0,
            };
            Size {
                width: w.max(insets.horizontal()),
                height: h.max(insets.vertical()),
            }
        }

        NodeKind::Grid => grid::measure_grid(tree, dims, idx, constraint),

        NodeKind::Box | NodeKind::Row | NodeKind::Column | NodeKind::Custom(_) => {
            measure_flex_content(tree, dims, idx, constraint)
        }
    }
}

/// Measure a flex container's content: sum along the main axis, max along
/// the cross axis, plus gaps and insets.
fn measure_flex_content(
    tree: &LayoutTree,
    dims: &[ResolvedDims],
    idx: usize,
    constraint: Constraint,
) -> Size {
    let style = &tree.node(idx).style;
    let dir = style.direction;
    let gap = dims[idx].gap;
    let insets = style.padding.add(style.border);

    let child_constraint = Constraint {
        width: constraint.width.shrink(insets.horizontal()),
        height: constraint.height.shrink(insets.vertical()),
    };

    let mut sum_main: u32 = 0;
    let mut max_main: u16 = 0;
    let mut max_cross: u16 = 0;
    let mut count: u32 = 0;

    for &child in tree.children(idx) {
        if tree.node(child).style.display != Display::Flow {
            continue;
        }
        let margin = tree.node(child).style.margin;
        let size = measure(tree, dims, child, child_constraint);
        let outer_main = size.main(dir).saturating_add(margin.main(dir));
        let outer_cross = size.cross(dir).saturating_add(margin.cross(dir));
        sum_main += outer_main as u32;
        max_main = max_main.max(outer_main);
        max_cross = max_cross.max(outer_cross);
        count += 1;
    }

    let gaps = gap as u32 * count.saturating_sub(1);
    let summed = (sum_main + gaps).min(u16::MAX as u32) as u16;

    // Under min-content a wrapping container collapses to its widest child;
    // otherwise the children stand in a single line.
    let main = if style.wrap == FlexWrap::Wrap && constraint.main(dir) == AvailableSpace::MinContent
    {
        max_main
    } else {
        summed
    };

    let content = Size::from_axes(dir, main, max_cross);
    Size {
        width: content.width.saturating_add(insets.horizontal()),
        height: content.height.saturating_add(insets.vertical()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::engine::resolve_dims;
    use crate::types::{Dimension, Edges, Node, NodeKind, Viewport};

    fn dims_for(tree: &LayoutTree) -> Vec<ResolvedDims> {
        resolve_dims(tree, Viewport::new(80, 24))
    }

    #[test]
    fn text_min_and_max_content() {
        let mut tree = LayoutTree::new();
        let t = tree.insert(None, Node::text(1, "hello world"));
        let dims = dims_for(&tree);

        let max = measure(&tree, &dims, t, Constraint::MAX_CONTENT);
        assert_eq!(max, Size::new(11, 1));

        let min = measure(&tree, &dims, t, Constraint::MIN_CONTENT);
        assert_eq!(min, Size::new(5, 2)); // "hello" / "world"
    }

    #[test]
    fn text_height_under_definite_width() {
        let mut tree = LayoutTree::new();
        let t = tree.insert(None, Node::text(1, "hello world"));
        let dims = dims_for(&tree);

        let s = measure(
            &tree,
            &dims,
            t,
            Constraint::new(AvailableSpace::Definite(10), AvailableSpace::MaxContent),
        );
        assert_eq!(s.height, 2);
        assert_eq!(s.width, 5);
    }

    #[test]
    fn max_width_clamp_feeds_height() {
        let mut tree = LayoutTree::new();
        let t = tree.insert(None, {
            let mut n = Node::text(1, "hello world");
            n.style.max_width = Dimension::Cells(5);
            n
        });
        let dims = dims_for(&tree);

        // The clamp shrinks the width to 5, so the text wraps to two lines;
        // the height must reflect the clamped width, not the unclamped 11.
        let s = measure(&tree, &dims, t, Constraint::MAX_CONTENT);
        assert_eq!(s, Size::new(5, 2));
    }

    #[test]
    fn min_width_clamp_feeds_height() {
        let mut tree = LayoutTree::new();
        let t = tree.insert(None, {
            let mut n = Node::text(1, "hello world");
            n.style.min_width = Dimension::Cells(11);
            n
        });
        let dims = dims_for(&tree);

        // Min-content would wrap at 5; the min-width floor keeps the text on
        // one line and the height follows.
        let s = measure(&tree, &dims, t, Constraint::MIN_CONTENT);
        assert_eq!(s, Size::new(11, 1));
    }

    #[test]
    fn fixed_leaf_uses_explicit_size() {
        let mut tree = LayoutTree::new();
        let f = tree.insert(
            None,
            Node::new(1, NodeKind::Fixed).with_style(|s| {
                s.width = Dimension::Cells(12).into();
                s.height = Dimension::Cells(3).into();
            }),
        );
        let dims = dims_for(&tree);
        assert_eq!(measure(&tree, &dims, f, Constraint::MAX_CONTENT), Size::new(12, 3));
    }

    #[test]
    fn row_sums_children_and_gaps() {
        let mut tree = LayoutTree::new();
        let row = tree.insert(
            None,
            Node::new(1, NodeKind::Row).with_style(|s| s.gap = 2.into()),
        );
        for i in 0..3 {
            tree.insert(
                Some(row),
                Node::new(10 + i, NodeKind::Fixed).with_style(|s| {
                    s.width = Dimension::Cells(5).into();
                    s.height = Dimension::Cells(2).into();
                }),
            );
        }
        let dims = dims_for(&tree);
        // 3 × 5 + 2 gaps × 2 = 19 wide, 2 tall.
        assert_eq!(measure(&tree, &dims, row, Constraint::MAX_CONTENT), Size::new(19, 2));
    }

    #[test]
    fn column_stacks_heights() {
        let mut tree = LayoutTree::new();
        let col = tree.insert(None, Node::new(1, NodeKind::Column));
        tree.insert(Some(col), Node::text(2, "alpha"));
        tree.insert(Some(col), Node::text(3, "beta"));
        let dims = dims_for(&tree);
        assert_eq!(measure(&tree, &dims, col, Constraint::MAX_CONTENT), Size::new(5, 2));
    }

    #[test]
    fn padding_and_border_add_to_content() {
        let mut tree = LayoutTree::new();
        let b = tree.insert(
            None,
            Node::new(1, NodeKind::Box).with_style(|s| {
                s.padding = Edges::all(1);
                s.border = Edges::all(1);
            }),
        );
        tree.insert(Some(b), Node::text(2, "hi"));
        let dims = dims_for(&tree);
        // 2 content + 2 padding + 2 border per axis.
        assert_eq!(measure(&tree, &dims, b, Constraint::MAX_CONTENT), Size::new(6, 5));
    }

    #[test]
    fn absolute_children_do_not_contribute() {
        let mut tree = LayoutTree::new();
        let row = tree.insert(None, Node::new(1, NodeKind::Row));
        tree.insert(
            Some(row),
            Node::new(2, NodeKind::Fixed).with_style(|s| {
                s.width = Dimension::Cells(5).into();
                s.height = Dimension::Cells(1).into();
            }),
        );
        tree.insert(
            Some(row),
            Node::new(3, NodeKind::Fixed).with_style(|s| {
                s.display = Display::Absolute;
                s.width = Dimension::Cells(50).into();
                s.height = Dimension::Cells(50).into();
            }),
        );
        let dims = dims_for(&tree);
        assert_eq!(measure(&tree, &dims, row, Constraint::MAX_CONTENT), Size::new(5, 1));
    }

    #[test]
    fn min_leq_max_for_containers() {
        let mut tree = LayoutTree::new();
        let col = tree.insert(None, Node::new(1, NodeKind::Column));
        tree.insert(Some(col), Node::text(2, "some wrapping text here"));
        tree.insert(
            Some(col),
            Node::new(3, NodeKind::Fixed).with_style(|s| {
                s.width = Dimension::Cells(4).into();
                s.height = Dimension::Cells(1).into();
            }),
        );
        let dims = dims_for(&tree);
        let min = measure(&tree, &dims, col, Constraint::MIN_CONTENT);
        let max = measure(&tree, &dims, col, Constraint::MAX_CONTENT);
        assert!(min.width <= max.width);
    }

    #[test]
    fn fit_content_clamps_to_available() {
        let mut tree = LayoutTree::new();
        let t = tree.insert(None, {
            let mut n = Node::text(1, "hello wide world");
            n.style.width = Dimension::FitContent.into();
            n
        });
        let dims = dims_for(&tree);

        // Plenty of room: max-content wins.
        let s = measure(
            &tree,
            &dims,
            t,
            Constraint::new(AvailableSpace::Definite(40), AvailableSpace::MaxContent),
        );
        assert_eq!(s.width, 16);

        // Tight: clamped to the available extent, floored at min-content.
        let s = measure(
            &tree,
            &dims,
            t,
            Constraint::new(AvailableSpace::Definite(7), AvailableSpace::MaxContent),
        );
        assert_eq!(s.width, 7);
    }
}
