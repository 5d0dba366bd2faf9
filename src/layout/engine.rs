//! The layout entry point.
//!
//! `compute_layout` is a pure function from (tree, viewport) to rects: it
//! resolves responsive style values, sizes each root (explicit size, else
//! the viewport), then recursively solves containers top-down — flex or
//! grid by node kind — runs the absolute pass per container, and finishes
//! with a clip pass. The same tree and viewport always produce the same
//! output; nothing here reads clocks, randomness, or terminal state.

use rustc_hash::FxHashMap;

use crate::layout::box_model::{clamp_size, resolve_size, SizeTarget};
use crate::layout::measure::{measure, Constraint};
use crate::layout::{absolute, flex, grid, ResolvedDims};
use crate::tree::LayoutTree;
use crate::types::{Display, NodeKind, Overflow, Rect, Size, Viewport};

// =============================================================================
// ComputedLayout
// =============================================================================

/// The output of one layout pass: border-box rects, effective clips, and
/// scroll ranges, indexed like the tree.
#[derive(Debug, Clone)]
pub struct ComputedLayout {
    rects: Vec<Rect>,
    clips: Vec<Rect>,
    scroll: Vec<Size>,
    by_id: FxHashMap<u64, usize>,
}

impl ComputedLayout {
    /// Border-box rect of the node at `idx`.
    #[inline]
    pub fn rect(&self, idx: usize) -> Rect {
        self.rects[idx]
    }

    /// Effective clip of the node at `idx`: the intersection of every
    /// `Hidden`/`Scroll` ancestor box (and its own, if it clips) with the
    /// viewport.
    #[inline]
    pub fn clip(&self, idx: usize) -> Rect {
        self.clips[idx]
    }

    /// How far a `Scroll` container's content extends past its content box,
    /// per axis. Zero for everything else.
    #[inline]
    pub fn max_scroll(&self, idx: usize) -> Size {
        self.scroll[idx]
    }

    /// Look up a node index by its stable id.
    #[inline]
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Border-box rect by stable id.
    pub fn rect_of(&self, id: u64) -> Option<Rect> {
        self.index_of(id).map(|idx| self.rects[idx])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

// =============================================================================
// Entry
// =============================================================================

/// Resolve every node's responsive width/height/gap against the viewport.
/// Runs once per pass so downstream code only sees concrete values.
pub(crate) fn resolve_dims(tree: &LayoutTree, viewport: Viewport) -> Vec<ResolvedDims> {
    tree.iter()
        .map(|(_, node)| ResolvedDims {
            width: node.style.width.resolve(viewport.width),
            height: node.style.height.resolve(viewport.width),
            gap: node.style.gap.resolve(viewport.width),
        })
        .collect()
}

/// Lay out the whole tree against a viewport.
///
/// Every root is placed at the origin, sized by its explicit style size
/// (else the viewport). Malformed input degrades per the box model; this
/// function is total.
pub fn compute_layout(tree: &LayoutTree, viewport: Viewport) -> ComputedLayout {
    let dims = resolve_dims(tree, viewport);
    let n = tree.len();
    let mut rects = vec![Rect::ZERO; n];
    let mut scroll = vec![Size::ZERO; n];
    let vp = Rect::new(0, 0, viewport.width, viewport.height);

    for &root in tree.roots() {
        match tree.node(root).style.display {
            Display::None => continue,
            Display::Absolute => {
                absolute::place_absolute(tree, &dims, root, vp, &mut rects);
            }
            Display::Flow => {
                rects[root] = root_rect(tree, &dims, root, viewport);
            }
        }
        solve_children(tree, &dims, root, &mut rects, &mut scroll);
    }

    let mut clips = vec![Rect::ZERO; n];
    for &root in tree.roots() {
        assign_clips(tree, root, vp, &rects, &mut clips);
    }

    let by_id = tree.iter().map(|(idx, node)| (node.id, idx)).collect();
    ComputedLayout {
        rects,
        clips,
        scroll,
        by_id,
    }
}

/// A root's border box: explicit size where given, viewport otherwise.
fn root_rect(tree: &LayoutTree, dims: &[ResolvedDims], root: usize, viewport: Viewport) -> Rect {
    let style = &tree.node(root).style;
    let width = match resolve_size(dims[root].width, Some(viewport.width)) {
        SizeTarget::Definite(n) => n,
        SizeTarget::Auto => viewport.width,
        SizeTarget::FitContent => {
            measure(tree, dims, root, Constraint::definite(viewport.width, viewport.height)).width
        }
    };
    let height = match resolve_size(dims[root].height, Some(viewport.height)) {
        SizeTarget::Definite(n) => n,
        SizeTarget::Auto => viewport.height,
        SizeTarget::FitContent => {
            measure(tree, dims, root, Constraint::definite(viewport.width, viewport.height)).height
        }
    };
    Rect::new(
        0,
        0,
        clamp_size(width, style.min_width, style.max_width, Some(viewport.width)),
        clamp_size(height, style.min_height, style.max_height, Some(viewport.height)),
    )
}

/// Solve the children of `idx` (whose own rect is already settled) and
/// recurse. Dispatch is exhaustive over the node kinds.
fn solve_children(
    tree: &LayoutTree,
    dims: &[ResolvedDims],
    idx: usize,
    rects: &mut Vec<Rect>,
    scroll: &mut [Size],
) {
    let node = tree.node(idx);
    let style = &node.style;
    let content = rects[idx].inset_by(style.padding.add(style.border));

    let extent = match node.kind {
        // Leaves have no flow children to place.
        NodeKind::Text | NodeKind::Fixed => Size::ZERO,
        NodeKind::Grid => grid::solve_grid(tree, dims, idx, content, rects),
        NodeKind::Box | NodeKind::Row | NodeKind::Column | NodeKind::Custom(_) => {
            flex::solve_flex(tree, dims, idx, content, rects)
        }
    };

    if style.overflow == Overflow::Scroll {
        scroll[idx] = Size::new(
            extent.width.saturating_sub(content.width),
            extent.height.saturating_sub(content.height),
        );
    }

    let is_leaf = matches!(node.kind, NodeKind::Text | NodeKind::Fixed);
    for &child in tree.children(idx) {
        match tree.node(child).style.display {
            Display::None => continue,
            Display::Absolute => {
                absolute::place_absolute(tree, dims, child, content, rects);
                solve_children(tree, dims, child, rects, scroll);
            }
            Display::Flow => {
                // Flow children under a leaf were never placed; skip them.
                if is_leaf {
                    continue;
                }
                solve_children(tree, dims, child, rects, scroll);
            }
        }
    }
}

/// Walk the tree assigning effective clips: `Visible` inherits, `Hidden`
/// and `Scroll` intersect their own box with the inherited clip.
fn assign_clips(
    tree: &LayoutTree,
    idx: usize,
    inherited: Rect,
    rects: &[Rect],
    clips: &mut [Rect],
) {
    let style = &tree.node(idx).style;
    if style.display == Display::None {
        return;
    }
    let clip = match style.overflow {
        Overflow::Visible => inherited,
        Overflow::Hidden | Overflow::Scroll => inherited.intersect(&rects[idx]),
    };
    clips[idx] = clip;
    for &child in tree.children(idx) {
        assign_clips(tree, child, clip, rects, clips);
    }
}
