//! The stack/flex solver.
//!
//! Places the flow children of a `Box`/`Row`/`Column` (and `Custom`)
//! container inside its content box. Phases:
//!
//! 1. Basis resolution: explicit `basis`, else the explicit main size, else
//!    the content's max-content main size (measured under the container's
//!    cross extent so column text wraps before it is sized).
//! 2. Line breaking (`wrap: Wrap`): greedy, first-fit on outer basis sizes.
//! 3. Main settlement per line: grow through the integer distributor so
//!    grown lines sum exactly to the available space; shrink proportional to
//!    `shrink × basis` with a min-content floor, re-distributing at most
//!    once per child before leaving the rest as overflow.
//! 4. Cross sizing: one re-measure at the settled main size, stretch by
//!    default for auto cross sizes, `align_self` override per child.
//! 5. Placement: justify offsets (integer remainders via the distributor),
//!    reverse directions mirror the main axis, margins stay physical.
//!
//! The solver only positions direct children; recursion into them is the
//! engine's job. `Absolute` and `None` children are never touched here.

use std::cell::RefCell;

use smallvec::{smallvec, SmallVec};

use crate::layout::box_model::{clamp_size, resolve_size, sanitize_factor, SizeTarget};
use crate::layout::distribute::distribute_into;
use crate::layout::measure::{measure, AvailableSpace, Constraint};
use crate::layout::ResolvedDims;
use crate::tree::LayoutTree;
use crate::types::{
    Align, Dimension, Display, Edges, FlexDirection, FlexWrap, Justify, Overflow, Rect, Size,
};

// =============================================================================
// Items
// =============================================================================

struct FlexItem {
    idx: usize,
    margin: Edges,
    grow: f32,
    shrink: f32,
    /// Resolved flex basis (border-box main size before grow/shrink).
    basis: u16,
    /// Smallest main size shrink may reach.
    min_main: u16,
    /// Settled border-box main size.
    main: u16,
    /// Settled border-box cross size.
    cross: u16,
    /// Outer-box main offset within the content box, before mirroring.
    outer_start: u16,
    /// Border-box cross offset within the content box.
    cross_start: u16,
}

impl FlexItem {
    #[inline]
    fn outer_main(&self, dir: FlexDirection) -> u16 {
        self.main.saturating_add(self.margin.main(dir))
    }
}

#[inline]
const fn margin_main_start(margin: Edges, dir: FlexDirection) -> u16 {
    if dir.is_row() { margin.left } else { margin.top }
}

#[inline]
const fn margin_cross_start(margin: Edges, dir: FlexDirection) -> u16 {
    if dir.is_row() { margin.top } else { margin.left }
}

thread_local! {
    // Distributor output scratch, reused across lines and passes.
    static SHARE_SCRATCH: RefCell<Vec<u16>> = const { RefCell::new(Vec::new()) };
    static GAP_SCRATCH: RefCell<Vec<u16>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Solver
// =============================================================================

/// Place the flow children of container `idx` inside `content` (its content
/// box in absolute cells), writing each child's border-box rect.
///
/// Returns the content extent (how far children reach from the content-box
/// origin), which feeds scroll-range reporting.
pub(crate) fn solve_flex(
    tree: &LayoutTree,
    dims: &[ResolvedDims],
    idx: usize,
    content: Rect,
    rects: &mut [Rect],
) -> Size {
    let style = &tree.node(idx).style;
    let dir = style.direction;
    let gap = dims[idx].gap;
    let avail_main = if dir.is_row() { content.width } else { content.height };
    let avail_cross = if dir.is_row() { content.height } else { content.width };

    let mut items = collect_items(tree, dims, dir, idx, avail_main, avail_cross);
    if items.is_empty() {
        return Size::ZERO;
    }

    // ── line breaking ──
    let mut lines: SmallVec<[(usize, usize); 4]> = SmallVec::new();
    if style.wrap == FlexWrap::Wrap {
        let mut start = 0;
        let mut used: u32 = 0;
        for i in 0..items.len() {
            let outer = items[i].basis as u32 + items[i].margin.main(dir) as u32;
            if i > start && used + gap as u32 + outer > avail_main as u32 {
                lines.push((start, i));
                start = i;
                used = outer;
            } else {
                used += if i > start { gap as u32 + outer } else { outer };
            }
        }
        lines.push((start, items.len()));
    } else {
        lines.push((0, items.len()));
    }

    // ── per-line settlement and placement ──
    let mut cross_cursor: u16 = 0;
    let mut cross_extent: u16 = 0;
    for (li, &(a, b)) in lines.iter().enumerate() {
        if li > 0 {
            cross_cursor = cross_cursor.saturating_add(gap);
        }
        let line = &mut items[a..b];
        // A scroll container keeps children at their basis: overflow is
        // what the scroll range reports, not something to shrink away.
        let allow_shrink = style.overflow != Overflow::Scroll;
        settle_main(line, avail_main, gap, dir, allow_shrink);

        // One cross re-measure at the settled main size.
        let mut line_natural: u16 = 0;
        for it in line.iter_mut() {
            let cross_room = avail_cross.saturating_sub(it.margin.cross(dir));
            let c = if dir.is_row() {
                Constraint::new(
                    AvailableSpace::Definite(it.main),
                    AvailableSpace::Definite(cross_room),
                )
            } else {
                Constraint::new(
                    AvailableSpace::Definite(cross_room),
                    AvailableSpace::Definite(it.main),
                )
            };
            it.cross = measure(tree, dims, it.idx, c).cross(dir);
            line_natural =
                line_natural.max(it.cross.saturating_add(it.margin.cross(dir)));
        }
        let line_cross = if style.wrap == FlexWrap::Wrap {
            line_natural
        } else {
            avail_cross
        };

        apply_cross(tree, dims, line, dir, style.align_items, line_cross, cross_cursor, avail_cross);
        place_main(line, dir, style.justify, avail_main, gap);

        cross_cursor = cross_cursor.saturating_add(line_cross);
        cross_extent = cross_extent.max(cross_cursor);
    }

    // ── write rects, mirroring reverse directions ──
    let mut main_extent: u16 = 0;
    let (main_origin, cross_origin) = if dir.is_row() {
        (content.x, content.y)
    } else {
        (content.y, content.x)
    };
    for it in &items {
        let outer_main = it.outer_main(dir);
        let outer_start = if dir.is_reverse() {
            avail_main.saturating_sub(it.outer_start.saturating_add(outer_main))
        } else {
            it.outer_start
        };
        main_extent = main_extent.max(outer_start.saturating_add(outer_main));
        let main_pos = main_origin
            .saturating_add(outer_start)
            .saturating_add(margin_main_start(it.margin, dir));
        let cross_pos = cross_origin.saturating_add(it.cross_start);
        rects[it.idx] = if dir.is_row() {
            Rect::new(main_pos, cross_pos, it.main, it.cross)
        } else {
            Rect::new(cross_pos, main_pos, it.cross, it.main)
        };
    }

    Size::from_axes(dir, main_extent, cross_extent)
}

/// Gather flow children with resolved basis, floor, and factors.
fn collect_items(
    tree: &LayoutTree,
    dims: &[ResolvedDims],
    dir: FlexDirection,
    idx: usize,
    avail_main: u16,
    avail_cross: u16,
) -> SmallVec<[FlexItem; 8]> {
    let mut items = SmallVec::new();
    let parent_main = Some(avail_main);

    // Basis and floor measure under the container's cross extent so text in
    // a column reports its wrapped height, not its single-line height.
    let basis_constraint = if dir.is_row() {
        Constraint::new(AvailableSpace::MaxContent, AvailableSpace::Definite(avail_cross))
    } else {
        Constraint::new(AvailableSpace::Definite(avail_cross), AvailableSpace::MaxContent)
    };
    let floor_constraint = if dir.is_row() {
        Constraint::new(AvailableSpace::MinContent, AvailableSpace::Definite(avail_cross))
    } else {
        Constraint::new(AvailableSpace::Definite(avail_cross), AvailableSpace::MinContent)
    };
    let fit_constraint = if dir.is_row() {
        Constraint::new(AvailableSpace::Definite(avail_main), AvailableSpace::Definite(avail_cross))
    } else {
        Constraint::new(AvailableSpace::Definite(avail_cross), AvailableSpace::Definite(avail_main))
    };

    for &child in tree.children(idx) {
        let cs = &tree.node(child).style;
        if cs.display != Display::Flow {
            continue;
        }
        let (main_dim, min_dim, max_dim) = if dir.is_row() {
            (dims[child].width, cs.min_width, cs.max_width)
        } else {
            (dims[child].height, cs.min_height, cs.max_height)
        };

        let raw_basis = match resolve_size(cs.basis, parent_main) {
            SizeTarget::Definite(n) => n,
            SizeTarget::Auto | SizeTarget::FitContent => match resolve_size(main_dim, parent_main) {
                SizeTarget::Definite(n) => n,
                SizeTarget::FitContent => measure(tree, dims, child, fit_constraint).main(dir),
                SizeTarget::Auto => measure(tree, dims, child, basis_constraint).main(dir),
            },
        };
        let basis = clamp_size(raw_basis, min_dim, max_dim, parent_main);
        let min_main = clamp_size(
            measure(tree, dims, child, floor_constraint).main(dir),
            min_dim,
            max_dim,
            parent_main,
        );

        items.push(FlexItem {
            idx: child,
            margin: cs.margin,
            grow: sanitize_factor(cs.grow),
            shrink: sanitize_factor(cs.shrink),
            basis,
            min_main,
            main: basis,
            cross: 0,
            outer_start: 0,
            cross_start: 0,
        });
    }
    items
}

/// Settle main sizes for one line: grow into free space, or shrink down to
/// min-content floors. Grown lines fill the line exactly; deficits that no
/// child can absorb stay as overflow.
fn settle_main(
    line: &mut [FlexItem],
    avail_main: u16,
    gap: u16,
    dir: FlexDirection,
    allow_shrink: bool,
) {
    let gaps = gap as u32 * (line.len() as u32 - 1);
    let outer_sum: u32 = line
        .iter()
        .map(|it| it.basis as u32 + it.margin.main(dir) as u32)
        .sum();
    let used = outer_sum + gaps;

    for it in line.iter_mut() {
        it.main = it.basis;
    }

    if used < avail_main as u32 {
        let free = (avail_main as u32 - used) as u16;
        let weights: SmallVec<[f32; 8]> = line.iter().map(|it| it.grow).collect();
        if weights.iter().any(|&w| w > 0.0) {
            SHARE_SCRATCH.with(|scratch| {
                let mut extra = scratch.borrow_mut();
                distribute_into(free, &weights, &mut extra);
                for (it, &e) in line.iter_mut().zip(extra.iter()) {
                    it.main = it.main.saturating_add(e);
                }
            });
        }
        // All-zero grow: children keep their basis, the free space trails.
    } else if used > avail_main as u32 && allow_shrink {
        let mut deficit = (used - avail_main as u32).min(u16::MAX as u32) as u16;
        let mut frozen: SmallVec<[bool; 8]> = smallvec![false; line.len()];
        // Each round either clears the deficit or floors at least one child,
        // so this runs at most once per child.
        for _ in 0..line.len() {
            if deficit == 0 {
                break;
            }
            let weights: SmallVec<[f32; 8]> = line
                .iter()
                .zip(&frozen)
                .map(|(it, &f)| if f { 0.0 } else { it.shrink * it.basis as f32 })
                .collect();
            if !weights.iter().any(|&w| w > 0.0) {
                break;
            }
            SHARE_SCRATCH.with(|scratch| {
                let mut cuts = scratch.borrow_mut();
                distribute_into(deficit, &weights, &mut cuts);
                for (i, &cut) in cuts.iter().enumerate() {
                    let it = &mut line[i];
                    let take = cut.min(it.main.saturating_sub(it.min_main));
                    it.main -= take;
                    deficit -= take;
                    if it.main <= it.min_main {
                        frozen[i] = true;
                    }
                }
            });
        }
    }
}

/// Resolve each item's cross size and offset within its line.
fn apply_cross(
    tree: &LayoutTree,
    dims: &[ResolvedDims],
    line: &mut [FlexItem],
    dir: FlexDirection,
    align_items: Align,
    line_cross: u16,
    line_start: u16,
    avail_cross: u16,
) {
    let parent_cross = Some(avail_cross);
    for it in line.iter_mut() {
        let cs = &tree.node(it.idx).style;
        let (cross_dim, min_dim, max_dim) = if dir.is_row() {
            (dims[it.idx].height, cs.min_height, cs.max_height)
        } else {
            (dims[it.idx].width, cs.min_width, cs.max_width)
        };
        let align = cs.align_self.resolve(align_items);

        // Stretch fills the line only when the cross size is auto; explicit
        // sizes win over stretch.
        if align == Align::Stretch && matches!(cross_dim, Dimension::Auto) {
            it.cross = clamp_size(
                line_cross.saturating_sub(it.margin.cross(dir)),
                min_dim,
                max_dim,
                parent_cross,
            );
        }

        let outer = it.cross.saturating_add(it.margin.cross(dir));
        let slack = line_cross.saturating_sub(outer);
        let offset = match align {
            Align::Stretch | Align::Start => 0,
            Align::Center => slack / 2,
            Align::End => slack,
        };
        it.cross_start = line_start
            .saturating_add(offset)
            .saturating_add(margin_cross_start(it.margin, dir));
    }
}

/// Assign outer-box main offsets for one line per the justify mode.
fn place_main(line: &mut [FlexItem], dir: FlexDirection, justify: Justify, avail_main: u16, gap: u16) {
    let gaps = gap as u32 * (line.len() as u32 - 1);
    let used: u32 = line.iter().map(|it| it.outer_main(dir) as u32).sum::<u32>() + gaps;
    let free = (avail_main as u32).saturating_sub(used).min(u16::MAX as u32) as u16;

    GAP_SCRATCH.with(|scratch| {
        let mut between = scratch.borrow_mut();
        let lead = justify_spacing(justify, free, line.len(), &mut between);
        let mut cursor: u32 = lead as u32;
        for (k, it) in line.iter_mut().enumerate() {
            it.outer_start = cursor.min(u16::MAX as u32) as u16;
            cursor += it.outer_main(dir) as u32;
            if k < between.len() {
                cursor += gap as u32 + between[k] as u32;
            }
        }
    });
}

/// Fill `between` with per-gap extra space (one entry per gap) and return
/// the leading offset for a justify mode. Remainders settle through the
/// integer distributor so spacing is deterministic.
fn justify_spacing(justify: Justify, free: u16, count: usize, between: &mut Vec<u16>) -> u16 {
    between.clear();
    between.resize(count.saturating_sub(1), 0);
    match justify {
        Justify::Start => 0,
        Justify::End => free,
        Justify::Center => free / 2,
        Justify::SpaceBetween => {
            if count > 1 {
                let shares: SmallVec<[f32; 8]> = smallvec![1.0; count - 1];
                distribute_into(free, &shares, between);
            }
            0
        }
        Justify::SpaceAround | Justify::SpaceEvenly => {
            if count == 0 {
                return 0;
            }
            // One slot per gap plus the two edges: half-size edges for
            // SpaceAround, equal edges for SpaceEvenly.
            let mut shares: SmallVec<[f32; 8]> = smallvec![1.0; count + 1];
            if justify == Justify::SpaceAround {
                for w in shares.iter_mut().skip(1).take(count - 1) {
                    *w = 2.0;
                }
            }
            SHARE_SCRATCH.with(|scratch| {
                let mut slots = scratch.borrow_mut();
                distribute_into(free, &shares, &mut slots);
                between.clear();
                between.extend_from_slice(&slots[1..count]);
                slots[0]
            })
        }
    }
}
