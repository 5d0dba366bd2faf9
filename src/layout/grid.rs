//! The grid solver.
//!
//! A `Grid` container carries fractional track weights per axis. An empty
//! column template means a single column; rows beyond the row template are
//! implicit and weigh 1.0 each. Placement runs in two passes: children with
//! an explicit `row` and `column` land first and mark the occupancy map,
//! then the rest auto-place in document order, scanning row-major for the
//! first span-sized hole. Track extents settle through the integer
//! distributor, and a span covers its tracks plus the interior gaps.
//!
//! Placement is geometric only: rects are written per child index, so draw
//! and event order remain document order regardless of where a child lands.

use crate::layout::distribute::distribute;
use crate::layout::measure::{measure, Constraint};
use crate::layout::ResolvedDims;
use crate::tree::LayoutTree;
use crate::types::{Display, Rect, Size};

// =============================================================================
// Occupancy map
// =============================================================================

/// Row-major grid of filled cells with a fixed column count. Rows grow on
/// demand; cells beyond the current row count read as free.
pub(crate) struct OccupancyMap {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl OccupancyMap {
    pub(crate) fn new(cols: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: 0,
            cells: Vec::new(),
        }
    }

    #[inline]
    fn occupied(&self, row: usize, col: usize) -> bool {
        row < self.rows && self.cells[row * self.cols + col]
    }

    /// Whether a `row_span × col_span` area at (row, col) is entirely free
    /// and inside the column range.
    pub(crate) fn fits(&self, row: usize, col: usize, row_span: usize, col_span: usize) -> bool {
        if col + col_span > self.cols {
            return false;
        }
        for r in row..row + row_span {
            for c in col..col + col_span {
                if self.occupied(r, c) {
                    return false;
                }
            }
        }
        true
    }

    /// Mark an area as filled, growing rows as needed.
    pub(crate) fn mark(&mut self, row: usize, col: usize, row_span: usize, col_span: usize) {
        let need = row + row_span;
        if need > self.rows {
            self.cells.resize(need * self.cols, false);
            self.rows = need;
        }
        for r in row..row + row_span {
            for c in col..(col + col_span).min(self.cols) {
                self.cells[r * self.cols + c] = true;
            }
        }
    }
}

// =============================================================================
// Placement
// =============================================================================

struct GridItem {
    idx: usize,
    row: usize,
    col: usize,
    row_span: usize,
    col_span: usize,
}

/// Place the flow children of grid `idx` into tracks. Returns the items and
/// the total row count.
fn place_children(tree: &LayoutTree, idx: usize, col_count: usize) -> (Vec<GridItem>, usize) {
    let mut map = OccupancyMap::new(col_count);
    let mut items: Vec<GridItem> = Vec::new();

    // Pass 1: explicit placements, in document order. Out-of-range columns
    // clamp into the template; explicit items may overlap each other.
    for &child in tree.children(idx) {
        let cs = &tree.node(child).style;
        if cs.display != Display::Flow {
            continue;
        }
        let g = &cs.grid;
        let row_span = (g.row_span.max(1)) as usize;
        let col_span = (g.col_span.max(1)) as usize;
        let placed = match (g.row, g.column) {
            (Some(r), Some(c)) => {
                let col = (c as usize).min(col_count - 1);
                let col_span = col_span.min(col_count - col);
                map.mark(r as usize, col, row_span, col_span);
                Some(GridItem {
                    idx: child,
                    row: r as usize,
                    col,
                    row_span,
                    col_span,
                })
            }
            _ => None,
        };
        if let Some(item) = placed {
            items.push(item);
        } else {
            // Placeholder keeps document order; filled by pass 2.
            items.push(GridItem {
                idx: child,
                row: usize::MAX,
                col: 0,
                row_span,
                col_span,
            });
        }
    }

    // Pass 2: auto-place the rest, row-major first fit.
    for item in items.iter_mut().filter(|it| it.row == usize::MAX) {
        let col_span = item.col_span.min(col_count);
        let mut placed_at = None;
        let mut row = 0;
        while placed_at.is_none() {
            for col in 0..=col_count - col_span {
                if map.fits(row, col, item.row_span, col_span) {
                    placed_at = Some((row, col));
                    break;
                }
            }
            row += 1;
        }
        // The scan always terminates: fresh rows below the occupied area
        // are free by construction.
        if let Some((r, c)) = placed_at {
            map.mark(r, c, item.row_span, col_span);
            item.row = r;
            item.col = c;
            item.col_span = col_span;
        }
    }

    let row_count = items.iter().map(|it| it.row + it.row_span).max().unwrap_or(0);
    (items, row_count)
}

#[inline]
fn column_count(tree: &LayoutTree, idx: usize) -> usize {
    tree.node(idx).style.grid.columns.len().max(1)
}

/// Row weights: the template where it reaches, 1.0 for implicit rows.
fn row_weights(tree: &LayoutTree, idx: usize, row_count: usize) -> Vec<f32> {
    let template = &tree.node(idx).style.grid.rows;
    (0..row_count)
        .map(|i| template.get(i).copied().unwrap_or(1.0))
        .collect()
}

// =============================================================================
// Solving
// =============================================================================

/// Size a span of tracks: the covered tracks plus the interior gaps.
fn span_extent(tracks: &[u16], start: usize, span: usize, gap: u16) -> u16 {
    let cells: u32 = tracks[start..(start + span).min(tracks.len())]
        .iter()
        .map(|&t| t as u32)
        .sum();
    let gaps = gap as u32 * span.saturating_sub(1) as u32;
    (cells + gaps).min(u16::MAX as u32) as u16
}

/// Offset of track `i` from the content origin.
fn track_offset(tracks: &[u16], i: usize, gap: u16) -> u16 {
    let cells: u32 = tracks[..i.min(tracks.len())].iter().map(|&t| t as u32).sum();
    (cells + gap as u32 * i as u32).min(u16::MAX as u32) as u16
}

/// Place the flow children of grid container `idx` inside `content`,
/// writing each child's border-box rect. Returns the content extent.
pub(crate) fn solve_grid(
    tree: &LayoutTree,
    dims: &[ResolvedDims],
    idx: usize,
    content: Rect,
    rects: &mut [Rect],
) -> Size {
    let gap = dims[idx].gap;
    let col_count = column_count(tree, idx);
    let (items, row_count) = place_children(tree, idx, col_count);
    if items.is_empty() {
        return Size::ZERO;
    }

    let col_weights: Vec<f32> = {
        let template = &tree.node(idx).style.grid.columns;
        if template.is_empty() {
            vec![1.0]
        } else {
            template.clone()
        }
    };
    let col_budget = content
        .width
        .saturating_sub(gap.saturating_mul(col_count.saturating_sub(1) as u16));
    let row_budget = content
        .height
        .saturating_sub(gap.saturating_mul(row_count.saturating_sub(1) as u16));

    let col_tracks = distribute(col_budget, &col_weights);
    let row_tracks = distribute(row_budget, &row_weights(tree, idx, row_count));

    for item in &items {
        let x = content.x.saturating_add(track_offset(&col_tracks, item.col, gap));
        let y = content.y.saturating_add(track_offset(&row_tracks, item.row, gap));
        let w = span_extent(&col_tracks, item.col, item.col_span, gap);
        let h = span_extent(&row_tracks, item.row, item.row_span, gap);
        rects[item.idx] = Rect::new(x, y, w, h);
    }

    Size::new(
        span_extent(&col_tracks, 0, col_count, gap),
        span_extent(&row_tracks, 0, row_count, gap),
    )
}

/// Intrinsic size of a grid container: per-track naturals from child
/// measurement, spans contributing a per-track share.
pub(crate) fn measure_grid(
    tree: &LayoutTree,
    dims: &[ResolvedDims],
    idx: usize,
    constraint: Constraint,
) -> Size {
    let style = &tree.node(idx).style;
    let gap = dims[idx].gap;
    let insets = style.padding.add(style.border);
    let col_count = column_count(tree, idx);
    let (items, row_count) = place_children(tree, idx, col_count);

    let child_constraint = Constraint::new(
        constraint.width.shrink(insets.horizontal()),
        constraint.height.shrink(insets.vertical()),
    );

    let mut col_natural = vec![0u16; col_count];
    let mut row_natural = vec![0u16; row_count];
    for item in &items {
        let size = measure(tree, dims, item.idx, child_constraint);
        let per_col = size.width.div_ceil(item.col_span.max(1) as u16);
        let per_row = size.height.div_ceil(item.row_span.max(1) as u16);
        for c in item.col..(item.col + item.col_span).min(col_count) {
            col_natural[c] = col_natural[c].max(per_col);
        }
        for r in item.row..(item.row + item.row_span).min(row_count) {
            row_natural[r] = row_natural[r].max(per_row);
        }
    }

    let width: u32 = col_natural.iter().map(|&c| c as u32).sum::<u32>()
        + gap as u32 * col_count.saturating_sub(1) as u32
        + insets.horizontal() as u32;
    let height: u32 = row_natural.iter().map(|&r| r as u32).sum::<u32>()
        + gap as u32 * row_count.saturating_sub(1) as u32
        + insets.vertical() as u32;
    Size::new(
        width.min(u16::MAX as u32) as u16,
        height.min(u16::MAX as u32) as u16,
    )
}
