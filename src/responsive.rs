//! Responsive value resolution.
//!
//! A style value may be a plain value, a breakpoint map keyed by viewport
//! width, or a fluid expression interpolated between two viewport anchors.
//! Resolution happens once per pass, before any value reaches the box model
//! or the solvers, so the rest of the engine only ever sees concrete values.

use crate::types::Dimension;

// =============================================================================
// Fluid
// =============================================================================

/// A value interpolated linearly between two viewport widths.
///
/// Below `from_width` the value is `min`; above `to_width` it is `max`;
/// between them it is floor-rounded linear interpolation. The result is
/// always clamped to `[min, max]`, with `max` authoritative if the caller
/// supplies `min > max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fluid {
    pub min: u16,
    pub max: u16,
    pub from_width: u16,
    pub to_width: u16,
}

impl Fluid {
    pub const fn new(min: u16, max: u16, from_width: u16, to_width: u16) -> Self {
        Self {
            min,
            max,
            from_width,
            to_width,
        }
    }

    /// Resolve against the current viewport width.
    pub fn resolve(&self, viewport_width: u16) -> u16 {
        let lo = self.min.min(self.max);
        let hi = self.max;

        if self.to_width <= self.from_width {
            // Degenerate anchor range: step function at from_width.
            let v = if viewport_width < self.from_width {
                self.min
            } else {
                self.max
            };
            return v.clamp(lo, hi.max(lo));
        }

        if viewport_width <= self.from_width {
            return self.min.clamp(lo, hi.max(lo));
        }
        if viewport_width >= self.to_width {
            return self.max.clamp(lo, hi.max(lo));
        }

        let span = (self.to_width - self.from_width) as i32;
        let progress = (viewport_width - self.from_width) as i32;
        let delta = self.max as i32 - self.min as i32;
        let v = self.min as i32 + delta * progress / span;
        (v.max(0) as u16).clamp(lo, hi.max(lo))
    }
}

// =============================================================================
// Responsive
// =============================================================================

/// A fluid expression has to produce a typed value; cell counts map
/// directly, dimensions become absolute cells.
pub trait FromCells: Copy {
    fn from_cells(cells: u16) -> Self;
}

impl FromCells for u16 {
    #[inline]
    fn from_cells(cells: u16) -> Self {
        cells
    }
}

impl FromCells for Dimension {
    #[inline]
    fn from_cells(cells: u16) -> Self {
        Dimension::Cells(cells)
    }
}

/// A style value that may vary with the viewport.
#[derive(Debug, Clone, PartialEq)]
pub enum Responsive<T> {
    /// A concrete value, independent of the viewport.
    Value(T),
    /// Viewport-width breakpoints: `(min_width, value)` pairs. The entry
    /// with the largest `min_width <= viewport` wins; if none qualifies the
    /// first entry is the base value. Values nest recursively, so a
    /// breakpoint may itself hold a fluid expression.
    Breakpoints(Vec<(u16, Responsive<T>)>),
    /// Clamped linear interpolation between two viewport anchors.
    Fluid(Fluid),
}

impl<T: FromCells + Default> Responsive<T> {
    /// Resolve to a concrete value for the given viewport width.
    pub fn resolve(&self, viewport_width: u16) -> T {
        match self {
            Self::Value(v) => *v,
            Self::Fluid(f) => T::from_cells(f.resolve(viewport_width)),
            Self::Breakpoints(entries) => {
                if entries.is_empty() {
                    return T::default();
                }
                let mut chosen = &entries[0].1;
                let mut chosen_width = None;
                for (min_width, value) in entries {
                    if *min_width <= viewport_width
                        && chosen_width.is_none_or(|w| *min_width >= w)
                    {
                        chosen = value;
                        chosen_width = Some(*min_width);
                    }
                }
                chosen.resolve(viewport_width)
            }
        }
    }
}

impl<T> From<T> for Responsive<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── fluid ──

    #[test]
    fn fluid_below_range() {
        let f = Fluid::new(10, 30, 40, 120);
        assert_eq!(f.resolve(20), 10);
        assert_eq!(f.resolve(40), 10);
    }

    #[test]
    fn fluid_above_range() {
        let f = Fluid::new(10, 30, 40, 120);
        assert_eq!(f.resolve(120), 30);
        assert_eq!(f.resolve(500), 30);
    }

    #[test]
    fn fluid_interpolates_floored() {
        let f = Fluid::new(10, 30, 40, 120);
        // Midpoint: 10 + 20 * 40/80 = 20.
        assert_eq!(f.resolve(80), 20);
        // 10 + 20 * 30/80 = 17.5 → floor 17.
        assert_eq!(f.resolve(70), 17);
    }

    #[test]
    fn fluid_degenerate_range_steps() {
        let f = Fluid::new(5, 9, 80, 80);
        assert_eq!(f.resolve(79), 5);
        assert_eq!(f.resolve(80), 9);
    }

    #[test]
    fn fluid_inverted_bounds_max_wins() {
        // min > max: clamp treats max as authoritative.
        let f = Fluid::new(30, 10, 40, 120);
        assert_eq!(f.resolve(0), 10);
        assert_eq!(f.resolve(500), 10);
    }

    // ── breakpoints ──

    #[test]
    fn breakpoints_pick_largest_matching() {
        let r: Responsive<u16> = Responsive::Breakpoints(vec![
            (0, Responsive::Value(1)),
            (80, Responsive::Value(2)),
            (120, Responsive::Value(3)),
        ]);
        assert_eq!(r.resolve(40), 1);
        assert_eq!(r.resolve(80), 2);
        assert_eq!(r.resolve(119), 2);
        assert_eq!(r.resolve(200), 3);
    }

    #[test]
    fn breakpoints_fall_back_to_first() {
        let r: Responsive<u16> =
            Responsive::Breakpoints(vec![(100, Responsive::Value(7)), (200, Responsive::Value(9))]);
        // Viewport below every breakpoint: first entry is the base.
        assert_eq!(r.resolve(50), 7);
    }

    #[test]
    fn breakpoints_nest_fluid() {
        let r: Responsive<u16> = Responsive::Breakpoints(vec![
            (0, Responsive::Value(4)),
            (80, Responsive::Fluid(Fluid::new(10, 20, 80, 160))),
        ]);
        assert_eq!(r.resolve(40), 4);
        assert_eq!(r.resolve(80), 10);
        assert_eq!(r.resolve(120), 15);
        assert_eq!(r.resolve(160), 20);
    }

    #[test]
    fn breakpoints_empty_defaults() {
        let r: Responsive<u16> = Responsive::Breakpoints(vec![]);
        assert_eq!(r.resolve(80), 0);
    }

    #[test]
    fn fluid_into_dimension() {
        let r: Responsive<Dimension> = Responsive::Fluid(Fluid::new(10, 30, 40, 120));
        assert_eq!(r.resolve(80), Dimension::Cells(20));
    }
}
