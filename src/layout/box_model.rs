//! Box model resolution.
//!
//! Normalizes raw style expressions into concrete numeric bounds: padding,
//! border, and margin insets, and a per-axis size target that downstream
//! solvers can act on. Malformed input (NaN, negative, `min > max`) resolves
//! deterministically instead of failing the pass.

use crate::types::Dimension;

/// A resolved size along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTarget {
    /// A concrete cell count.
    Definite(u16),
    /// Defer to flex/grid/intrinsic logic.
    Auto,
    /// Defer to the intrinsic measurer: min(max-content, available).
    FitContent,
}

/// Clamp a grow/shrink factor to a sane non-negative value.
#[inline]
pub fn sanitize_factor(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Resolve a dimension against an optional definite parent extent.
///
/// Percentages floor-round and need a definite parent; with an indefinite
/// parent they fall back to `Auto` (intrinsic sizing).
pub fn resolve_size(dim: Dimension, parent: Option<u16>) -> SizeTarget {
    match dim {
        Dimension::Auto => SizeTarget::Auto,
        Dimension::Cells(n) => SizeTarget::Definite(n),
        Dimension::Percent(p) => match parent {
            Some(base) => {
                let p = if p.is_finite() && p > 0.0 { p } else { 0.0 };
                let cells = (base as f32 * p / 100.0).floor();
                SizeTarget::Definite(cells.min(u16::MAX as f32) as u16)
            }
            None => SizeTarget::Auto,
        },
        Dimension::FitContent => SizeTarget::FitContent,
    }
}

/// Resolve a min/max constraint to cells; `Auto` and `FitContent` mean
/// "unset" here.
fn resolve_bound(dim: Dimension, parent: Option<u16>) -> Option<u16> {
    match resolve_size(dim, parent) {
        SizeTarget::Definite(n) => Some(n),
        SizeTarget::Auto | SizeTarget::FitContent => None,
    }
}

/// Apply min/max clamps to a resolved base size.
///
/// Min is applied first and max last, so a malformed `min > max` pair
/// resolves with max authoritative.
pub fn clamp_size(value: u16, min: Dimension, max: Dimension, parent: Option<u16>) -> u16 {
    let mut v = value;
    if let Some(lo) = resolve_bound(min, parent) {
        v = v.max(lo);
    }
    if let Some(hi) = resolve_bound(max, parent) {
        v = v.min(hi);
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_fixed_and_auto() {
        assert_eq!(resolve_size(Dimension::Cells(40), Some(100)), SizeTarget::Definite(40));
        assert_eq!(resolve_size(Dimension::Auto, Some(100)), SizeTarget::Auto);
        assert_eq!(resolve_size(Dimension::FitContent, None), SizeTarget::FitContent);
    }

    #[test]
    fn percent_floors() {
        assert_eq!(resolve_size(Dimension::Percent(50.0), Some(101)), SizeTarget::Definite(50));
        assert_eq!(resolve_size(Dimension::Percent(33.0), Some(10)), SizeTarget::Definite(3));
    }

    #[test]
    fn percent_without_parent_is_intrinsic() {
        assert_eq!(resolve_size(Dimension::Percent(50.0), None), SizeTarget::Auto);
    }

    #[test]
    fn percent_sanitizes_garbage() {
        assert_eq!(resolve_size(Dimension::Percent(f32::NAN), Some(100)), SizeTarget::Definite(0));
        assert_eq!(resolve_size(Dimension::Percent(-20.0), Some(100)), SizeTarget::Definite(0));
        // Over 100% is allowed.
        assert_eq!(resolve_size(Dimension::Percent(150.0), Some(100)), SizeTarget::Definite(150));
    }

    #[test]
    fn clamp_applies_min_then_max() {
        assert_eq!(clamp_size(5, Dimension::Cells(10), Dimension::Auto, None), 10);
        assert_eq!(clamp_size(50, Dimension::Auto, Dimension::Cells(20), None), 20);
    }

    #[test]
    fn clamp_max_wins_over_min() {
        // min > max: max is authoritative.
        assert_eq!(clamp_size(15, Dimension::Cells(30), Dimension::Cells(10), None), 10);
    }

    #[test]
    fn clamp_percent_bounds() {
        assert_eq!(
            clamp_size(80, Dimension::Auto, Dimension::Percent(50.0), Some(100)),
            50
        );
    }

    #[test]
    fn factor_sanitization() {
        assert_eq!(sanitize_factor(2.5), 2.5);
        assert_eq!(sanitize_factor(-1.0), 0.0);
        assert_eq!(sanitize_factor(f32::NAN), 0.0);
        assert_eq!(sanitize_factor(f32::INFINITY), 0.0);
    }
}
