//! Integer remainder distribution.
//!
//! Converts fractional share targets into integers that sum exactly to a
//! budget. Shared by flex settlement, percentage sizing, and grid track
//! sizing so every consumer rounds the same way and nothing drifts.
//!
//! Policy: each share gets the floor of its proportional cut; the leftover
//! cells are handed out one at a time to the shares with the largest
//! fractional remainder, ties broken by lower original index.

/// Distribute `total` cells across proportional `shares`.
///
/// NaN and negative shares are read as zero. If every share is zero the
/// budget stays unallocated and the output is all zeros. The output always
/// sums to exactly `total` when any share is positive.
pub fn distribute(total: u16, shares: &[f32]) -> Vec<u16> {
    let mut out = Vec::new();
    distribute_into(total, shares, &mut out);
    out
}

/// As [`distribute`], writing into a caller-owned buffer (cleared first) so
/// per-frame callers can reuse scratch.
pub fn distribute_into(total: u16, shares: &[f32], out: &mut Vec<u16>) {
    out.clear();
    if shares.is_empty() {
        return;
    }

    let sum: f64 = shares
        .iter()
        .map(|&s| if s.is_finite() && s > 0.0 { s as f64 } else { 0.0 })
        .sum();

    if sum <= 0.0 {
        out.resize(shares.len(), 0);
        return;
    }

    out.reserve(shares.len());
    let mut allocated: u16 = 0;
    // (fractional remainder, index), filled while flooring.
    let mut remainders: Vec<(f64, usize)> = Vec::with_capacity(shares.len());

    for (i, &s) in shares.iter().enumerate() {
        let share = if s.is_finite() && s > 0.0 { s as f64 } else { 0.0 };
        let exact = total as f64 * share / sum;
        let floor = exact.floor();
        out.push(floor as u16);
        allocated = allocated.saturating_add(floor as u16);
        remainders.push((exact - floor, i));
    }

    let mut leftover = total.saturating_sub(allocated);

    // Largest fractional remainder first; ties by lower original index.
    remainders.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal).then(a.1.cmp(&b.1)));

    for &(_, i) in &remainders {
        if leftover == 0 {
            break;
        }
        out[i] += 1;
        leftover -= 1;
    }
}
