//! Text wrapping for terminal layout.
//!
//! Wrapping produces *line slices* — byte ranges into the source text — so
//! the renderer can paint without copying and so the round-trip contract is
//! checkable: the slices are strictly ascending, and the bytes between two
//! consecutive slices are exactly the separators the wrapper consumed.
//!
//! Three modes:
//! - [`TextWrap::None`]: only hard `\n` breaks produce lines
//! - [`TextWrap::Word`]: break at word boundaries (UAX #29), falling back to
//!   grapheme breaks for words wider than the line
//! - [`TextWrap::Char`]: break at any grapheme boundary
//!
//! All modes handle explicit newlines as hard breaks, CJK wide characters,
//! emoji sequences (single clusters), and combining marks.
//!
//! # Trailing whitespace policy
//!
//! At a *soft* wrap in `Word` mode, the whitespace run at the break point is
//! consumed: it appears in neither the line ending at the break nor the line
//! starting after it. `Char` and `None` modes trim nothing. Whitespace at a
//! hard break is preserved verbatim, even when it overflows the line.
//!
//! All accumulated widths saturate at `u16::MAX`, so pathological inputs
//! (a single multi-kilocell word or whitespace run) degrade instead of
//! overflowing.

use std::cell::RefCell;

use unicode_segmentation::UnicodeSegmentation;

use crate::types::TextWrap;

use super::width::{grapheme_width, string_width};

/// One wrapped line: a byte range into the source text plus its measured
/// cell width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: usize,
    pub end: usize,
    pub width: u16,
}

impl Line {
    /// The line's text within its source.
    #[inline]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

thread_local! {
    // Scratch for the counting helpers, reused across calls.
    static LINE_SCRATCH: RefCell<Vec<Line>> = const { RefCell::new(Vec::new()) };
}

/// Wrap `text` into line slices.
///
/// `max_width: None` means indefinite (intrinsic measurement): only hard
/// breaks produce lines. A width of 0 is degenerate and also disables soft
/// wrapping. `out` is cleared first; empty input produces no lines.
pub fn wrap_lines(text: &str, max_width: Option<u16>, mode: TextWrap, out: &mut Vec<Line>) {
    out.clear();
    if text.is_empty() {
        return;
    }

    let soft_width = match (mode, max_width) {
        (TextWrap::None, _) | (_, None) | (_, Some(0)) => None,
        (_, Some(w)) => Some(w),
    };

    let mut line_start = 0usize;
    for raw in text.split('\n') {
        let raw_start = line_start;
        let raw_end = raw_start + raw.len();
        line_start = raw_end + 1; // skip the '\n'

        match soft_width {
            None => out.push(Line {
                start: raw_start,
                end: raw_end,
                width: string_width(raw),
            }),
            Some(w) => match mode {
                TextWrap::None => unreachable!("soft_width is None for TextWrap::None"),
                TextWrap::Char => wrap_line_char(raw, raw_start, w, out),
                TextWrap::Word => wrap_line_word(raw, raw_start, w, out),
            },
        }
    }
}

/// Break one hard line at grapheme boundaries.
///
/// A grapheme wider than `max_width` stands alone on its own line rather
/// than being split.
fn wrap_line_char(raw: &str, base: usize, max_width: u16, out: &mut Vec<Line>) {
    let mut start = 0usize;
    let mut end = 0usize;
    let mut width: u16 = 0;

    for (offset, grapheme) in raw.grapheme_indices(true) {
        let gw = grapheme_width(grapheme);
        if width as u32 + gw as u32 > max_width as u32 && width > 0 {
            out.push(Line {
                start: base + start,
                end: base + end,
                width,
            });
            start = offset;
            width = 0;
        }
        end = offset + grapheme.len();
        width = width.saturating_add(gw);
    }

    out.push(Line {
        start: base + start,
        end: base + end.max(start),
        width,
    });
}

/// Break one hard line at word boundaries.
fn wrap_line_word(raw: &str, base: usize, max_width: u16, out: &mut Vec<Line>) {
    // Current line: [start, end) with `width` cells committed.
    let mut start = 0usize;
    let mut end = 0usize;
    let mut width: u16 = 0;
    let mut started = false;
    // Whitespace run not yet committed: (start, end, width). Held back so a
    // wrap can consume it instead of leaving it trailing on the line.
    let mut pending: Option<(usize, usize, u16)> = None;

    let mut offset = 0usize;
    for segment in raw.split_word_bounds() {
        let seg_start = offset;
        offset += segment.len();
        let seg_width = segment
            .graphemes(true)
            .map(|g| grapheme_width(g) as u32)
            .sum::<u32>()
            .min(u16::MAX as u32) as u16;
        let is_ws = segment.chars().all(|c| c.is_whitespace());

        if is_ws && started {
            // Merge into the pending run; commit or consume on the next word.
            pending = Some(match pending {
                Some((ps, _, pw)) => (ps, offset, pw.saturating_add(seg_width)),
                None => (seg_start, offset, seg_width),
            });
            continue;
        }

        let pending_width = pending.map_or(0, |(_, _, w)| w);

        if started && width as u32 + pending_width as u32 + seg_width as u32 > max_width as u32 {
            // Soft wrap: close the line at the last word; the pending
            // whitespace run is consumed.
            out.push(Line {
                start: base + start,
                end: base + end,
                width,
            });
            pending = None;
            started = false;
            width = 0;
            start = seg_start;
            end = seg_start;
        }

        if seg_width > max_width {
            // Word wider than the line: force-break by grapheme.
            force_break_graphemes(
                segment, seg_start, base, max_width, out, &mut start, &mut end, &mut width,
            );
            started = width > 0 || end > start;
            continue;
        }

        if !started {
            start = seg_start;
            end = seg_start;
            started = true;
        } else if let Some((_, pe, pw)) = pending.take() {
            // The word after the whitespace fits: commit the run.
            end = pe;
            width = width.saturating_add(pw);
        }

        end = offset;
        width = width.saturating_add(seg_width);
    }

    // Trailing whitespace at the hard break is preserved verbatim.
    if let Some((ps, pe, pw)) = pending {
        if !started {
            start = ps;
        }
        end = pe;
        width = width.saturating_add(pw);
    }

    out.push(Line {
        start: base + start,
        end: base + end,
        width,
    });
}

/// Force-break a segment wider than `max_width` at grapheme boundaries,
/// continuing the current line state.
#[allow(clippy::too_many_arguments)]
fn force_break_graphemes(
    segment: &str,
    seg_start: usize,
    base: usize,
    max_width: u16,
    out: &mut Vec<Line>,
    start: &mut usize,
    end: &mut usize,
    width: &mut u16,
) {
    if *width == 0 && *end <= *start {
        *start = seg_start;
        *end = seg_start;
    }

    for (offset, grapheme) in segment.grapheme_indices(true) {
        let gw = grapheme_width(grapheme);
        if *width as u32 + gw as u32 > max_width as u32 && *width > 0 {
            out.push(Line {
                start: base + *start,
                end: base + *end,
                width: *width,
            });
            *start = seg_start + offset;
            *width = 0;
        }
        *end = seg_start + offset + grapheme.len();
        *width = width.saturating_add(gw);
    }
}

/// Number of lines `text` occupies when wrapped to `max_width`.
///
/// Returns 0 for empty text.
pub fn line_count(text: &str, max_width: Option<u16>, mode: TextWrap) -> u16 {
    LINE_SCRATCH.with(|scratch| {
        let mut lines = scratch.borrow_mut();
        wrap_lines(text, max_width, mode, &mut lines);
        lines.len().min(u16::MAX as usize) as u16
    })
}

/// Widest wrapped line of `text` at `max_width`.
pub fn wrapped_width(text: &str, max_width: Option<u16>, mode: TextWrap) -> u16 {
    LINE_SCRATCH.with(|scratch| {
        let mut lines = scratch.borrow_mut();
        wrap_lines(text, max_width, mode, &mut lines);
        lines.iter().map(|l| l.width).max().unwrap_or(0)
    })
}

/// Widest hard line: the width the text takes if never soft-wrapped.
pub fn max_content_width(text: &str) -> u16 {
    text.split('\n').map(string_width).max().unwrap_or(0)
}

/// Smallest width that avoids overflow and forced breaks beyond hard breaks.
///
/// - `Word`: the widest word (the widest unbreakable unit)
/// - `Char`: the widest grapheme cluster
/// - `None`: the widest hard line (soft wrapping never happens)
pub fn min_content_width(text: &str, mode: TextWrap) -> u16 {
    match mode {
        TextWrap::None => max_content_width(text),
        TextWrap::Char => text.graphemes(true).map(grapheme_width).max().unwrap_or(0),
        TextWrap::Word => text
            .split('\n')
            .flat_map(|line| line.split_word_bounds())
            .filter(|seg| !seg.chars().all(|c| c.is_whitespace()))
            .map(|seg| {
                seg.graphemes(true)
                    .map(|g| grapheme_width(g) as u32)
                    .sum::<u32>()
                    .min(u16::MAX as u32) as u16
            })
            .max()
            .unwrap_or(0),
    }
}

/// Truncate text to fit within `width` cells, appending `…` when cut.
///
/// Grapheme-aware: never cuts inside a cluster.
pub fn truncate_text(text: &str, width: u16) -> String {
    if width == 0 {
        return String::new();
    }
    if string_width(text) <= width {
        return text.to_string();
    }

    let target = width.saturating_sub(1);
    let mut result = String::new();
    let mut used: u16 = 0;

    for grapheme in text.graphemes(true) {
        let gw = grapheme_width(grapheme);
        if used as u32 + gw as u32 > target as u32 {
            break;
        }
        result.push_str(grapheme);
        used = used.saturating_add(gw);
    }

    result.push('…');
    result
}
