//! Cell width measurement for terminal text.
//!
//! Measures the display width of characters, grapheme clusters, and strings
//! in terminal cells. Uses Unicode East Asian Width for character widths and
//! grapheme cluster analysis for emoji sequences.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Display width of a single Unicode codepoint in terminal cells.
///
/// - `0` for control characters, combining marks, zero-width characters
/// - `1` for normal-width characters (ASCII, Latin, Cyrillic, etc.)
/// - `2` for wide characters (CJK ideographs, fullwidth forms)
#[inline]
pub fn char_width(c: char) -> u16 {
    // Force known emoji ranges to width 2 (terminal renderers usually treat them as wide)
    match c as u32 {
        // Sparkles ✨, Zap ⚡, etc
        0x2600..=0x27BF => 2,
        // Misc Symbols and Pictographs (typical emojis)
        0x1F300..=0x1F5FF => 2,
        // Emoticons (😀)
        0x1F600..=0x1F64F => 2,
        // Transport and Map Symbols (🚀)
        0x1F680..=0x1F6FF => 2,
        // Supplemental Symbols and Pictographs
        0x1F900..=0x1F9FF => 2,
        // Symbols and Pictographs Extended-A
        0x1FA70..=0x1FAFF => 2,
        _ => c.width().unwrap_or(0) as u16,
    }
}

/// Display width of a grapheme cluster in terminal cells.
///
/// A grapheme cluster is a user-perceived character that may span multiple
/// Unicode codepoints (`é` as e + combining acute, flag pairs, ZWJ emoji
/// sequences, skin-tone modifiers).
///
/// # Rules
///
/// 1. Single codepoint → delegates to `char_width()`
/// 2. Emoji sequence (contains ZWJ, VS16, skin tone, keycap) → 2
/// 3. Regional indicator pair (flags) → 2
/// 4. Base + combining marks → base character width
pub fn grapheme_width(grapheme: &str) -> u16 {
    let mut chars = grapheme.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return 0,
    };

    // Single codepoint: use char_width for proper emoji handling.
    if grapheme.len() == first.len_utf8() {
        return char_width(first);
    }

    // Multi-codepoint grapheme cluster.

    // Regional indicator pair (flag emoji: 🇺🇸)
    let first_cp = first as u32;
    if (0x1F1E6..=0x1F1FF).contains(&first_cp) {
        return 2;
    }

    // Scan trailing codepoints for emoji sequence modifiers.
    for c in grapheme.chars().skip(1) {
        match c as u32 {
            0x200D => return 2,            // Zero-Width Joiner → ZWJ sequence
            0xFE0F => return 2,            // VS16 → emoji presentation
            0x1F3FB..=0x1F3FF => return 2, // Fitzpatrick skin tone modifier
            0x20E3 => return 2,            // Combining enclosing keycap
            _ => {}
        }
    }

    // Base character + combining marks → base width only.
    first.width().unwrap_or(0) as u16
}

/// Display width of a string in terminal cells.
///
/// Handles East Asian wide characters (CJK = 2 cells), emoji sequences
/// (ZWJ, skin tones, flags = 2 cells), combining marks and control
/// characters (zero-width). Text runs reach the engine already stripped of
/// styling, so no escape-sequence handling happens here.
///
/// # Performance
///
/// Fast path for pure ASCII strings (byte counting, no grapheme iteration).
pub fn string_width(s: &str) -> u16 {
    if s.is_empty() {
        return 0;
    }

    // Fast path: pure ASCII. Count printable bytes directly.
    if s.is_ascii() {
        return s.bytes().filter(|&b| b >= 0x20).count().min(u16::MAX as usize) as u16;
    }

    s.graphemes(true)
        .map(|g| grapheme_width(g) as u32)
        .sum::<u32>()
        .min(u16::MAX as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── char_width ──

    #[test]
    fn char_width_ascii() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width(' '), 1);
        assert_eq!(char_width('~'), 1);
    }

    #[test]
    fn char_width_control() {
        assert_eq!(char_width('\0'), 0);
        assert_eq!(char_width('\t'), 0);
        assert_eq!(char_width('\n'), 0);
    }

    #[test]
    fn char_width_cjk() {
        assert_eq!(char_width('你'), 2);
        assert_eq!(char_width('好'), 2);
        assert_eq!(char_width('한'), 2);
    }

    #[test]
    fn char_width_fullwidth() {
        assert_eq!(char_width('Ａ'), 2);
        assert_eq!(char_width('０'), 2);
    }

    #[test]
    fn char_width_combining() {
        assert_eq!(char_width('\u{0300}'), 0);
        assert_eq!(char_width('\u{0301}'), 0);
    }

    #[test]
    fn char_width_emoji() {
        assert_eq!(char_width('😀'), 2);
        assert_eq!(char_width('🚀'), 2);
    }

    // ── grapheme_width ──

    #[test]
    fn grapheme_single_char() {
        assert_eq!(grapheme_width("a"), 1);
        assert_eq!(grapheme_width("你"), 2);
        assert_eq!(grapheme_width("😀"), 2);
    }

    #[test]
    fn grapheme_combining_marks() {
        // e + combining acute = é (width 1, not 2)
        assert_eq!(grapheme_width("e\u{0301}"), 1);
        assert_eq!(grapheme_width("a\u{030A}"), 1);
    }

    #[test]
    fn grapheme_emoji_zwj_sequence() {
        // Family: man + ZWJ + woman + ZWJ + girl + ZWJ + boy
        assert_eq!(grapheme_width("👨\u{200D}👩\u{200D}👧\u{200D}👦"), 2);
    }

    #[test]
    fn grapheme_flag() {
        assert_eq!(grapheme_width("🇺🇸"), 2);
    }

    #[test]
    fn grapheme_keycap() {
        assert_eq!(grapheme_width("1\u{FE0F}\u{20E3}"), 2);
    }

    // ── string_width ──

    #[test]
    fn string_width_ascii() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width(""), 0);
        assert_eq!(string_width("a b c"), 5);
    }

    #[test]
    fn string_width_control_chars() {
        assert_eq!(string_width("\t"), 0);
        assert_eq!(string_width("a\tb"), 2);
    }

    #[test]
    fn string_width_cjk() {
        assert_eq!(string_width("你好"), 4);
        assert_eq!(string_width("hello你好"), 9);
    }

    #[test]
    fn string_width_emoji_sequence() {
        // Family ZWJ sequence should be width 2, not 8
        assert_eq!(string_width("👨\u{200D}👩\u{200D}👧\u{200D}👦"), 2);
    }

    #[test]
    fn string_width_combining() {
        // "café" with combining acute on e
        assert_eq!(string_width("cafe\u{0301}"), 4);
    }
}
