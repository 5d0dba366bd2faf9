//! Text measurement and wrapping.
//!
//! Terminal text width depends on Unicode character widths: ASCII is 1 cell,
//! CJK and most emoji are 2, combining marks and controls are 0. Wrapping
//! operates on grapheme clusters so a user-perceived character is never
//! split across lines.

mod width;
mod wrap;

pub use width::{char_width, grapheme_width, string_width};
pub use wrap::{
    line_count, max_content_width, min_content_width, truncate_text, wrap_lines, wrapped_width,
    Line,
};
