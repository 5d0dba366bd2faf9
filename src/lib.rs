//! flexcell - the layout engine of a terminal UI framework.
//!
//! Takes an ordered, id-stable node tree plus a viewport and produces an
//! integer-cell border-box rect and an effective clip rect per node, along
//! with per-subtree stability signatures the caller can use to skip work.
//!
//! # Architecture
//!
//! ```text
//! LayoutTree + Viewport
//!      │
//!      │ responsive resolution (breakpoints, fluid → concrete values)
//!      ▼
//!   box model ──► intrinsic measure ──► flex / grid solve ──► absolute pass
//!  (size targets,  (min/max-content,     (lines, grow/shrink,   (offset pairs,
//!   insets, clamps) grapheme wrapping)    tracks, occupancy)     implied sizes)
//!      │
//!      ▼ clip pass (Hidden/Scroll intersect, Visible inherits)
//!   ComputedLayout: rects, clips, scroll ranges
//! ```
//!
//! # Rules
//!
//! - Layout is a pure function: no I/O, no clocks, no randomness. The same
//!   tree and viewport always produce identical output.
//! - Every operation is total. Malformed styles (NaN factors, negative
//!   percentages, `min > max`) degrade deterministically instead of failing.
//! - Everything is integer terminal cells (`u16`); fractional cuts settle
//!   through one shared largest-remainder distributor so nothing drifts.
//! - Text is wrapped on grapheme clusters with East Asian widths, so a CJK
//!   character or a ZWJ emoji sequence is never split across lines.

pub mod layout;
pub mod responsive;
pub mod signature;
pub mod tree;
pub mod types;

pub use layout::distribute::{distribute, distribute_into};
pub use layout::engine::{compute_layout, ComputedLayout};
pub use layout::measure::{AvailableSpace, Constraint};
pub use layout::text_measure::{
    char_width, grapheme_width, line_count, max_content_width, min_content_width, string_width,
    truncate_text, wrap_lines, wrapped_width, Line,
};
pub use responsive::{Fluid, Responsive};
pub use signature::{compute_signatures, CoveredKinds, SignatureCache};
pub use tree::LayoutTree;
pub use types::{
    Align, AlignSelf, Dimension, Display, Edges, FlexDirection, FlexWrap, GridStyle, Inset,
    Justify, Node, NodeKind, Overflow, Rect, Size, Style, TextContent, TextWrap, Viewport,
};
