//! Core types for flexcell.
//!
//! Everything the engine understands about a node lives here: dimensions,
//! flex properties, box-model insets, grid placement, and the node/style
//! records the committed tree supplies. All geometry is integer terminal
//! cells (`u16`).

use crate::responsive::Responsive;

// =============================================================================
// Dimension
// =============================================================================

/// A size expression along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Auto-size based on content (flex/grid/intrinsic logic decides).
    Auto,
    /// Absolute size in terminal cells.
    Cells(u16),
    /// Percentage of the parent's size (0-100).
    ///
    /// Requires a definite parent; falls back to intrinsic sizing when the
    /// parent is indefinite.
    Percent(f32),
    /// Shrink-wrap to content: min(max-content, available), floored at
    /// min-content.
    FitContent,
}

impl Default for Dimension {
    fn default() -> Self {
        Self::Auto
    }
}

impl Dimension {
    /// True for `Auto` (the "unset" value for min/max constraints).
    #[inline]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

// =============================================================================
// Flex enums
// =============================================================================

/// Which way a flex container stacks its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlexDirection {
    /// Stack vertically (default, like a document).
    #[default]
    Column,
    /// Stack horizontally.
    Row,
    /// Stack vertically, last child first.
    ColumnReverse,
    /// Stack horizontally, last child first.
    RowReverse,
}

impl FlexDirection {
    /// True if the main axis is horizontal.
    #[inline]
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// True if children are placed from the far edge backwards.
    #[inline]
    pub const fn is_reverse(&self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// Whether children may break onto multiple lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlexWrap {
    /// Single line, children shrink to fit.
    #[default]
    NoWrap,
    /// Children wrap onto new lines when they run out of main-axis space.
    Wrap,
}

/// Main-axis distribution of free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    /// Pack at the start (default).
    #[default]
    Start,
    /// Center the line.
    Center,
    /// Pack at the end.
    End,
    /// Equal space between children, none at the edges.
    SpaceBetween,
    /// Equal space around each child (half-size edges).
    SpaceAround,
    /// Equal space between children and at both edges.
    SpaceEvenly,
}

/// Cross-axis alignment of children within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Fill the line's cross size (default).
    #[default]
    Stretch,
    /// Align to the line start.
    Start,
    /// Center within the line.
    Center,
    /// Align to the line end.
    End,
}

/// Per-child override of the container's `align_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlignSelf {
    /// Inherit from the container (default).
    #[default]
    Auto,
    Stretch,
    Start,
    Center,
    End,
}

impl AlignSelf {
    /// Resolve against the container's `align_items`.
    #[inline]
    pub const fn resolve(&self, container: Align) -> Align {
        match self {
            Self::Auto => container,
            Self::Stretch => Align::Stretch,
            Self::Start => Align::Start,
            Self::Center => Align::Center,
            Self::End => Align::End,
        }
    }
}

// =============================================================================
// Display / overflow / text
// =============================================================================

/// How a node participates in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Display {
    /// Normal flow (flex or grid child).
    #[default]
    Flow,
    /// Removed from flow, positioned against the parent's content box.
    Absolute,
    /// Not laid out at all; the subtree is skipped.
    None,
}

/// What happens to content larger than the node's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overflow {
    /// Content may paint outside; the node inherits its parent's clip.
    #[default]
    Visible,
    /// Content is clipped to the node's box.
    Hidden,
    /// Content is clipped and the engine reports scroll ranges.
    Scroll,
}

/// Wrapping mode for text leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextWrap {
    /// No soft wrapping; only hard `\n` breaks lines.
    None,
    /// Break at word boundaries, falling back to grapheme breaks for
    /// overlong words (default).
    #[default]
    Word,
    /// Break at any grapheme boundary.
    Char,
}

// =============================================================================
// Edges
// =============================================================================

/// Per-edge cell counts for padding, margin, and border widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub const ZERO: Self = Self {
        top: 0,
        right: 0,
        bottom: 0,
        left: 0,
    };

    /// Same value on all four edges.
    pub const fn all(v: u16) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Vertical/horizontal shorthand.
    pub const fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Total horizontal inset (left + right).
    #[inline]
    pub const fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    /// Total vertical inset (top + bottom).
    #[inline]
    pub const fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }

    /// Total inset along the main axis of `dir`.
    #[inline]
    pub const fn main(&self, dir: FlexDirection) -> u16 {
        if dir.is_row() {
            self.horizontal()
        } else {
            self.vertical()
        }
    }

    /// Total inset along the cross axis of `dir`.
    #[inline]
    pub const fn cross(&self, dir: FlexDirection) -> u16 {
        if dir.is_row() {
            self.vertical()
        } else {
            self.horizontal()
        }
    }

    /// Component-wise sum, saturating.
    #[inline]
    pub const fn add(&self, other: Self) -> Self {
        Self {
            top: self.top.saturating_add(other.top),
            right: self.right.saturating_add(other.right),
            bottom: self.bottom.saturating_add(other.bottom),
            left: self.left.saturating_add(other.left),
        }
    }
}

// =============================================================================
// Absolute insets
// =============================================================================

/// Offsets for absolutely positioned nodes.
///
/// `top`/`left` are measured from the containing block's content-box origin,
/// `right`/`bottom` from its far edges. An unset edge defers to the opposite
/// edge or to intrinsic sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Inset {
    pub top: Option<i16>,
    pub right: Option<i16>,
    pub bottom: Option<i16>,
    pub left: Option<i16>,
}

// =============================================================================
// Grid
// =============================================================================

/// Grid container template and child placement.
///
/// On a `Grid` container, `columns`/`rows` are fractional track weights
/// (fr-like; an empty column template means a single column, implicit rows
/// weigh 1.0 each). On a grid child, `row`/`column` request an explicit cell
/// and the spans say how many tracks the child covers.
#[derive(Debug, Clone, PartialEq)]
pub struct GridStyle {
    /// Column track weights for containers.
    pub columns: Vec<f32>,
    /// Row track weights for containers; empty means implicit rows.
    pub rows: Vec<f32>,
    /// Explicit row placement (child), 0-based.
    pub row: Option<u16>,
    /// Explicit column placement (child), 0-based.
    pub column: Option<u16>,
    /// Number of rows covered, minimum 1.
    pub row_span: u16,
    /// Number of columns covered, minimum 1.
    pub col_span: u16,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            row: None,
            column: None,
            row_span: 1,
            col_span: 1,
        }
    }
}

// =============================================================================
// Style
// =============================================================================

/// The full layout style record for one node.
///
/// Every field has a defined default; malformed values (NaN, negative
/// factors) are sanitized at resolution time rather than rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub display: Display,
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub justify: Justify,
    pub align_items: Align,
    pub align_self: AlignSelf,

    /// Share of free main-axis space this child absorbs.
    pub grow: f32,
    /// Shrink weight when the line overflows; scaled by basis.
    pub shrink: f32,
    /// Starting main-axis size before grow/shrink. `Auto` defers to the
    /// explicit main size, then to max-content.
    pub basis: Dimension,

    pub width: Responsive<Dimension>,
    pub height: Responsive<Dimension>,
    pub min_width: Dimension,
    pub max_width: Dimension,
    pub min_height: Dimension,
    pub max_height: Dimension,

    pub padding: Edges,
    pub margin: Edges,
    /// Border widths in cells (terminal borders are 0 or 1 wide).
    pub border: Edges,
    /// Gap between adjacent children along the main axis (flex) or between
    /// tracks (grid).
    pub gap: Responsive<u16>,

    pub inset: Inset,
    pub overflow: Overflow,
    pub grid: GridStyle,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            display: Display::Flow,
            direction: FlexDirection::Column,
            wrap: FlexWrap::NoWrap,
            justify: Justify::Start,
            align_items: Align::Stretch,
            align_self: AlignSelf::Auto,
            grow: 0.0,
            shrink: 1.0,
            basis: Dimension::Auto,
            width: Responsive::Value(Dimension::Auto),
            height: Responsive::Value(Dimension::Auto),
            min_width: Dimension::Auto,
            max_width: Dimension::Auto,
            min_height: Dimension::Auto,
            max_height: Dimension::Auto,
            padding: Edges::ZERO,
            margin: Edges::ZERO,
            border: Edges::ZERO,
            gap: Responsive::Value(0),
            inset: Inset::default(),
            overflow: Overflow::Visible,
            grid: GridStyle::default(),
        }
    }
}

// =============================================================================
// Node
// =============================================================================

/// Widget kind tag, supplied by the reconciler.
///
/// The engine dispatches layout and the stability hasher's coverage on this
/// closed set. `Custom` carries a host-assigned tag for widget kinds the
/// engine does not know: such nodes still lay out (as flex containers) but
/// are never cached by signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Generic flex container.
    Box,
    /// Flex container defaulting to a horizontal main axis.
    Row,
    /// Flex container defaulting to a vertical main axis.
    Column,
    /// Track-based 2D container.
    Grid,
    /// Text leaf; measures and wraps its content.
    Text,
    /// Leaf with no content of its own (canvas, image cell block, spacer).
    Fixed,
    /// Host-defined widget kind, opaque to the engine.
    Custom(u32),
}

/// Text run carried by a `Text` leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextContent {
    pub content: String,
    pub wrap: TextWrap,
}

/// One committed tree node as handed to the engine.
#[derive(Debug, Clone)]
pub struct Node {
    /// Stable identity across renders (cache key; uniqueness is the
    /// reconciler's contract).
    pub id: u64,
    pub kind: NodeKind,
    pub style: Style,
    /// Present on `Text` leaves, ignored elsewhere.
    pub text: Option<TextContent>,
}

impl Node {
    /// A node with default style and no text.
    pub fn new(id: u64, kind: NodeKind) -> Self {
        let mut style = Style::default();
        // Row/Column kinds imply their direction unless overridden later.
        style.direction = match kind {
            NodeKind::Row => FlexDirection::Row,
            _ => FlexDirection::Column,
        };
        Self {
            id,
            kind,
            style,
            text: None,
        }
    }

    /// A text leaf with the default word-wrap mode.
    pub fn text(id: u64, content: impl Into<String>) -> Self {
        let mut node = Self::new(id, NodeKind::Text);
        node.text = Some(TextContent {
            content: content.into(),
            wrap: TextWrap::Word,
        });
        node
    }

    /// Builder-style style mutation.
    pub fn with_style(mut self, f: impl FnOnce(&mut Style)) -> Self {
        f(&mut self.style);
        self
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// The viewport the tree is laid out against, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// An integer cell rectangle. All components are non-negative by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersection of two rects; empty result collapses to a zero-size rect
    /// at the clamped origin.
    pub fn intersect(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shrink by per-edge insets, saturating at zero size.
    pub fn inset_by(&self, edges: Edges) -> Self {
        Self {
            x: self.x.saturating_add(edges.left),
            y: self.y.saturating_add(edges.top),
            width: self.width.saturating_sub(edges.horizontal()),
            height: self.height.saturating_sub(edges.vertical()),
        }
    }
}

/// A width/height pair in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Main-axis component for `dir`.
    #[inline]
    pub const fn main(&self, dir: FlexDirection) -> u16 {
        if dir.is_row() { self.width } else { self.height }
    }

    /// Cross-axis component for `dir`.
    #[inline]
    pub const fn cross(&self, dir: FlexDirection) -> u16 {
        if dir.is_row() { self.height } else { self.width }
    }

    /// Build from main/cross components for `dir`.
    #[inline]
    pub const fn from_axes(dir: FlexDirection, main: u16, cross: u16) -> Self {
        if dir.is_row() {
            Self {
                width: main,
                height: cross,
            }
        } else {
            Self {
                width: cross,
                height: main,
            }
        }
    }
}
