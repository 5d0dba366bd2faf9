//! Subtree stability signatures.
//!
//! A signature is a 64-bit digest of everything layout-relevant in a
//! subtree: node kind, style, text, and the ordered signatures of its
//! children. Two subtrees with equal signatures lay out identically under
//! the same constraints, so a caller can skip re-solving a subtree whose
//! signature matches the previous pass.
//!
//! Node identity is deliberately excluded: two structurally identical
//! siblings hash the same. Floats hash by bit pattern after the same
//! sanitization the solvers apply, so a NaN grow factor hashes like 0.
//!
//! Coverage is a closed set of kinds. `Custom` nodes are outside it: they
//! and every ancestor get `None` (never cached) and a single advisory
//! warning per pass. The advisory never changes layout output.

use std::hash::{Hash, Hasher};

use bitflags::bitflags;
use rustc_hash::{FxHashMap, FxHasher};

use crate::layout::box_model::sanitize_factor;
use crate::responsive::Responsive;
use crate::tree::LayoutTree;
use crate::types::{Dimension, GridStyle, Node, NodeKind, Style};

bitflags! {
    /// Node kinds the hasher covers. A kind outside this set makes its
    /// whole ancestor chain uncacheable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CoveredKinds: u8 {
        const BOX    = 1;
        const ROW    = 1 << 1;
        const COLUMN = 1 << 2;
        const GRID   = 1 << 3;
        const TEXT   = 1 << 4;
        const FIXED  = 1 << 5;
    }
}

/// The coverage flag for a kind, or `None` for kinds outside the set.
const fn kind_flag(kind: NodeKind) -> Option<CoveredKinds> {
    match kind {
        NodeKind::Box => Some(CoveredKinds::BOX),
        NodeKind::Row => Some(CoveredKinds::ROW),
        NodeKind::Column => Some(CoveredKinds::COLUMN),
        NodeKind::Grid => Some(CoveredKinds::GRID),
        NodeKind::Text => Some(CoveredKinds::TEXT),
        NodeKind::Fixed => Some(CoveredKinds::FIXED),
        NodeKind::Custom(_) => None,
    }
}

// =============================================================================
// Hashing
// =============================================================================

#[inline]
fn hash_f32<H: Hasher>(state: &mut H, v: f32) {
    sanitize_factor(v).to_bits().hash(state);
}

fn hash_dimension<H: Hasher>(state: &mut H, d: Dimension) {
    match d {
        Dimension::Auto => 0u8.hash(state),
        Dimension::Cells(n) => {
            1u8.hash(state);
            n.hash(state);
        }
        Dimension::Percent(p) => {
            2u8.hash(state);
            hash_f32(state, p);
        }
        Dimension::FitContent => 3u8.hash(state),
    }
}

fn hash_responsive_dim<H: Hasher>(state: &mut H, r: &Responsive<Dimension>) {
    match r {
        Responsive::Value(d) => {
            0u8.hash(state);
            hash_dimension(state, *d);
        }
        Responsive::Breakpoints(entries) => {
            1u8.hash(state);
            entries.len().hash(state);
            for (min_width, value) in entries {
                min_width.hash(state);
                hash_responsive_dim(state, value);
            }
        }
        Responsive::Fluid(f) => {
            2u8.hash(state);
            f.hash(state);
        }
    }
}

fn hash_responsive_u16<H: Hasher>(state: &mut H, r: &Responsive<u16>) {
    match r {
        Responsive::Value(v) => {
            0u8.hash(state);
            v.hash(state);
        }
        Responsive::Breakpoints(entries) => {
            1u8.hash(state);
            entries.len().hash(state);
            for (min_width, value) in entries {
                min_width.hash(state);
                hash_responsive_u16(state, value);
            }
        }
        Responsive::Fluid(f) => {
            2u8.hash(state);
            f.hash(state);
        }
    }
}

fn hash_grid<H: Hasher>(state: &mut H, g: &GridStyle) {
    g.columns.len().hash(state);
    for &w in &g.columns {
        hash_f32(state, w);
    }
    g.rows.len().hash(state);
    for &w in &g.rows {
        hash_f32(state, w);
    }
    g.row.hash(state);
    g.column.hash(state);
    g.row_span.hash(state);
    g.col_span.hash(state);
}

fn hash_style<H: Hasher>(state: &mut H, s: &Style) {
    s.display.hash(state);
    s.direction.hash(state);
    s.wrap.hash(state);
    s.justify.hash(state);
    s.align_items.hash(state);
    s.align_self.hash(state);
    hash_f32(state, s.grow);
    hash_f32(state, s.shrink);
    hash_dimension(state, s.basis);
    hash_responsive_dim(state, &s.width);
    hash_responsive_dim(state, &s.height);
    hash_dimension(state, s.min_width);
    hash_dimension(state, s.max_width);
    hash_dimension(state, s.min_height);
    hash_dimension(state, s.max_height);
    s.padding.hash(state);
    s.margin.hash(state);
    s.border.hash(state);
    hash_responsive_u16(state, &s.gap);
    s.inset.hash(state);
    s.overflow.hash(state);
    hash_grid(state, &s.grid);
}

fn node_signature(node: &Node, child_sigs: &[u64]) -> u64 {
    let mut state = FxHasher::default();
    // Kind tag first so a Box and a Grid with equal styles never collide.
    match node.kind {
        NodeKind::Box => 0u8.hash(&mut state),
        NodeKind::Row => 1u8.hash(&mut state),
        NodeKind::Column => 2u8.hash(&mut state),
        NodeKind::Grid => 3u8.hash(&mut state),
        NodeKind::Text => 4u8.hash(&mut state),
        NodeKind::Fixed => 5u8.hash(&mut state),
        NodeKind::Custom(tag) => {
            6u8.hash(&mut state);
            tag.hash(&mut state);
        }
    }
    hash_style(&mut state, &node.style);
    node.text.hash(&mut state);
    child_sigs.len().hash(&mut state);
    for sig in child_sigs {
        sig.hash(&mut state);
    }
    state.finish()
}

/// Compute per-node subtree signatures, indexed like the tree.
///
/// `None` marks an uncacheable subtree: the node's kind is outside
/// [`CoveredKinds`] or a descendant's is. The first uncovered kind per pass
/// logs one advisory warning.
pub fn compute_signatures(tree: &LayoutTree) -> Vec<Option<u64>> {
    let mut sigs: Vec<Option<u64>> = vec![None; tree.len()];
    let mut warned = false;

    // Children always carry higher indices than their parent, so one
    // reverse sweep sees every child before its parent.
    for idx in (0..tree.len()).rev() {
        let node = tree.node(idx);
        if kind_flag(node.kind).is_none() {
            if !warned {
                if let NodeKind::Custom(tag) = node.kind {
                    log::warn!(
                        "node kind Custom({tag}) is outside signature coverage; \
                         its subtree will not be cached"
                    );
                }
                warned = true;
            }
            continue;
        }

        let children = tree.children(idx);
        let mut child_sigs = Vec::with_capacity(children.len());
        let mut cacheable = true;
        for &child in children {
            match sigs[child] {
                Some(sig) => child_sigs.push(sig),
                None => {
                    cacheable = false;
                    break;
                }
            }
        }
        if cacheable {
            sigs[idx] = Some(node_signature(node, &child_sigs));
        }
    }
    sigs
}

// =============================================================================
// Cache
// =============================================================================

/// Prior-pass signatures keyed by stable node id. The caller owns the cache
/// and decides what "unchanged" lets it skip.
#[derive(Debug, Default)]
pub struct SignatureCache {
    prior: FxHashMap<u64, u64>,
}

impl SignatureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` carried the same signature last pass. Uncacheable
    /// subtrees (`None`) never compare as unchanged.
    pub fn is_unchanged(&self, id: u64, signature: Option<u64>) -> bool {
        match signature {
            Some(sig) => self.prior.get(&id) == Some(&sig),
            None => false,
        }
    }

    /// Record this pass's signature for `id`. A `None` signature clears any
    /// stale entry so the id cannot spuriously match later.
    pub fn commit(&mut self, id: u64, signature: Option<u64>) {
        match signature {
            Some(sig) => {
                self.prior.insert(id, sig);
            }
            None => {
                self.prior.remove(&id);
            }
        }
    }

    /// Drop one id's entry, forcing a miss next pass.
    pub fn invalidate(&mut self, id: u64) {
        self.prior.remove(&id);
    }

    /// Drop everything (viewport changes invalidate every subtree anyway).
    pub fn clear(&mut self) {
        self.prior.clear();
    }

    pub fn len(&self) -> usize {
        self.prior.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prior.is_empty()
    }
}
