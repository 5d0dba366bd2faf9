//! Layout computation.
//!
//! The solver pipeline: responsive values resolve first, the box model
//! normalizes style into numeric bounds, the intrinsic measurer sizes
//! content bottom-up, then the flex/grid solvers place children top-down
//! with an absolute-positioning pass per container and a final clip pass.

pub mod absolute;
pub mod box_model;
pub mod distribute;
pub mod engine;
pub mod flex;
pub mod grid;
pub mod measure;
pub mod text_measure;

use crate::types::Dimension;

/// Per-node style values with responsive expressions already resolved
/// against the viewport. Built once per pass, indexed like the tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedDims {
    pub width: Dimension,
    pub height: Dimension,
    pub gap: u16,
}
