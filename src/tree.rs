//! The layout tree arena.
//!
//! Nodes live in a flat `Vec` and reference each other by index, never by
//! pointer — parent/child links are plain `usize` so the tree is trivially
//! rebuildable per pass and scratch arrays can mirror it one-to-one.
//!
//! Child order is insertion order and is semantically significant: it is the
//! flex/grid auto-placement order and the draw/event order the renderer
//! receives, regardless of where grid placement puts a child geometrically.

use crate::types::Node;

/// An ordered, acyclic tree of layout nodes, owned by the engine for the
/// duration of one layout pass.
#[derive(Debug, Default)]
pub struct LayoutTree {
    nodes: Vec<Node>,
    children: Vec<Vec<usize>>,
    parent: Vec<Option<usize>>,
    roots: Vec<usize>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a node under `parent` (or as a root) and return its index.
    ///
    /// Children accumulate in insertion order.
    pub fn insert(&mut self, parent: Option<usize>, node: Node) -> usize {
        let idx = self.nodes.len();
        // An out-of-range parent degrades to a root rather than failing.
        let parent = parent.filter(|&p| p < idx);
        self.nodes.push(node);
        self.children.push(Vec::new());
        self.parent.push(parent);
        match parent {
            Some(p) => self.children[p].push(idx),
            None => self.roots.push(idx),
        }
        idx
    }

    #[inline]
    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    #[inline]
    pub fn node_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    /// Children of `idx`, in document order.
    #[inline]
    pub fn children(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    #[inline]
    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.parent[idx]
    }

    /// Root indices (nodes inserted without a parent), in insertion order.
    #[inline]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Iterate `(index, node)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.nodes.iter().enumerate()
    }
}
