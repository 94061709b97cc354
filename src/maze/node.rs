use std::collections::BTreeSet;

use super::edge::EdgeId;

/// A grid cell. Knows only which edges touch it; its position is its index in the graph.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Node {
    edges: BTreeSet<EdgeId>,
}

impl Node {
    pub fn new() -> Self {
        Node::default()
    }

    /// Ids of the edges incident to this node, in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn attach(&mut self, edge: EdgeId) {
        self.edges.insert(edge);
    }

    /// Returns `false` if the edge was not attached.
    pub(crate) fn detach(&mut self, edge: EdgeId) -> bool {
        self.edges.remove(&edge)
    }

    /// Rewrites every incident edge id through `remap`, dropping ids it does not know.
    pub(crate) fn remap_edges(&mut self, remap: impl Fn(EdgeId) -> Option<EdgeId>) {
        self.edges = self.edges.iter().filter_map(|&id| remap(id)).collect();
    }
}
