pub mod edge;
pub mod node;

use std::collections::HashMap;

pub use edge::{Edge, EdgeId};
pub use node::Node;

/// Undirected graph over the cells of a rectangular grid.
///
/// Nodes are stored in row-major order, so node `i` is the cell at column `i % width`
/// and row `i / width`. Edges live in an arena and are referred to by [`EdgeId`]; every
/// node keeps the ids of the edges touching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    width: usize,
    height: usize,
}

impl Graph {
    /// Creates a graph with `width * height` unconnected nodes.
    /// Dimensions are trusted here; validation happens in the grid builder.
    pub(crate) fn with_nodes(width: usize, height: usize) -> Self {
        Graph {
            nodes: vec![Node::new(); width * height],
            edges: Vec::new(),
            width,
            height,
        }
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the maze in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of nodes (cells).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Index of the bottom-right cell, the goal of every maze.
    pub fn terminal(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// Iterates over all edges together with their ids.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    /// Converts a node index into `(column, row)`.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width.max(1), index / self.width.max(1))
    }

    /// Converts `(column, row)` into a node index, if the cell is inside the grid.
    pub fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    /// Adds an edge between nodes `a` and `b` and registers it on both of them.
    /// Returns `None` without touching the graph if either index is out of range.
    pub(crate) fn connect(&mut self, a: usize, b: usize, weight: u32) -> Option<EdgeId> {
        if a >= self.nodes.len() || b >= self.nodes.len() {
            return None;
        }
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(a, b, weight));
        self.nodes[a].attach(id);
        self.nodes[b].attach(id);
        Some(id)
    }

    /// Whether an edge directly connects nodes `a` and `b`.
    /// Out-of-range indices are never connected.
    pub fn edge_between(&self, a: usize, b: usize) -> bool {
        if b >= self.nodes.len() {
            return false;
        }
        let Some(node) = self.nodes.get(a) else {
            return false;
        };
        node.edges()
            .filter_map(|id| self.edges.get(id.0))
            .any(|edge| edge.connects(a, b))
    }

    /// Removes an edge from the incidence sets of both of its endpoints.
    /// The edge itself stays in the arena until [`Graph::retain_edges`] runs.
    pub(crate) fn detach(&mut self, id: EdgeId) {
        if let Some(&Edge { from, to, .. }) = self.edges.get(id.0) {
            self.nodes[from].detach(id);
            self.nodes[to].detach(id);
        }
    }

    /// Replaces the edge arena with exactly `keep`, in that order, compacting ids.
    /// Node incidence sets are rewritten to the new ids; any id not kept is dropped.
    pub(crate) fn retain_edges(&mut self, keep: &[EdgeId]) {
        let remap: HashMap<EdgeId, EdgeId> = keep
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, EdgeId(new)))
            .collect();
        self.edges = keep
            .iter()
            .filter_map(|id| self.edges.get(id.0).copied())
            .collect();
        self.nodes
            .iter_mut()
            .for_each(|node| node.remap_edges(|id| remap.get(&id).copied()));
    }
}
