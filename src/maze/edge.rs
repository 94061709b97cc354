/// Index of an edge in a [`Graph`](super::Graph)'s edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An undirected, weighted connection between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    /// Only used to randomize the spanning tree. Meaningless once the graph is reduced.
    pub weight: u32,
}

impl Edge {
    pub fn new(from: usize, to: usize, weight: u32) -> Self {
        Edge { from, to, weight }
    }

    /// Whether this edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint at all.
    pub fn other(&self, node: usize) -> Option<usize> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }
}
