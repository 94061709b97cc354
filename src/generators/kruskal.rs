use crate::{
    error::{MazeError, Result},
    maze::{Edge, EdgeId, Graph},
};

/// Maps every node to a representative. A root maps to itself.
///
/// Roots are found by following the chain of representatives, and merging rewrites the
/// first root to point at the second. No path compression or ranking, so the resulting
/// tree depends only on the edge order.
struct UnionFind {
    representatives: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            representatives: (0..size).collect(),
        }
    }

    fn find(&self, x: usize) -> usize {
        let mut rep = x;
        while self.representatives[rep] != rep {
            rep = self.representatives[rep];
        }
        rep
    }

    /// Merges the sets of `from` and `to`. Returns `false` if they were already one set.
    fn unite(&mut self, from: usize, to: usize) -> bool {
        let from_rep = self.find(from);
        let to_rep = self.find(to);
        if from_rep == to_rep {
            return false;
        }
        self.representatives[from_rep] = to_rep;
        true
    }
}

/// Reduces `graph` to its minimum spanning tree with Kruskal's algorithm.
///
/// Edges are taken in ascending weight order (ties keep insertion order). An edge joining
/// two separate components is kept, any other edge is dropped, and the search stops as soon
/// as `len - 1` edges have been kept. Afterwards the graph holds exactly the tree edges and
/// every node's incidence set refers to tree edges only.
///
/// A disconnected graph cannot produce a spanning tree; it fails with
/// [`MazeError::InsufficientEdges`] and is left untouched.
pub fn reduce(graph: &mut Graph) -> Result<()> {
    let required = graph.len().saturating_sub(1);

    let mut queue: Vec<(EdgeId, Edge)> = graph.edges().map(|(id, &edge)| (id, edge)).collect();
    queue.sort_by_key(|(_, edge)| edge.weight);

    let mut uf = UnionFind::new(graph.len());
    let mut tree: Vec<EdgeId> = Vec::with_capacity(required);
    let mut accepted = vec![false; graph.edge_count()];

    for (id, edge) in &queue {
        if tree.len() >= required {
            break;
        }
        if uf.unite(edge.from, edge.to) {
            accepted[id.index()] = true;
            tree.push(*id);
        }
    }

    if tree.len() < required {
        tracing::warn!(
            "[kruskal] Ran out of edges after accepting {} of {}",
            tree.len(),
            required
        );
        return Err(MazeError::InsufficientEdges {
            accepted: tree.len(),
            required,
        });
    }

    // Cycle-closing edges and edges never reached must not stay reachable from any node
    queue
        .iter()
        .filter(|(id, _)| !accepted[id.index()])
        .for_each(|(id, _)| graph.detach(*id));
    graph.retain_edges(&tree);

    tracing::debug!(
        "[kruskal] Kept {} of {} edges",
        graph.edge_count(),
        queue.len()
    );
    Ok(())
}
