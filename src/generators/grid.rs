use rand::Rng;

use crate::{
    error::{MazeError, Result},
    maze::Graph,
};

/// Edge weights are drawn uniformly from `0..WEIGHT_BOUND`.
pub const WEIGHT_BOUND: u32 = 100_000;

/// Builds the full grid graph: one node per cell, and an edge of random weight between
/// every pair of horizontally or vertically adjacent cells.
///
/// All rightward edges are created first (in index order), then all downward edges, so a
/// seeded RNG always yields the same weights on the same edges.
///
/// Fails with [`MazeError::InvalidDimensions`] unless both dimensions are positive.
pub fn build_grid_graph<R: Rng + ?Sized>(width: i32, height: i32, rng: &mut R) -> Result<Graph> {
    let invalid = || MazeError::InvalidDimensions { width, height };

    let (w, h) = match (usize::try_from(width), usize::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(invalid()),
    };
    let total = w.checked_mul(h).ok_or_else(invalid)?;

    let mut graph = Graph::with_nodes(w, h);

    // Rightward neighbors, skipping the last column
    (0..total).filter(|i| (i + 1) % w != 0).for_each(|i| {
        graph.connect(i, i + 1, rng.random_range(0..WEIGHT_BOUND));
    });

    // Downward neighbors, skipping the last row
    (0..w * (h - 1)).for_each(|i| {
        graph.connect(i, i + w, rng.random_range(0..WEIGHT_BOUND));
    });

    tracing::debug!(
        "[grid] Built {}x{} grid graph with {} edges",
        w,
        h,
        graph.edge_count()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_invalid_dimensions() {
        let mut rng = get_rng(Some(0));
        for (width, height) in [(0, 3), (3, 0), (-1, 3), (3, -1), (0, 0)] {
            assert_eq!(
                build_grid_graph(width, height, &mut rng),
                Err(MazeError::InvalidDimensions { width, height })
            );
        }
    }

    #[test]
    fn test_single_cell() {
        let graph = build_grid_graph(1, 1, &mut get_rng(Some(0))).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_edge_count_and_adjacency() {
        let (width, height) = (5, 4);
        let graph = build_grid_graph(width, height, &mut get_rng(Some(7))).unwrap();
        let (w, h) = (width as usize, height as usize);
        assert_eq!(graph.len(), w * h);
        assert_eq!(graph.edge_count(), h * (w - 1) + w * (h - 1));

        for (_, edge) in graph.edges() {
            let (c1, r1) = graph.coords(edge.from);
            let (c2, r2) = graph.coords(edge.to);
            // Exactly one step along one axis: no diagonals, no wraparound
            assert_eq!(c1.abs_diff(c2) + r1.abs_diff(r2), 1);
            assert!(edge.weight < WEIGHT_BOUND);
        }
    }

    #[test]
    fn test_rightward_edges_come_first() {
        let graph = build_grid_graph(3, 2, &mut get_rng(Some(3))).unwrap();
        let pairs = graph
            .edges()
            .map(|(_, e)| (e.from, e.to))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (3, 4), (4, 5), (0, 3), (1, 4), (2, 5)]);
    }

    #[test]
    fn test_interior_node_has_four_edges() {
        let graph = build_grid_graph(3, 3, &mut get_rng(Some(9))).unwrap();
        assert_eq!(graph.node(4).map(|n| n.degree()), Some(4));
        assert_eq!(graph.node(0).map(|n| n.degree()), Some(2));
        assert_eq!(graph.node(1).map(|n| n.degree()), Some(3));
    }
}
