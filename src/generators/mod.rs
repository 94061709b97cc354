use rand::{Rng, SeedableRng, rngs::StdRng};

mod grid;
mod kruskal;

pub use grid::{WEIGHT_BOUND, build_grid_graph};
pub use kruskal::reduce;

use crate::{error::Result, maze::Graph};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Builds a randomly weighted grid graph and reduces it to its minimum spanning tree,
/// which is the maze layout.
pub fn generate_maze<R: Rng + ?Sized>(width: i32, height: i32, rng: &mut R) -> Result<Graph> {
    let mut graph = build_grid_graph(width, height, rng)?;
    reduce(&mut graph)?;
    tracing::info!(
        "[generator] Generated {}x{} maze with {} passages",
        graph.width(),
        graph.height(),
        graph.edge_count()
    );
    Ok(graph)
}
