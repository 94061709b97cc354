use std::time::Instant;

use treemaze::{GameState, ModeKind};

/// Solves seeded mazes headlessly with both searches and prints how many steps each took.
/// Usage: profile [ITERATIONS] [SIZE]
fn main() -> treemaze::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(10);
    let size = args.next().and_then(|s| s.parse::<i32>().ok()).unwrap_or(100);

    for seed in 0..num_iters {
        let start = Instant::now();
        let mut game_state = GameState::new(size, size, Some(seed))?;
        let generated_in = start.elapsed();

        for mode in [ModeKind::BreadthFirst, ModeKind::DepthFirst] {
            game_state.reset();
            match mode {
                ModeKind::BreadthFirst => game_state.select_bfs(),
                _ => game_state.select_dfs(),
            };
            let start = Instant::now();
            let mut steps = 0u64;
            while game_state.tick() {
                steps += 1;
            }
            println!(
                "seed {:>4} {:>3}x{:<3} {:<32} steps {:>8} route {:>6} score {:>8} generated in {:?}, solved in {:?}",
                seed,
                size,
                size,
                mode.to_string(),
                steps,
                game_state.path().len().saturating_sub(1),
                game_state.score(),
                generated_in,
                start.elapsed()
            );
        }
    }
    Ok(())
}
