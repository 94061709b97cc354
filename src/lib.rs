pub mod app;
pub mod error;
pub mod generators;
pub mod maze;
pub mod solvers;

pub use app::game::game_state::{Command, Direction, GameState, ModeKind, Overlay};
pub use error::{MazeError, Result};
pub use maze::Graph;
