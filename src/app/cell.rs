use crossterm::style::{Color, Stylize};

use std::fmt;

/// One character-cell pair of the rendered maze: either a wall slot or an open slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Path(PathType),
    Wall,
}

impl GridCell {
    pub const EMPTY: GridCell = GridCell::Path(PathType::Empty);
    pub const WALL: GridCell = GridCell::Wall;
    pub const START: GridCell = GridCell::Path(PathType::Start);
    pub const GOAL: GridCell = GridCell::Path(PathType::Goal);
    pub const VISITED: GridCell = GridCell::Path(PathType::Visited);
    pub const ROUTE: GridCell = GridCell::Path(PathType::Route);
    pub const FRONTIER: GridCell = GridCell::Path(PathType::Frontier);
    pub const PLAYER: GridCell = GridCell::Path(PathType::Player);
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

/// Represents different types of open cells in the maze.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    /// Nothing to show.
    #[default]
    Empty,
    /// A cell that has been visited while solving.
    Visited,
    /// Part of the trail from the start to the current cell.
    Route,
    /// Discovered by a search but not expanded yet.
    Frontier,
    /// The top-left starting cell.
    Start,
    /// The bottom-right goal cell.
    Goal,
    /// Where the player or the search currently is.
    Player,
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            GridCell::Path(path) => match path {
                PathType::Empty => "  ".with(Color::Reset),
                PathType::Visited => "* ".with(Color::Blue),
                PathType::Route => "🟨".with(Color::Yellow),
                PathType::Frontier => "··".with(Color::Cyan),
                PathType::Start => "🟩".with(Color::Green),
                PathType::Goal => "🟥".with(Color::Red),
                PathType::Player => "🟡".with(Color::Yellow),
            },
            GridCell::Wall => "⬜".with(Color::White),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                GridCell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
