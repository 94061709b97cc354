use std::{collections::HashSet, io::Write};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use rand::Rng;
use unicode_truncate::UnicodeTruncateStr;

use super::{
    cell::GridCell,
    game::game_state::{GameState, ModeKind},
    grid::Grid,
};

/// Draws a [`GameState`] to the terminal: the maze on top, a short status panel below.
pub struct Renderer;

impl Renderer {
    /// Rows reserved below the maze for the status panel.
    pub const NUM_PANEL_ROWS: u16 = 2;

    /// Size of the character grid needed for a `width` x `height` maze.
    pub fn grid_size(width: usize, height: usize) -> (usize, usize) {
        (width * 2 + 1, height * 2 + 1)
    }

    /// Builds the character grid for the current state.
    ///
    /// Every maze cell sits at odd coordinates. The slot between two neighboring cells is
    /// open if a passage joins them and a wall otherwise; even-even slots are always walls.
    pub fn layout<R: Rng>(state: &GameState<R>) -> Grid {
        let graph = state.graph();
        let (grid_width, grid_height) = Renderer::grid_size(graph.width(), graph.height());
        let mut grid = Grid::new(
            u16::try_from(grid_width).unwrap_or(u16::MAX),
            u16::try_from(grid_height).unwrap_or(u16::MAX),
            GridCell::WALL,
        );

        let overlay = state.overlay();
        // The trail plus wherever it currently ends
        let route: HashSet<usize> = if overlay.shows_path() {
            state
                .path()
                .iter()
                .copied()
                .chain(std::iter::once(state.current()))
                .collect()
        } else {
            HashSet::new()
        };
        let frontier: HashSet<usize> = match state.frontier() {
            Some(frontier) if overlay.shows_visited() => frontier.nodes().collect(),
            _ => HashSet::new(),
        };

        let cell_for = |index: usize| {
            if index == state.current() {
                GridCell::PLAYER
            } else if index == 0 {
                GridCell::START
            } else if index == state.terminal() {
                GridCell::GOAL
            } else if route.contains(&index) {
                GridCell::ROUTE
            } else if frontier.contains(&index) {
                GridCell::FRONTIER
            } else if overlay.shows_visited() && state.is_visited(index) {
                GridCell::VISITED
            } else {
                GridCell::EMPTY
            }
        };
        let passage_for = |a: usize, b: usize| {
            if route.contains(&a) && route.contains(&b) {
                GridCell::ROUTE
            } else {
                GridCell::EMPTY
            }
        };
        let mut put = |x: usize, y: usize, cell: GridCell| {
            if x < grid.width() as usize && y < grid.height() as usize {
                grid.set((x as u16, y as u16), cell);
            }
        };

        for index in 0..graph.len() {
            let (col, row) = graph.coords(index);
            put(col * 2 + 1, row * 2 + 1, cell_for(index));
            // Rightward passage; the edge check rules out wrapping to the next row
            if col + 1 < graph.width() && state.edge_between(index, index + 1) {
                put(col * 2 + 2, row * 2 + 1, passage_for(index, index + 1));
            }
            // Downward passage
            if state.edge_between(index, index + graph.width()) {
                put(
                    col * 2 + 1,
                    row * 2 + 2,
                    passage_for(index, index + graph.width()),
                );
            }
        }
        grid
    }

    /// Status panel text for the current state, one entry per row.
    pub fn panel_lines<R: Rng>(state: &GameState<R>) -> Vec<(String, Color)> {
        const QUIT_KEYS: &str = "r: reset   n: new maze   Esc: quit";
        let mode = state.mode();
        match mode {
            ModeKind::Idle => vec![
                (
                    "1: solve by hand   2: breadth-first search   3: depth-first search".into(),
                    Color::Yellow,
                ),
                ("n: new maze   Esc: quit".into(), Color::Cyan),
            ],
            _ if state.is_solved() => vec![
                (
                    format!("Solved with {}! Final score: {}", mode, state.score()),
                    Color::Green,
                ),
                (QUIT_KEYS.into(), Color::Cyan),
            ],
            ModeKind::Manual => vec![
                (format!("{}   Score: {}", mode, state.score()), Color::Yellow),
                (
                    format!("Arrow keys: move   v: toggle trail   {}", QUIT_KEYS),
                    Color::Cyan,
                ),
            ],
            ModeKind::BreadthFirst | ModeKind::DepthFirst => vec![
                (format!("{}   Score: {}", mode, state.score()), Color::Yellow),
                (QUIT_KEYS.into(), Color::Cyan),
            ],
        }
    }

    /// Redraws the whole maze and the status panel.
    pub fn draw<R: Rng, W: Write>(out: &mut W, state: &GameState<R>) -> std::io::Result<()> {
        let grid = Renderer::layout(state);
        // Fall back to no truncation if terminal size cannot be determined
        let term_width = terminal::size().map(|(w, _)| w).unwrap_or(u16::MAX);

        for (y, row) in grid.rows().enumerate() {
            queue!(out, cursor::MoveTo(0, y as u16))?;
            for cell in row {
                queue!(out, style::Print(cell))?;
            }
        }

        for (i, (text, color)) in Renderer::panel_lines(state).into_iter().enumerate() {
            let (line, _) = text.unicode_truncate(term_width as usize);
            queue!(
                out,
                cursor::MoveTo(0, grid.height() + i as u16),
                terminal::Clear(ClearType::CurrentLine),
                style::PrintStyledContent(line.with(color).attribute(Attribute::Bold)),
            )?;
        }
        out.flush()
    }
}
