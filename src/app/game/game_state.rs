use std::collections::HashSet;

use rand::{Rng, rngs::StdRng};

use crate::{
    error::Result,
    generators::{generate_maze, get_rng},
    maze::Graph,
    solvers::{Frontier, Solver},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Discrete inputs the front-end forwards to the game, one at a time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    SelectManual,
    SelectBfs,
    SelectDfs,
    Move(Direction),
    ToggleDisplay,
    Reset,
    NewMaze,
    /// One animation tick: advances the running search, if any.
    Tick,
}

/// What the renderer should overlay on the maze.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Hidden,
    Visited,
    VisitedAndPath,
}

impl Overlay {
    /// Hidden -> visited -> visited and path -> hidden.
    pub fn next(self) -> Self {
        match self {
            Overlay::Hidden => Overlay::Visited,
            Overlay::Visited => Overlay::VisitedAndPath,
            Overlay::VisitedAndPath => Overlay::Hidden,
        }
    }

    pub fn shows_visited(self) -> bool {
        matches!(self, Overlay::Visited | Overlay::VisitedAndPath)
    }

    pub fn shows_path(self) -> bool {
        matches!(self, Overlay::VisitedAndPath)
    }
}

/// Observable summary of the active mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModeKind {
    Idle,
    Manual,
    BreadthFirst,
    DepthFirst,
}

impl std::fmt::Display for ModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeKind::Idle => write!(f, "Choose a mode"),
            ModeKind::Manual => write!(f, "Manual"),
            ModeKind::BreadthFirst => write!(f, "{}", Solver::Bfs),
            ModeKind::DepthFirst => write!(f, "{}", Solver::Dfs),
        }
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Idle,
    Manual,
    Search(Frontier),
}

pub struct GameState<R = StdRng> {
    /// The maze layout, already reduced to a spanning tree
    graph: Graph,
    /// Source of edge weights whenever a new maze is generated
    rng: R,
    mode: Mode,
    /// Tracks where the player (or the search) currently is
    current: usize,
    visited: HashSet<usize>,
    /// Trail from the start towards `current`
    path: Vec<usize>,
    /// Starts at the number of cells and loses one point per step. Can go negative.
    score: i64,
    solved: bool,
    overlay: Overlay,
}

impl GameState<StdRng> {
    /// Set up a game on a freshly generated `width` x `height` maze.
    /// A `seed` makes both this maze and every later [`GameState::new_maze`] reproducible.
    pub fn new(width: i32, height: i32, seed: Option<u64>) -> Result<Self> {
        GameState::with_rng(width, height, get_rng(seed))
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(width: i32, height: i32, mut rng: R) -> Result<Self> {
        let graph = generate_maze(width, height, &mut rng)?;
        Ok(GameState::from_graph(graph, rng))
    }

    /// Wraps a graph that is already a spanning tree. `rng` is kept for new mazes.
    pub fn from_graph(graph: Graph, rng: R) -> Self {
        let mut state = GameState {
            graph,
            rng,
            mode: Mode::Idle,
            current: 0,
            visited: HashSet::new(),
            path: Vec::new(),
            score: 0,
            solved: false,
            overlay: Overlay::default(),
        };
        state.reset();
        state
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn width(&self) -> usize {
        self.graph.width()
    }

    pub fn height(&self) -> usize {
        self.graph.height()
    }

    /// Index of the goal cell in the bottom-right corner.
    pub fn terminal(&self) -> usize {
        self.graph.terminal()
    }

    /// Whether a passage joins cells `a` and `b`. Anything else is a wall.
    pub fn edge_between(&self, a: usize, b: usize) -> bool {
        self.graph.edge_between(a, b)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.contains(&index)
    }

    pub fn visited(&self) -> impl Iterator<Item = usize> + '_ {
        self.visited.iter().copied()
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Whether the active mode has run to completion.
    pub fn is_complete(&self) -> bool {
        self.solved
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn mode(&self) -> ModeKind {
        match &self.mode {
            Mode::Idle => ModeKind::Idle,
            Mode::Manual => ModeKind::Manual,
            Mode::Search(frontier) => match frontier.solver() {
                Solver::Bfs => ModeKind::BreadthFirst,
                Solver::Dfs => ModeKind::DepthFirst,
            },
        }
    }

    /// The running search's work list, if a search is active.
    pub fn frontier(&self) -> Option<&Frontier> {
        match &self.mode {
            Mode::Search(frontier) => Some(frontier),
            _ => None,
        }
    }

    /// Applies one input. Inputs that make no sense in the current mode are ignored.
    pub fn handle(&mut self, command: Command) -> Result<()> {
        tracing::trace!("[game] Handling {:?} in mode {:?}", command, self.mode());
        match command {
            Command::SelectManual => {
                self.select_manual();
            }
            Command::SelectBfs => {
                self.select_bfs();
            }
            Command::SelectDfs => {
                self.select_dfs();
            }
            Command::Move(direction) => {
                self.step_direction(direction);
            }
            Command::ToggleDisplay => {
                if self.mode() == ModeKind::Manual && !self.solved {
                    self.toggle_display();
                }
            }
            Command::Reset => {
                if self.mode() != ModeKind::Idle {
                    self.reset();
                }
            }
            Command::NewMaze => self.new_maze()?,
            Command::Tick => {
                self.tick();
            }
        }
        Ok(())
    }

    /// Start solving by hand. Only possible while idle.
    pub fn select_manual(&mut self) -> bool {
        if !matches!(self.mode, Mode::Idle) {
            return false;
        }
        tracing::info!("[game] Manual mode selected");
        self.mode = Mode::Manual;
        self.overlay = Overlay::Visited;
        true
    }

    pub fn select_bfs(&mut self) -> bool {
        self.select_search(Solver::Bfs)
    }

    pub fn select_dfs(&mut self) -> bool {
        self.select_search(Solver::Dfs)
    }

    /// Start an automated search from the current cell. Only possible while idle.
    pub fn select_search(&mut self, solver: Solver) -> bool {
        if !matches!(self.mode, Mode::Idle) {
            return false;
        }
        tracing::info!("[game] {} selected", solver);
        self.mode = Mode::Search(Frontier::seeded(solver, self.current));
        self.overlay = Overlay::VisitedAndPath;
        true
    }

    /// Move one cell in `direction`. Returns `true` if the move happened.
    pub fn step_direction(&mut self, direction: Direction) -> bool {
        let width = self.graph.width();
        let target = match direction {
            Direction::Up => self.current.checked_sub(width),
            Direction::Down => self.current.checked_add(width),
            Direction::Left => self.current.checked_sub(1),
            Direction::Right => self.current.checked_add(1),
        };
        match target {
            Some(target) => self.step_manual(target),
            None => false,
        }
    }

    /// Move by hand to `target`. Ignored unless in manual mode, unsolved, and a passage
    /// joins the current cell to `target`. Returns `true` if the move happened.
    ///
    /// Stepping onto a visited cell un-visits it, and stepping back onto the trail shortens
    /// it, so retracing a route wipes it out.
    pub fn step_manual(&mut self, target: usize) -> bool {
        if !matches!(self.mode, Mode::Manual)
            || self.solved
            || !self.graph.edge_between(self.current, target)
        {
            return false;
        }

        if self.visited.remove(&target) {
            tracing::debug!("[game] Moving to already visited cell {}", target);
        } else {
            tracing::debug!("[game] Moving to new cell {}", target);
        }
        self.visited.insert(self.current);

        if self.path.contains(&target) {
            self.path.pop();
        } else {
            self.path.push(self.current);
        }

        self.current = target;
        self.score -= 1;
        self.check_solved();
        true
    }

    /// One breadth-first iteration. Ignored unless a breadth-first search is running.
    pub fn step_bfs(&mut self) -> bool {
        self.mode() == ModeKind::BreadthFirst && self.step_search()
    }

    /// One depth-first iteration. Ignored unless a depth-first search is running.
    pub fn step_dfs(&mut self) -> bool {
        self.mode() == ModeKind::DepthFirst && self.step_search()
    }

    /// Advances whichever search is running.
    pub fn tick(&mut self) -> bool {
        self.step_search()
    }

    fn step_search(&mut self) -> bool {
        if self.solved {
            return false;
        }
        let Mode::Search(frontier) = &mut self.mode else {
            return false;
        };
        let Some(entry) = frontier.advance(&self.graph, self.current, &mut self.visited) else {
            tracing::warn!("[game] {} ran out of cells to explore", frontier.solver());
            return false;
        };
        tracing::debug!(
            "[game] Expanded cell {} at depth {}",
            entry.node,
            entry.path.len() - 1
        );

        self.current = entry.node;
        self.path = entry.path;
        self.score -= 1;
        self.check_solved();
        true
    }

    fn check_solved(&mut self) {
        if self.current == self.graph.terminal() {
            tracing::info!(
                "[game] Goal reached in {:?} mode with score {}",
                self.mode(),
                self.score
            );
            self.solved = true;
            self.overlay = Overlay::VisitedAndPath;
        }
    }

    /// Cycle what the renderer overlays on the maze. Has no effect on solving.
    pub fn toggle_display(&mut self) {
        self.overlay = self.overlay.next();
    }

    /// Back to the start of the same maze, with no mode selected.
    pub fn reset(&mut self) {
        self.mode = Mode::Idle;
        self.current = 0;
        self.visited.clear();
        self.path.clear();
        self.score = self.graph.len() as i64;
        // Only a single-cell maze starts out solved
        self.solved = self.current == self.graph.terminal();
        tracing::info!("[game] Maze reset, score is {}", self.score);
    }

    /// Replace the maze with a newly generated one of the same size, then reset.
    /// On failure the current maze is kept.
    pub fn new_maze(&mut self) -> Result<()> {
        let width = i32::try_from(self.graph.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(self.graph.height()).unwrap_or(i32::MAX);
        self.graph = generate_maze(width, height, &mut self.rng)?;
        self.reset();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;

    fn maze_from_edges(width: usize, height: usize, edges: &[(usize, usize)]) -> GameState {
        let mut graph = Graph::with_nodes(width, height);
        for &(a, b) in edges {
            graph.connect(a, b, 0);
        }
        GameState::from_graph(graph, get_rng(Some(0)))
    }

    /// 3x3 maze with a single winding corridor:
    /// 0 - 1 - 2
    ///         |
    /// 3 - 4 - 5
    /// |
    /// 6 - 7 - 8
    fn snake() -> GameState {
        maze_from_edges(
            3,
            3,
            &[(0, 1), (1, 2), (2, 5), (5, 4), (4, 3), (3, 6), (6, 7), (7, 8)],
        )
    }

    /// 3x3 maze with a dead-end branch to the right of the start:
    /// 0 - 1 - 2
    /// |       |
    /// 3 - 4   5
    /// |
    /// 6 - 7 - 8
    fn forked() -> GameState {
        maze_from_edges(
            3,
            3,
            &[(0, 1), (1, 2), (2, 5), (0, 3), (3, 4), (3, 6), (6, 7), (7, 8)],
        )
    }

    fn run_to_completion(state: &mut GameState) -> Vec<usize> {
        let mut trace = Vec::new();
        while state.tick() {
            trace.push(state.current());
        }
        trace
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new(4, 3, Some(5)).unwrap();
        assert_eq!(state.current(), 0);
        assert_eq!(state.score(), 12);
        assert_eq!(state.terminal(), 11);
        assert_eq!(state.mode(), ModeKind::Idle);
        assert_eq!(state.overlay(), Overlay::Hidden);
        assert!(!state.is_solved());
        assert!(state.path().is_empty());
        assert_eq!(state.visited().count(), 0);
        assert_eq!(state.graph().edge_count(), 11);
    }

    #[test]
    fn test_invalid_dimensions() {
        for (width, height) in [(0, 1), (1, 0), (-1, 4)] {
            assert_eq!(
                GameState::new(width, height, Some(0)).err(),
                Some(MazeError::InvalidDimensions { width, height })
            );
        }
    }

    #[test]
    fn test_single_cell_is_already_solved() {
        let mut state = GameState::new(1, 1, Some(0)).unwrap();
        assert_eq!(state.graph().edge_count(), 0);
        assert!(state.is_solved());
        assert!(state.select_bfs());
        assert!(!state.tick());
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_manual_move_rules() {
        let mut state = snake();
        assert!(state.select_manual());
        assert_eq!(state.overlay(), Overlay::Visited);

        // Wall below the start
        assert!(!state.step_direction(Direction::Down));
        // Off the grid
        assert!(!state.step_direction(Direction::Up));
        assert!(!state.step_direction(Direction::Left));
        // Not adjacent at all
        assert!(!state.step_manual(8));
        assert_eq!(state.score(), 9);
        assert_eq!(state.current(), 0);

        assert!(state.step_direction(Direction::Right));
        assert_eq!(state.current(), 1);
        assert_eq!(state.score(), 8);
        assert_eq!(state.path(), &[0]);
        assert!(state.is_visited(0));

        assert!(state.step_direction(Direction::Right));
        assert_eq!(state.path(), &[0, 1]);

        // Backtracking pops the trail and un-visits the cell stepped onto
        assert!(state.step_direction(Direction::Left));
        assert_eq!(state.current(), 1);
        assert_eq!(state.path(), &[0]);
        assert!(!state.is_visited(1));
        assert!(state.is_visited(2));
        assert_eq!(state.score(), 6);
    }

    #[test]
    fn test_no_wraparound_moves() {
        let mut state = snake();
        state.select_manual();
        state.step_direction(Direction::Right);
        state.step_direction(Direction::Right);
        assert_eq!(state.current(), 2);
        // Index 3 is the next row, not a neighbor
        assert!(!state.step_direction(Direction::Right));
        assert_eq!(state.current(), 2);
    }

    #[test]
    fn test_score_goes_negative() {
        let mut state = snake();
        state.select_manual();
        for _ in 0..6 {
            assert!(state.step_direction(Direction::Right));
            assert!(state.step_direction(Direction::Left));
        }
        assert_eq!(state.current(), 0);
        assert_eq!(state.score(), -3);
        assert!(state.path().is_empty());
    }

    #[test]
    fn test_manual_solve() {
        let mut state = snake();
        state.select_manual();
        let moves = [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];
        for direction in moves {
            assert!(state.step_direction(direction));
            assert!(!state.is_solved());
        }
        assert!(state.step_direction(Direction::Right));
        assert!(state.is_solved());
        assert!(state.is_complete());
        assert_eq!(state.score(), 1);
        assert_eq!(state.path(), &[0, 1, 2, 5, 4, 3, 6, 7]);
        assert_eq!(state.overlay(), Overlay::VisitedAndPath);

        // Solved mazes ignore further moves
        assert!(!state.step_direction(Direction::Left));
        assert_eq!(state.current(), 8);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_breadth_first_search() {
        let mut state = forked();
        assert!(state.select_bfs());
        assert_eq!(state.mode(), ModeKind::BreadthFirst);

        assert!(state.step_bfs());
        assert_eq!(state.current(), 0);
        assert_eq!(state.path(), &[0]);
        assert_eq!(state.frontier().map(|f| f.len()), Some(2));

        // Visited marking lags one expansion behind
        assert!(state.is_visited(0));
        assert!(state.step_bfs());
        assert_eq!(state.current(), 1);
        assert!(!state.is_visited(1));

        let trace = run_to_completion(&mut state);
        assert_eq!(trace, vec![3, 2, 4, 6, 5, 7, 8]);
        assert!(state.is_solved());
        assert_eq!(state.path(), &[0, 3, 6, 7, 8]);
        assert_eq!(state.score(), 0);
        // A finished search stays put
        assert!(!state.step_bfs());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_depth_first_search() {
        let mut state = forked();
        assert!(state.select_dfs());
        assert_eq!(state.mode(), ModeKind::DepthFirst);
        // Wrong search kind
        assert!(!state.step_bfs());

        let mut trace = Vec::new();
        while state.step_dfs() {
            trace.push(state.current());
        }
        // The dead end to the right is explored before the way down
        assert_eq!(trace, vec![0, 1, 2, 5, 3, 4, 6, 7, 8]);
        assert!(state.is_solved());
        assert_eq!(state.path(), &[0, 3, 6, 7, 8]);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_bfs_path_no_longer_than_dfs() {
        for seed in [1, 2, 3] {
            let mut bfs = GameState::new(5, 5, Some(seed)).unwrap();
            let mut dfs = GameState::new(5, 5, Some(seed)).unwrap();
            assert_eq!(bfs.graph(), dfs.graph());

            bfs.select_bfs();
            dfs.select_dfs();
            run_to_completion(&mut bfs);
            run_to_completion(&mut dfs);

            assert!(bfs.is_solved() && dfs.is_solved());
            assert_eq!(bfs.path().first(), Some(&0));
            assert_eq!(bfs.path().last(), Some(&24));
            assert_eq!(dfs.path().last(), Some(&24));
            assert!(bfs.path().len() <= dfs.path().len());
            // Consecutive path cells are joined by passages
            for pair in bfs.path().windows(2) {
                assert!(bfs.edge_between(pair[0], pair[1]));
            }
        }
    }

    #[test]
    fn test_selection_only_while_idle() {
        let mut state = snake();
        assert!(state.select_manual());
        assert!(!state.select_bfs());
        assert!(!state.select_dfs());
        assert_eq!(state.mode(), ModeKind::Manual);
        // Ticks do nothing outside a search
        assert!(!state.tick());
    }

    #[test]
    fn test_reset_keeps_layout() {
        let mut state = GameState::new(6, 4, Some(8)).unwrap();
        let layout = state.graph().clone();
        state.select_dfs();
        for _ in 0..5 {
            state.tick();
        }
        assert_ne!(state.score(), 24);

        state.reset();
        assert_eq!(state.mode(), ModeKind::Idle);
        assert_eq!(state.current(), 0);
        assert_eq!(state.score(), 24);
        assert!(state.path().is_empty());
        assert_eq!(state.visited().count(), 0);
        assert!(state.frontier().is_none());
        assert!(!state.is_solved());
        assert_eq!(state.graph(), &layout);
    }

    #[test]
    fn test_overlay_cycle() {
        let mut state = snake();
        state.toggle_display();
        assert!(state.overlay().shows_visited() && !state.overlay().shows_path());
        state.toggle_display();
        assert!(state.overlay().shows_visited() && state.overlay().shows_path());
        state.toggle_display();
        assert_eq!(state.overlay(), Overlay::Hidden);
    }

    #[test]
    fn test_commands() {
        let mut state = snake();
        // Reset and toggle mean nothing while idle
        state.handle(Command::Reset).unwrap();
        state.handle(Command::ToggleDisplay).unwrap();
        assert_eq!(state.overlay(), Overlay::Hidden);

        state.handle(Command::SelectManual).unwrap();
        state.handle(Command::SelectBfs).unwrap();
        assert_eq!(state.mode(), ModeKind::Manual);

        state.handle(Command::Move(Direction::Right)).unwrap();
        assert_eq!(state.current(), 1);
        state.handle(Command::ToggleDisplay).unwrap();
        assert_eq!(state.overlay(), Overlay::VisitedAndPath);

        state.handle(Command::Reset).unwrap();
        assert_eq!(state.mode(), ModeKind::Idle);
        assert_eq!(state.score(), 9);

        state.handle(Command::SelectBfs).unwrap();
        state.handle(Command::Tick).unwrap();
        assert_eq!(state.score(), 8);
        // Manual moves do nothing during a search
        state.handle(Command::Move(Direction::Right)).unwrap();
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn test_new_maze() {
        let mut state = GameState::new(7, 5, Some(21)).unwrap();
        state.select_manual();
        state.handle(Command::NewMaze).unwrap();
        assert_eq!(state.mode(), ModeKind::Idle);
        assert_eq!((state.width(), state.height()), (7, 5));
        assert_eq!(state.graph().edge_count(), 34);
        assert_eq!(state.score(), 35);
    }
}
