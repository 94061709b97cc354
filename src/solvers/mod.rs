use std::collections::{HashSet, VecDeque};

mod bfs;
mod dfs;

use crate::maze::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Bfs,
    Dfs,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
        }
    }
}

impl Solver {
    /// Candidate neighbors of `node` in the order this solver checks them.
    /// `None` marks a candidate whose index would underflow or overflow.
    pub fn neighbors(self, node: usize, width: usize) -> [Option<usize>; 4] {
        match self {
            Solver::Bfs => bfs::neighbors(node, width),
            Solver::Dfs => dfs::neighbors(node, width),
        }
    }
}

/// A discovered node waiting to be expanded, with the route taken to discover it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub node: usize,
    /// Nodes from the start up to, but not including, `node`.
    /// Once the entry is expanded, `node` is appended.
    pub path: Vec<usize>,
}

/// Work list of a search: a queue for BFS, a stack for DFS.
#[derive(Debug, Clone)]
pub struct Frontier {
    solver: Solver,
    entries: VecDeque<FrontierEntry>,
}

impl Frontier {
    /// Creates a frontier holding only `start`, reached by an empty path.
    pub fn seeded(solver: Solver, start: usize) -> Self {
        let mut frontier = Frontier {
            solver,
            entries: VecDeque::new(),
        };
        frontier.push(FrontierEntry {
            node: start,
            path: Vec::new(),
        });
        frontier
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nodes currently waiting, in the order they will be taken.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        let ordered: Box<dyn Iterator<Item = &FrontierEntry> + '_> = match self.solver {
            Solver::Bfs => Box::new(self.entries.iter()),
            Solver::Dfs => Box::new(self.entries.iter().rev()),
        };
        ordered.map(|entry| entry.node)
    }

    pub fn push(&mut self, entry: FrontierEntry) {
        self.entries.push_back(entry);
    }

    /// Takes the next entry: oldest first for BFS, newest first for DFS.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        match self.solver {
            Solver::Bfs => self.entries.pop_front(),
            Solver::Dfs => self.entries.pop_back(),
        }
    }

    /// Runs one search iteration.
    ///
    /// Takes the next entry and extends its path with the entry's node, marks `previous`
    /// (the node expanded last time) as visited, and then pushes every unvisited neighbor
    /// joined to the node by an edge, each with its own copy of the path.
    ///
    /// Returns the expanded entry, whose `path` now ends at its `node`, or `None` when the
    /// frontier is empty.
    pub fn advance(
        &mut self,
        graph: &Graph,
        previous: usize,
        visited: &mut HashSet<usize>,
    ) -> Option<FrontierEntry> {
        let FrontierEntry { node, mut path } = self.pop()?;
        path.push(node);

        visited.insert(previous);

        self.solver
            .neighbors(node, graph.width())
            .into_iter()
            .flatten()
            .filter(|&next| graph.edge_between(node, next) && !visited.contains(&next))
            .for_each(|next| {
                tracing::trace!("[solver] {} discovered {} from {}", self.solver, next, node);
                self.entries.push_back(FrontierEntry {
                    node: next,
                    path: path.clone(),
                });
            });

        Some(FrontierEntry { node, path })
    }
}
