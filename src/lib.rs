//! # grid_search
//!
//! Step-by-step pathfinding on a 4-connected, uniform-cost grid. Implements
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search),
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm),
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) and
//! [greedy best-first search](https://en.wikipedia.org/wiki/Best-first_search), all sharing
//! one grid model, one neighbour rule and one path reconstruction step. Searches hand a
//! snapshot of the grid to the caller after every visited cell so the exploration can be
//! watched as it happens; the caller's grid itself is never modified.
//!
//! ```
//! use grid_search::{search, Algorithm, Coordinate, Grid};
//!
//! let grid: Grid = "S#E\n...".parse().unwrap();
//! let path = search(Algorithm::Bfs, &grid, |_snapshot| {}).unwrap();
//! assert_eq!(path.len(), 5);
//! assert_eq!(path[0], Coordinate::new(0, 0));
//! ```
pub mod error;
pub mod frontier;
pub mod path;
pub mod pathfinder;
pub mod pathing_grid;
pub mod search;
pub mod solver;

pub use crate::error::{GridError, Marker, SearchError, SearchResult};
pub use crate::path::{path_cost, path_is_valid, reconstruct, Path, PredecessorMap};
pub use crate::pathfinder::{Pathfinder, SearchReport};
pub use crate::pathing_grid::{manhattan_distance, Cell, Coordinate, Grid};
pub use crate::search::{Outcome, Search, SearchState, Step};

use core::fmt;
use std::str::FromStr;

/// Integer path cost. Every move between neighbouring cells costs one.
pub type Cost = usize;

/// Inline capacity for neighbour lists, a cell has at most four neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// The search strategies the engine offers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Breadth-first search with a FIFO queue.
    Bfs,
    /// Dijkstra's algorithm with a binary min-heap on path cost.
    Dijkstra,
    /// A* ordered by path cost plus Manhattan distance.
    #[default]
    AStar,
    /// Greedy best-first search ordered by Manhattan distance alone.
    GreedyBestFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::GreedyBestFirst,
    ];

    /// Whether the algorithm always returns a shortest path.
    pub fn is_optimal(&self) -> bool {
        !matches!(self, Algorithm::GreedyBestFirst)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A*",
            Algorithm::GreedyBestFirst => "Greedy best-first",
        };
        f.write_str(name)
    }
}

/// Accepts the identifiers used by the visualizer's algorithm selector (`bfs`, `dijkstra`,
/// `aStar`, `gbfs`) along with a few spelled-out variants, case-insensitively.
impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Algorithm::Bfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            "gbfs" | "greedy" | "greedy-best-first" => Ok(Algorithm::GreedyBestFirst),
            _ => Err(SearchError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Runs `algorithm` on a copy of `grid` until the end cell is reached or the frontier runs
/// dry, calling `on_visit` with a snapshot after every visited cell. Returns the path from
/// start to end inclusive, or an empty path if the end cannot be reached.
///
/// Fails with [SearchError::InvalidGrid] before any work is done if the grid lacks a unique
/// start or end cell, or if one of them is a wall.
pub fn search<F>(algorithm: Algorithm, grid: &Grid, on_visit: F) -> SearchResult<Path>
where
    F: FnMut(&Grid),
{
    Pathfinder::new(algorithm)
        .run(grid, on_visit)
        .map(Outcome::into_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selector_names() {
        assert_eq!("aStar".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("gbfs".parse::<Algorithm>(), Ok(Algorithm::GreedyBestFirst));
        assert_eq!(" BFS ".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!("dijkstra".parse::<Algorithm>(), Ok(Algorithm::Dijkstra));
        assert_eq!(
            "jps".parse::<Algorithm>(),
            Err(SearchError::UnknownAlgorithm("jps".to_owned()))
        );
    }

    #[test]
    fn missing_end_is_rejected() {
        let grid: Grid = "S..".parse().unwrap();
        let mut snapshots = 0;
        let result = search(Algorithm::Bfs, &grid, |_| snapshots += 1);
        assert_eq!(
            result,
            Err(SearchError::InvalidGrid(GridError::NotFound(Marker::End)))
        );
        assert_eq!(snapshots, 0);
    }
}
