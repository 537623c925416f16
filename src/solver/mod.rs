use crate::error::GridError;
use crate::frontier::Frontier;
use crate::path::Path;
use crate::pathing_grid::{Coordinate, Grid};
use crate::search::Search;
use crate::{Algorithm, Cost, N_SMALLVEC_SIZE};
use smallvec::SmallVec;

pub mod astar;
pub mod bfs;
pub mod dijkstra;
pub mod greedy;

/// How a solver treats a neighbour it reaches again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discovery {
    /// Only the first discovery counts; later ones are ignored.
    FirstSeen,
    /// A neighbour is updated and re-queued whenever a cheaper route to it is found.
    CostImproving,
}

/// The parts in which the four searches differ: frontier structure, discovery rule and
/// priority. Everything else is shared by [Search].
pub trait GridSolver {
    type Frontier: Frontier<usize, Cost> + Default;

    const DISCOVERY: Discovery;

    fn algorithm(&self) -> Algorithm;

    /// Estimate of the remaining cost from `node` to `goal`.
    fn heuristic(&self, _node: &Coordinate, _goal: &Coordinate) -> Cost {
        0
    }

    /// Frontier key of a node reached with path cost `cost`.
    fn priority(&self, cost: Cost, node: &Coordinate, goal: &Coordinate) -> Cost;

    fn successors(
        &self,
        grid: &Grid,
        node: &Coordinate,
    ) -> SmallVec<[Coordinate; N_SMALLVEC_SIZE]> {
        grid.neighbors(node)
    }

    /// Runs the search to completion without observing it.
    fn get_path(&self, grid: &Grid) -> Result<Path, GridError>
    where
        Self: Clone,
    {
        let mut search = Search::new(self.clone(), grid)?;
        search.run_to_completion();
        Ok(search.path())
    }
}
