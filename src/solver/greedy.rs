use crate::frontier::LinearScanList;
use crate::pathing_grid::Coordinate;
use crate::solver::{Discovery, GridSolver};
use crate::{Algorithm, Cost};

/// Greedy best-first search: always continues from the discovered cell closest to the goal
/// by Manhattan distance, ignoring the cost already paid. Usually fast, not always shortest.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySolver;

impl GridSolver for GreedySolver {
    type Frontier = LinearScanList<usize, Cost>;

    const DISCOVERY: Discovery = Discovery::FirstSeen;

    fn algorithm(&self) -> Algorithm {
        Algorithm::GreedyBestFirst
    }

    fn heuristic(&self, node: &Coordinate, goal: &Coordinate) -> Cost {
        node.manhattan_distance(goal)
    }

    fn priority(&self, _cost: Cost, node: &Coordinate, goal: &Coordinate) -> Cost {
        self.heuristic(node, goal)
    }
}
