use crate::frontier::LinearScanList;
use crate::pathing_grid::Coordinate;
use crate::solver::{Discovery, GridSolver};
use crate::{Algorithm, Cost};

/// A* with the Manhattan distance as heuristic. The open list is scanned linearly for the
/// lowest `cost + heuristic`; the first of equal entries wins, so ties resolve the same way
/// on every run.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    type Frontier = LinearScanList<usize, Cost>;

    const DISCOVERY: Discovery = Discovery::CostImproving;

    fn algorithm(&self) -> Algorithm {
        Algorithm::AStar
    }

    fn heuristic(&self, node: &Coordinate, goal: &Coordinate) -> Cost {
        node.manhattan_distance(goal)
    }

    fn priority(&self, cost: Cost, node: &Coordinate, goal: &Coordinate) -> Cost {
        cost + self.heuristic(node, goal)
    }
}
