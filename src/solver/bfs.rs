use crate::frontier::FifoQueue;
use crate::pathing_grid::Coordinate;
use crate::solver::{Discovery, GridSolver};
use crate::{Algorithm, Cost};

/// Breadth-first search. Cells leave the queue in the order they were discovered, which on a
/// unit-cost grid means in order of distance from the start.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    type Frontier = FifoQueue<usize>;

    const DISCOVERY: Discovery = Discovery::FirstSeen;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }

    fn priority(&self, _cost: Cost, _node: &Coordinate, _goal: &Coordinate) -> Cost {
        0
    }
}
