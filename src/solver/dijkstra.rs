use crate::frontier::MinHeap;
use crate::pathing_grid::Coordinate;
use crate::solver::{Discovery, GridSolver};
use crate::{Algorithm, Cost};

/// Dijkstra's algorithm on path cost alone. A cell may sit in the heap more than once;
/// entries for cells that were already visited are skipped when popped.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Frontier = MinHeap<usize, Cost>;

    const DISCOVERY: Discovery = Discovery::CostImproving;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn priority(&self, cost: Cost, _node: &Coordinate, _goal: &Coordinate) -> Cost {
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathing_grid::Grid;
    use crate::search::{Search, SearchState};

    /// Asserts that the optimal 4 step solution is found.
    #[test]
    fn solve_simple_problem() {
        let grid: Grid = "S..\n.#.\n..E".parse().unwrap();
        let path = DijkstraSolver.get_path(&grid).unwrap();
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_complex() {
        // 10x10 with four pillars, start top left, end at (7, 7)
        let grid: Grid = "\
            S....#....
            .#........
            ..........
            ..........
            ..........
            #.........
            ..........
            .......E..
            ........#.
            .........."
            .parse()
            .unwrap();
        let mut search = Search::new(DijkstraSolver, &grid).unwrap();
        assert_eq!(search.run_to_completion(), SearchState::Found);
        assert_eq!(search.path().len(), 15);
        // Every cell closer than the goal is settled before it
        assert!(search.visits() >= 15);
    }
}
