//! Whole-search driver: picks the solver for an [Algorithm], runs it until it finishes (or
//! is cancelled) and reports every visited cell to an observer callback.
use crate::error::SearchResult;
use crate::pathing_grid::{Coordinate, Grid};
use crate::search::{Outcome, Search, Step};
use crate::solver::{
    astar::AstarSolver, bfs::BfsSolver, dijkstra::DijkstraSolver, greedy::GreedySolver,
    GridSolver,
};
use crate::Algorithm;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Everything a finished run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub algorithm: Algorithm,
    pub outcome: Outcome,
    /// Cells in the order they were visited, one per snapshot handed to the observer.
    pub visit_order: Vec<Coordinate>,
}

impl SearchReport {
    pub fn visits(&self) -> usize {
        self.visit_order.len()
    }
}

/// Runs searches with a fixed algorithm and an optional cancellation flag.
///
/// ```
/// use grid_search::{Algorithm, Grid, Outcome, Pathfinder};
/// use std::sync::atomic::AtomicBool;
/// use std::sync::Arc;
///
/// let grid: Grid = "S..\n..E".parse().unwrap();
/// let cancel = Arc::new(AtomicBool::new(true));
/// let outcome = Pathfinder::new(Algorithm::Dijkstra)
///     .with_cancel_signal(cancel)
///     .run(&grid, |_| {})
///     .unwrap();
/// assert_eq!(outcome, Outcome::Cancelled);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    algorithm: Algorithm,
    cancel_signal: Option<Arc<AtomicBool>>,
}

impl Pathfinder {
    pub fn new(algorithm: Algorithm) -> Pathfinder {
        Pathfinder {
            algorithm,
            cancel_signal: None,
        }
    }

    /// The run stops with [Outcome::Cancelled] at the next visit once `signal` is set. A
    /// search that already reached the end or ran dry keeps its outcome.
    pub fn with_cancel_signal(mut self, signal: Arc<AtomicBool>) -> Pathfinder {
        self.cancel_signal = Some(signal);
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn cancel_signal(&self) -> Option<&Arc<AtomicBool>> {
        self.cancel_signal.as_ref()
    }

    /// Searches `grid`, calling `on_visit` with a snapshot after every visited cell.
    pub fn run<F>(&self, grid: &Grid, on_visit: F) -> SearchResult<Outcome>
    where
        F: FnMut(&Grid),
    {
        self.run_report(grid, on_visit).map(|report| report.outcome)
    }

    /// Like [run](Self::run), but also returns the visit order.
    pub fn run_report<F>(&self, grid: &Grid, on_visit: F) -> SearchResult<SearchReport>
    where
        F: FnMut(&Grid),
    {
        match self.algorithm {
            Algorithm::Bfs => self.drive(BfsSolver, grid, on_visit),
            Algorithm::Dijkstra => self.drive(DijkstraSolver, grid, on_visit),
            Algorithm::AStar => self.drive(AstarSolver::new(), grid, on_visit),
            Algorithm::GreedyBestFirst => self.drive(GreedySolver, grid, on_visit),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_signal
            .as_ref()
            .is_some_and(|signal| signal.load(Ordering::Relaxed))
    }

    fn drive<S, F>(&self, solver: S, grid: &Grid, mut on_visit: F) -> SearchResult<SearchReport>
    where
        S: GridSolver,
        F: FnMut(&Grid),
    {
        let algorithm = solver.algorithm();
        let mut search = Search::new(solver, grid)?;
        info!(
            "Running {} from {} to {} on a {}x{} grid",
            algorithm,
            search.start(),
            search.goal(),
            grid.rows(),
            grid.cols()
        );
        let mut visit_order = Vec::new();
        let outcome = loop {
            if !search.state().is_finished() && self.is_cancelled() {
                warn!("{} cancelled after {} visits", algorithm, visit_order.len());
                break Outcome::Cancelled;
            }
            match search.step() {
                Step::Visited(coord) => {
                    visit_order.push(coord);
                    on_visit(&search.snapshot());
                }
                Step::Done(_) => match search.outcome() {
                    Some(outcome) => break outcome,
                    None => break Outcome::Exhausted,
                },
            }
        };
        match &outcome {
            Outcome::Found(path) => info!(
                "{} found a path of {} cells after {} visits",
                algorithm,
                path.len(),
                visit_order.len()
            ),
            Outcome::Exhausted => info!(
                "{} exhausted the grid after {} visits without reaching the end",
                algorithm,
                visit_order.len()
            ),
            Outcome::Cancelled => {}
        }
        Ok(SearchReport {
            algorithm,
            outcome,
            visit_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GridError, Marker, SearchError};

    fn grid(s: &str) -> Grid {
        s.parse().unwrap()
    }

    #[test]
    fn snapshots_follow_visit_order() {
        let grid = grid("S..\n.#.\n..E");
        for algorithm in Algorithm::ALL {
            let mut seen = Vec::new();
            let report = Pathfinder::new(algorithm)
                .run_report(&grid, |snapshot| seen.push(snapshot.visiting()))
                .unwrap();
            assert_eq!(report.algorithm, algorithm);
            assert_eq!(
                seen,
                report.visit_order.iter().copied().map(Some).collect::<Vec<_>>()
            );
            assert_eq!(report.outcome.path().len(), 5);
        }
    }

    #[test]
    fn cancel_from_observer() {
        let grid = grid("S....\n.....\n....E");
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        let mut visits = 0;
        let report = Pathfinder::new(Algorithm::Bfs)
            .with_cancel_signal(cancel)
            .run_report(&grid, |_| {
                visits += 1;
                if visits == 3 {
                    flag.store(true, Ordering::Relaxed);
                }
            })
            .unwrap();
        assert_eq!(report.outcome, Outcome::Cancelled);
        assert_eq!(report.visits(), 3);
        assert!(report.outcome.path().is_empty());
    }

    #[test]
    fn cancel_after_goal_keeps_path() {
        let grid = grid("S.E");
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        let report = Pathfinder::new(Algorithm::Bfs)
            .with_cancel_signal(cancel)
            .run_report(&grid, |snapshot| {
                if snapshot.visiting() == Some(Coordinate::new(0, 2)) {
                    flag.store(true, Ordering::Relaxed);
                }
            })
            .unwrap();
        assert!(report.outcome.is_found());
        assert_eq!(report.outcome.path().len(), 3);
        assert_eq!(report.visits(), 3);
    }

    #[test]
    fn unset_signal_does_not_interfere() {
        let grid = grid("S#E\n...");
        let outcome = Pathfinder::new(Algorithm::AStar)
            .with_cancel_signal(Arc::new(AtomicBool::new(false)))
            .run(&grid, |_| {})
            .unwrap();
        assert_eq!(outcome.path().len(), 5);
    }

    #[test]
    fn unreachable_end_is_exhausted() {
        let grid = grid("S#\n#E");
        let report = Pathfinder::new(Algorithm::GreedyBestFirst)
            .run_report(&grid, |_| {})
            .unwrap();
        assert_eq!(report.outcome, Outcome::Exhausted);
        assert_eq!(report.visit_order, vec![Coordinate::new(0, 0)]);
    }

    #[test]
    fn invalid_grid_fails_before_observing() {
        let grid = grid("S.S\n..E");
        let mut calls = 0;
        let result = Pathfinder::default().run(&grid, |_| calls += 1);
        assert_eq!(
            result,
            Err(SearchError::InvalidGrid(GridError::DuplicateMarker {
                marker: Marker::Start,
                count: 2
            }))
        );
        assert_eq!(calls, 0);
    }
}
