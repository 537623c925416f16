//! The search loop shared by every solver. A [Search] owns a copy of the caller's grid, the
//! solver's frontier and the [PredecessorMap], and advances one visited cell per
//! [step](Search::step) so callers can observe (or pause) the exploration between cells.
use crate::error::GridError;
use crate::frontier::Frontier;
use crate::path::{reconstruct, Path, PredecessorMap};
use crate::pathing_grid::{Coordinate, Grid};
use crate::solver::{Discovery, GridSolver};
use crate::Cost;
use log::trace;
use num_traits::{One, Zero};

/// Where a search is in its life cycle. `Found` and `Exhausted` are final.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// Only the start cell is queued.
    Ready,
    /// At least one cell has been visited and the goal has not.
    Expanding,
    /// The goal cell was visited.
    Found,
    /// The frontier ran dry without reaching the goal.
    Exhausted,
}

impl SearchState {
    pub fn is_finished(&self) -> bool {
        matches!(self, SearchState::Found | SearchState::Exhausted)
    }
}

/// Result of a single [Search::step].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A cell was taken off the frontier and visited.
    Visited(Coordinate),
    /// Nothing left to do; carries the final state.
    Done(SearchState),
}

/// How a complete search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found(Path),
    /// No path exists. A normal result, not an error.
    Exhausted,
    /// Stopped by an external signal before finishing.
    Cancelled,
}

impl Outcome {
    /// The path found, empty for every other outcome.
    pub fn path(&self) -> &[Coordinate] {
        match self {
            Outcome::Found(path) => path,
            _ => &[],
        }
    }

    pub fn into_path(self) -> Path {
        match self {
            Outcome::Found(path) => path,
            _ => Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }
}

/// One in-progress search.
pub struct Search<S: GridSolver> {
    solver: S,
    grid: Grid,
    start: Coordinate,
    goal: Coordinate,
    frontier: S::Frontier,
    nodes: PredecessorMap<Cost>,
    state: SearchState,
    current: Option<Coordinate>,
    visits: usize,
}

impl<S: GridSolver> Search<S> {
    /// Validates `grid` and queues its start cell. The grid is copied with its observer
    /// flags cleared; the caller's value is not touched again.
    pub fn new(solver: S, grid: &Grid) -> Result<Self, GridError> {
        let (start, goal) = grid.validate()?;
        let mut grid = grid.clone();
        grid.clear_marks();
        let nodes = PredecessorMap::new(start);
        let mut frontier = S::Frontier::default();
        frontier.push(0, solver.priority(Cost::zero(), &start, &goal));
        Ok(Search {
            solver,
            grid,
            start,
            goal,
            frontier,
            nodes,
            state: SearchState::Ready,
            current: None,
            visits: 0,
        })
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn goal(&self) -> Coordinate {
        self.goal
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The cell visited by the latest step.
    pub fn current(&self) -> Option<Coordinate> {
        self.current
    }

    /// Number of cells visited so far.
    pub fn visits(&self) -> usize {
        self.visits
    }

    /// Number of entries waiting in the frontier, stale ones included.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn predecessors(&self) -> &PredecessorMap<Cost> {
        &self.nodes
    }

    /// Pops the next cell and, unless it is the goal, expands its neighbours. Entries for
    /// cells that were already visited are dropped without counting as a step.
    pub fn step(&mut self) -> Step {
        if self.state.is_finished() {
            return Step::Done(self.state);
        }
        while let Some(index) = self.frontier.pop() {
            if !self.nodes.close(index) {
                trace!("Skipping stale frontier entry {}", index);
                continue;
            }
            let Some(current) = self.nodes.coordinate(index) else {
                continue;
            };
            self.state = SearchState::Expanding;
            self.current = Some(current);
            self.visits += 1;
            trace!("Visiting {} (visit {})", current, self.visits);
            if current == self.goal {
                self.state = SearchState::Found;
            } else {
                self.expand(index, current);
            }
            return Step::Visited(current);
        }
        self.state = SearchState::Exhausted;
        Step::Done(self.state)
    }

    fn expand(&mut self, index: usize, current: Coordinate) {
        let Some(cost) = self.nodes.cost_at(index) else {
            return;
        };
        let new_cost = cost + Cost::one();
        for neighbor in self.solver.successors(&self.grid, &current) {
            let updated = match S::DISCOVERY {
                Discovery::FirstSeen => self.nodes.discover(neighbor, index, new_cost),
                Discovery::CostImproving => self.nodes.relax(neighbor, index, new_cost),
            };
            if let Some(n) = updated {
                let priority = self.solver.priority(new_cost, &neighbor, &self.goal);
                self.frontier.push(n, priority);
            }
        }
    }

    /// Steps until the search is finished and returns the final state.
    pub fn run_to_completion(&mut self) -> SearchState {
        loop {
            if let Step::Done(state) = self.step() {
                return state;
            }
        }
    }

    /// Copy of the grid with the current cell flagged as visiting.
    pub fn snapshot(&self) -> Grid {
        match self.current {
            Some(current) => self.grid.with_visiting(current),
            None => self.grid.clone(),
        }
    }

    /// The path to the goal once it has been found, empty otherwise.
    pub fn path(&self) -> Path {
        if self.state == SearchState::Found {
            reconstruct(&self.nodes, self.start, self.goal)
        } else {
            Vec::new()
        }
    }

    /// The outcome of a finished search, `None` while it is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            SearchState::Found => Some(Outcome::Found(self.path())),
            SearchState::Exhausted => Some(Outcome::Exhausted),
            _ => None,
        }
    }
}
