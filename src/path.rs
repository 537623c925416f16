//! Predecessor bookkeeping shared by the searches, and turning it back into a path.
use crate::error::Marker;
use crate::pathing_grid::{Coordinate, Grid};
use crate::Cost;
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use itertools::Itertools;
use num_traits::Zero;
use std::iter;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Cells from start to end inclusive. Empty when no path exists.
pub type Path = Vec<Coordinate>;

const NO_PARENT: usize = usize::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Node<C> {
    parent: usize,
    cost: C,
    closed: bool,
}

/// Every coordinate a search has discovered, in discovery order, with the index of the node
/// it was reached from and the best cost found for it so far. Node indices are stable, so
/// frontiers store them instead of coordinates.
#[derive(Clone, Debug)]
pub struct PredecessorMap<C = Cost> {
    nodes: FxIndexMap<Coordinate, Node<C>>,
}

impl<C: Zero + Ord + Copy> PredecessorMap<C> {
    /// A map holding only `start` (index 0, cost zero, no parent).
    pub fn new(start: Coordinate) -> Self {
        let mut nodes = FxIndexMap::default();
        nodes.insert(
            start,
            Node {
                parent: NO_PARENT,
                cost: Zero::zero(),
                closed: false,
            },
        );
        PredecessorMap { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.nodes.contains_key(coord)
    }

    pub fn index_of(&self, coord: &Coordinate) -> Option<usize> {
        self.nodes.get_index_of(coord)
    }

    pub fn coordinate(&self, index: usize) -> Option<Coordinate> {
        self.nodes.get_index(index).map(|(coord, _)| *coord)
    }

    pub fn cost(&self, coord: &Coordinate) -> Option<C> {
        self.nodes.get(coord).map(|node| node.cost)
    }

    pub fn cost_at(&self, index: usize) -> Option<C> {
        self.nodes.get_index(index).map(|(_, node)| node.cost)
    }

    fn parent_index(&self, index: usize) -> Option<usize> {
        self.nodes
            .get_index(index)
            .map(|(_, node)| node.parent)
            .filter(|&parent| parent != NO_PARENT)
    }

    /// The coordinate `coord` was discovered from. `None` for the start and for unseen cells.
    pub fn predecessor(&self, coord: &Coordinate) -> Option<Coordinate> {
        let index = self.index_of(coord)?;
        self.parent_index(index)
            .and_then(|parent| self.coordinate(parent))
    }

    /// Records `node` if it has never been seen. Returns its index when it was added.
    pub fn discover(&mut self, node: Coordinate, parent: usize, cost: C) -> Option<usize> {
        match self.nodes.entry(node) {
            Vacant(e) => {
                let n = e.index();
                e.insert(Node {
                    parent,
                    cost,
                    closed: false,
                });
                Some(n)
            }
            Occupied(_) => None,
        }
    }

    /// Records `node` if it is new or `cost` beats its best known cost. An improved node is
    /// reopened. Returns its index when anything changed.
    pub fn relax(&mut self, node: Coordinate, parent: usize, cost: C) -> Option<usize> {
        let n;
        match self.nodes.entry(node) {
            Vacant(e) => {
                n = e.index();
                e.insert(Node {
                    parent,
                    cost,
                    closed: false,
                });
            }
            Occupied(mut e) => {
                if e.get().cost > cost {
                    n = e.index();
                    e.insert(Node {
                        parent,
                        cost,
                        closed: false,
                    });
                } else {
                    return None;
                }
            }
        }
        Some(n)
    }

    /// Marks a node as finalized. Returns `false` if it already was (or does not exist), in
    /// which case the caller is holding a stale frontier entry.
    pub fn close(&mut self, index: usize) -> bool {
        match self.nodes.get_index_mut(index) {
            Some((_, node)) if !node.closed => {
                node.closed = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_closed(&self, index: usize) -> bool {
        self.nodes
            .get_index(index)
            .is_some_and(|(_, node)| node.closed)
    }
}

/// Walks the predecessor chain back from `end` and returns it in start-to-end order.
/// `start == end` gives `[start]`; an `end` that was never discovered, or a chain that does
/// not lead back to `start`, gives an empty path.
pub fn reconstruct<C>(predecessors: &PredecessorMap<C>, start: Coordinate, end: Coordinate) -> Path
where
    C: Zero + Ord + Copy,
{
    if start == end {
        return vec![start];
    }
    let Some(end_index) = predecessors.index_of(&end) else {
        return Vec::new();
    };
    let mut path: Path = iter::successors(Some(end_index), |&ix| predecessors.parent_index(ix))
        .take(predecessors.len())
        .filter_map(|ix| predecessors.coordinate(ix))
        .take_while_inclusive(|coord| *coord != start)
        .collect();
    if path.last() != Some(&start) {
        return Vec::new();
    }
    path.reverse();
    path
}

/// Number of moves along `path`.
pub fn path_cost(path: &[Coordinate]) -> Cost {
    path.len().saturating_sub(1)
}

/// Checks that `path` starts on the grid's start cell, ends on its end cell, only crosses
/// open cells and only makes single orthogonal steps.
pub fn path_is_valid(grid: &Grid, path: &[Coordinate]) -> bool {
    let (Ok(start), Ok(end)) = (grid.locate(Marker::Start), grid.locate(Marker::End)) else {
        return false;
    };
    path.first() == Some(&start)
        && path.last() == Some(&end)
        && path.iter().all(|p| grid.can_move_to(*p))
        && path
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.manhattan_distance(b) == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn reconstructs_chain_in_order() {
        let mut map: PredecessorMap = PredecessorMap::new(c(0, 0));
        let a = map.discover(c(0, 1), 0, 1).unwrap();
        let b = map.discover(c(1, 1), a, 2).unwrap();
        map.discover(c(2, 1), b, 3).unwrap();
        assert_eq!(
            reconstruct(&map, c(0, 0), c(2, 1)),
            vec![c(0, 0), c(0, 1), c(1, 1), c(2, 1)]
        );
        assert_eq!(map.predecessor(&c(1, 1)), Some(c(0, 1)));
        assert_eq!(map.predecessor(&c(0, 0)), None);
    }

    #[test]
    fn undiscovered_end_has_no_path() {
        let map: PredecessorMap = PredecessorMap::new(c(0, 0));
        assert!(reconstruct(&map, c(0, 0), c(3, 3)).is_empty());
    }

    #[test]
    fn start_equal_to_end() {
        let map: PredecessorMap = PredecessorMap::new(c(1, 1));
        assert_eq!(reconstruct(&map, c(1, 1), c(1, 1)), vec![c(1, 1)]);
    }

    #[test]
    fn chain_not_reaching_start_has_no_path() {
        let map: PredecessorMap = PredecessorMap::new(c(0, 0));
        assert!(reconstruct(&map, c(5, 5), c(0, 0)).is_empty());
    }

    #[test]
    fn discover_only_once() {
        let mut map: PredecessorMap = PredecessorMap::new(c(0, 0));
        assert_eq!(map.discover(c(0, 1), 0, 1), Some(1));
        assert_eq!(map.discover(c(0, 1), 0, 0), None);
        assert_eq!(map.discover(c(0, 0), 1, 2), None);
        assert_eq!(map.cost(&c(0, 1)), Some(1));
    }

    #[test]
    fn relax_keeps_best_cost_and_reopens() {
        let mut map: PredecessorMap = PredecessorMap::new(c(0, 0));
        let ix = map.relax(c(2, 2), 0, 9).unwrap();
        assert!(map.close(ix));
        assert!(!map.close(ix));
        assert_eq!(map.relax(c(2, 2), 0, 9), None);
        assert_eq!(map.relax(c(2, 2), 0, 4), Some(ix));
        assert_eq!(map.cost_at(ix), Some(4));
        assert!(!map.is_closed(ix));
    }

    #[test]
    fn validates_paths() {
        let grid: Grid = "S#E\n...".parse().unwrap();
        let good = vec![c(0, 0), c(1, 0), c(1, 1), c(1, 2), c(0, 2)];
        assert!(path_is_valid(&grid, &good));
        assert_eq!(path_cost(&good), 4);
        // through the wall
        assert!(!path_is_valid(&grid, &[c(0, 0), c(0, 1), c(0, 2)]));
        // diagonal jump
        assert!(!path_is_valid(&grid, &[c(0, 0), c(1, 1), c(1, 2), c(0, 2)]));
        assert!(!path_is_valid(&grid, &[]));
        assert_eq!(path_cost(&[]), 0);
    }
}
