use crate::error::{GridError, Marker};
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use log::debug;
use petgraph::unionfind::UnionFind;
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;
use std::str::FromStr;

/// Row/column offsets of the 4-neighborhood in expansion order: right, down, up, left.
/// This order only matters for tie-breaking, but keeps visit orders reproducible.
const NEUMANN_OFFSETS: [(isize, isize); 4] = [(0, 1), (1, 0), (-1, 0), (0, -1)];

/// A cell position, `row` counted from the top and `col` from the left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Coordinate {
        Coordinate { row, col }
    }

    /// `|a.row - b.row| + |a.col - b.col|`. Admissible and consistent on a 4-connected
    /// unit-cost grid.
    pub fn manhattan_distance(&self, other: &Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    fn offset(&self, d_row: isize, d_col: isize) -> Option<Coordinate> {
        Some(Coordinate::new(
            self.row.checked_add_signed(d_row)?,
            self.col.checked_add_signed(d_col)?,
        ))
    }

    /// The up to four orthogonal neighbours, ignoring grid bounds on the far side.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Coordinate; N_SMALLVEC_SIZE]> {
        NEUMANN_OFFSETS
            .iter()
            .filter_map(|&(d_row, d_col)| self.offset(d_row, d_col))
            .collect()
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Free-function form of [Coordinate::manhattan_distance].
pub fn manhattan_distance(a: &Coordinate, b: &Coordinate) -> usize {
    a.manhattan_distance(b)
}

/// State of a single grid cell. `is_visiting` and `is_path` only exist for observers and
/// never influence a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub is_start: bool,
    pub is_end: bool,
    pub is_wall: bool,
    pub is_visiting: bool,
    pub is_path: bool,
}

impl Cell {
    pub const fn wall() -> Cell {
        Cell {
            is_start: false,
            is_end: false,
            is_wall: true,
            is_visiting: false,
            is_path: false,
        }
    }

    fn tile(&self) -> char {
        if self.is_start {
            'S'
        } else if self.is_end {
            'E'
        } else if self.is_wall {
            '#'
        } else if self.is_visiting {
            'o'
        } else if self.is_path {
            '*'
        } else {
            '.'
        }
    }

    fn from_tile(tile: char) -> Option<Cell> {
        let mut cell = Cell::default();
        match tile {
            'S' => cell.is_start = true,
            'E' | 'G' => cell.is_end = true,
            '#' => cell.is_wall = true,
            'o' => cell.is_visiting = true,
            '*' => cell.is_path = true,
            '.' => {}
            _ => return None,
        }
        Some(cell)
    }
}

/// A rectangular `rows x cols` grid of [Cell]s stored in row-major order. Walls block
/// movement, movement is 4-directional and every step costs one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An open grid without start, end or walls.
    pub fn new(rows: usize, cols: usize) -> Result<Grid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }
        Ok(Grid {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        })
    }

    /// Builds a grid from nested rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Grid, GridError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(GridError::EmptyDimensions {
                rows: n_rows,
                cols: n_cols,
            });
        }
        let mut cells = Vec::with_capacity(n_rows * n_cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n_cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: n_cols,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }
        Ok(Grid {
            rows: n_rows,
            cols: n_cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Row-major index of `coord`, if it lies on the grid.
    pub fn index_of(&self, coord: Coordinate) -> Option<usize> {
        self.in_bounds(coord).then(|| coord.row * self.cols + coord.col)
    }

    /// Inverse of [index_of](Self::index_of).
    pub fn coordinate_of(&self, ix: usize) -> Coordinate {
        Coordinate::new(ix / self.cols, ix % self.cols)
    }

    fn checked_index(&self, coord: Coordinate) -> Result<usize, GridError> {
        self.index_of(coord).ok_or(GridError::OutOfBounds {
            at: coord,
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn get(&self, coord: Coordinate) -> Option<&Cell> {
        self.index_of(coord).map(|ix| &self.cells[ix])
    }

    /// Iterates over all cells with their coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(ix, cell)| (self.coordinate_of(ix), cell))
    }

    /// First coordinate whose cell satisfies `predicate`.
    pub fn find<P>(&self, predicate: P) -> Option<Coordinate>
    where
        P: Fn(&Cell) -> bool,
    {
        self.cells
            .iter()
            .position(predicate)
            .map(|ix| self.coordinate_of(ix))
    }

    /// The unique cell carrying `marker`.
    pub fn locate(&self, marker: Marker) -> Result<Coordinate, GridError> {
        let mut matches = self.iter().filter(|(_, cell)| marker.matches(cell));
        let found = matches.next().ok_or(GridError::NotFound(marker))?.0;
        let extra = matches.count();
        if extra > 0 {
            return Err(GridError::DuplicateMarker {
                marker,
                count: extra + 1,
            });
        }
        Ok(found)
    }

    /// Checks the invariants a search relies on and returns `(start, end)`.
    pub fn validate(&self) -> Result<(Coordinate, Coordinate), GridError> {
        let start = self.locate(Marker::Start)?;
        let end = self.locate(Marker::End)?;
        for (marker, at) in [(Marker::Start, start), (Marker::End, end)] {
            if self.cells[self.checked_index(at)?].is_wall {
                return Err(GridError::MarkerOnWall { marker, at });
            }
        }
        debug!("Validated {}x{} grid, start {} end {}", self.rows, self.cols, start, end);
        Ok((start, end))
    }

    pub fn can_move_to(&self, coord: Coordinate) -> bool {
        self.get(coord).is_some_and(|cell| !cell.is_wall)
    }

    /// Open orthogonal neighbours of `coord`, in the order right, down, up, left.
    pub fn neighbors(&self, coord: &Coordinate) -> SmallVec<[Coordinate; N_SMALLVEC_SIZE]> {
        coord
            .neumann_neighborhood()
            .into_iter()
            .filter(|p| self.can_move_to(*p))
            .collect()
    }

    /// Places or removes a wall. The start and end cells cannot be walled.
    pub fn set_wall(&mut self, coord: Coordinate, wall: bool) -> Result<(), GridError> {
        let ix = self.checked_index(coord)?;
        let cell = &mut self.cells[ix];
        if wall {
            if cell.is_start {
                return Err(GridError::MarkerOnWall {
                    marker: Marker::Start,
                    at: coord,
                });
            }
            if cell.is_end {
                return Err(GridError::MarkerOnWall {
                    marker: Marker::End,
                    at: coord,
                });
            }
        }
        cell.is_wall = wall;
        Ok(())
    }

    /// Moves the start marker to `coord`, clearing any wall there.
    pub fn set_start(&mut self, coord: Coordinate) -> Result<(), GridError> {
        self.move_marker(Marker::Start, coord)
    }

    /// Moves the end marker to `coord`, clearing any wall there.
    pub fn set_end(&mut self, coord: Coordinate) -> Result<(), GridError> {
        self.move_marker(Marker::End, coord)
    }

    fn move_marker(&mut self, marker: Marker, coord: Coordinate) -> Result<(), GridError> {
        let ix = self.checked_index(coord)?;
        for cell in self.cells.iter_mut() {
            match marker {
                Marker::Start => cell.is_start = false,
                Marker::End => cell.is_end = false,
            }
        }
        let cell = &mut self.cells[ix];
        match marker {
            Marker::Start => cell.is_start = true,
            Marker::End => cell.is_end = true,
        }
        cell.is_wall = false;
        Ok(())
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_wall).count()
    }

    pub fn clear_walls(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.is_wall = false);
    }

    /// Resets the observer flags (`is_visiting`, `is_path`).
    pub fn clear_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.is_visiting = false;
            cell.is_path = false;
        }
    }

    /// A copy with only `coord` flagged as visiting.
    pub fn with_visiting(&self, coord: Coordinate) -> Grid {
        let mut snapshot = self.clone();
        if let Some(ix) = snapshot.index_of(coord) {
            snapshot.cells[ix].is_visiting = true;
        }
        snapshot
    }

    /// A copy with every cell of `path` flagged as part of the path.
    pub fn with_path(&self, path: &[Coordinate]) -> Grid {
        let mut marked = self.clone();
        for p in path {
            if let Some(ix) = marked.index_of(*p) {
                marked.cells[ix].is_path = true;
            }
        }
        marked
    }

    /// The first cell flagged as visiting, if any.
    pub fn visiting(&self) -> Option<Coordinate> {
        self.find(|cell| cell.is_visiting)
    }

    /// Turns `density_percent`% of all cells into walls, choosing uniformly among cells that
    /// are neither start, end nor already a wall. Returns the number of walls placed, which
    /// is lower than requested when the grid runs out of free cells.
    pub fn place_random_walls<R>(&mut self, density_percent: u8, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        let density = usize::from(density_percent.min(100));
        let requested = density * self.cells.len() / 100;
        let free = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_start && !cell.is_end && !cell.is_wall)
            .map(|(ix, _)| ix)
            .collect::<Vec<usize>>();
        let chosen = free
            .choose_multiple(rng, requested.min(free.len()))
            .copied()
            .collect::<Vec<usize>>();
        for &ix in &chosen {
            self.cells[ix].is_wall = true;
        }
        debug!("Placed {} of {} requested walls", chosen.len(), requested);
        chosen.len()
    }

    /// Generates a new [UnionFind] structure in which open cells that are 4-connected share
    /// a component. Indices are row-major, see [index_of](Self::index_of).
    pub fn components(&self) -> UnionFind<usize> {
        debug!("Generating connected components");
        let mut components = UnionFind::new(self.cells.len());
        for (ix, cell) in self.cells.iter().enumerate() {
            if cell.is_wall {
                continue;
            }
            let point = self.coordinate_of(ix);
            [
                Coordinate::new(point.row, point.col + 1),
                Coordinate::new(point.row + 1, point.col),
            ]
            .into_iter()
            .filter(|p| self.can_move_to(*p))
            .filter_map(|p| self.index_of(p))
            .for_each(|n_ix| {
                components.union(ix, n_ix);
            });
        }
        components
    }

    /// Checks if both points are open and on the same connected component.
    pub fn reachable(&self, start: &Coordinate, goal: &Coordinate) -> bool {
        match (self.index_of(*start), self.index_of(*goal)) {
            (Some(start_ix), Some(goal_ix)) => {
                self.can_move_to(*start)
                    && self.can_move_to(*goal)
                    && self.components().equiv(start_ix, goal_ix)
            }
            _ => false,
        }
    }
}

/// One row per line using `S` start, `E` end, `#` wall, `o` visiting, `*` path, `.` open.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line = row.iter().map(Cell::tile).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the format written by [Display](fmt::Display); `G` is accepted for the end as
/// well. Blank lines and surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, tile)| {
                        Cell::from_tile(tile).ok_or(GridError::UnknownTile {
                            tile,
                            at: Coordinate::new(row, col),
                        })
                    })
                    .collect::<Result<Vec<Cell>, GridError>>()
            })
            .collect::<Result<Vec<Vec<Cell>>, GridError>>()?;
        Grid::from_rows(rows)
    }
}
