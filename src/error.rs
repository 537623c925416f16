//! Error types for grid construction and search.
use crate::pathing_grid::{Cell, Coordinate};
use core::fmt;

/// Result type for search entry points.
pub type SearchResult<T> = Result<T, SearchError>;

/// The two cells a searchable grid must mark exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Start,
    End,
}

impl Marker {
    /// Whether `cell` carries this marker.
    pub fn matches(self, cell: &Cell) -> bool {
        match self {
            Marker::Start => cell.is_start,
            Marker::End => cell.is_end,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Marker::Start => write!(f, "start"),
            Marker::End => write!(f, "end"),
        }
    }
}

/// Errors raised while building, editing or validating a [Grid](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A grid needs at least one row and one column.
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyDimensions { rows: usize, cols: usize },

    /// Rows of unequal length.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Coordinate outside the grid.
    #[error("{at} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        at: Coordinate,
        rows: usize,
        cols: usize,
    },

    /// No cell carries the marker.
    #[error("no {0} cell in grid")]
    NotFound(Marker),

    /// More than one cell carries the marker.
    #[error("expected exactly one {marker} cell, found {count}")]
    DuplicateMarker { marker: Marker, count: usize },

    /// The start or end cell is (or would become) a wall.
    #[error("{marker} cell {at} cannot be a wall")]
    MarkerOnWall { marker: Marker, at: Coordinate },

    /// Unrecognized character in a textual grid.
    #[error("unknown tile {tile:?} at {at}")]
    UnknownTile { tile: char, at: Coordinate },
}

/// Errors returned by the search entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The grid was rejected before any search work started.
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] GridError),

    /// An algorithm name that does not parse.
    #[error("unknown algorithm {0:?}, expected one of bfs, dijkstra, astar, gbfs")]
    UnknownAlgorithm(String),
}
