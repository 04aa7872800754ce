use serde::{Deserialize, Serialize};
use std::fmt;

use crate::LifeError;

/// Offsets of the 8 cells in the Moore neighborhood, diagonals included.
pub const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A position on the unbounded grid.
///
/// Ordering is lexicographic on `(x, y)`, which gives sets of cells a
/// canonical iteration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// This cell shifted by `(dx, dy)`.
    ///
    /// Coordinates are not checked for overflow.
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The 8 cells of this cell's Moore neighborhood.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        MOORE_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl From<(i64, i64)> for Cell {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<Cell> for (i64, i64) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A non-empty seeding rectangle, low-inclusive and high-exclusive on both
/// axes: `[x_min, x_max) × [y_min, y_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    x_min: i64,
    x_max: i64,
    y_min: i64,
    y_max: i64,
}

impl Bounds {
    /// Validate and build a rectangle. Fails unless `x_min < x_max` and
    /// `y_min < y_max`.
    pub fn new(x_min: i64, x_max: i64, y_min: i64, y_max: i64) -> Result<Self, LifeError> {
        if x_min >= x_max {
            return Err(LifeError::InvalidArgument(format!(
                "x_min ({x_min}) must be less than x_max ({x_max})"
            )));
        }
        if y_min >= y_max {
            return Err(LifeError::InvalidArgument(format!(
                "y_min ({y_min}) must be less than y_max ({y_max})"
            )));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn x_min(&self) -> i64 {
        self.x_min
    }

    pub fn x_max(&self) -> i64 {
        self.x_max
    }

    pub fn y_min(&self) -> i64 {
        self.y_min
    }

    pub fn y_max(&self) -> i64 {
        self.y_max
    }

    /// Whether `cell` falls inside the half-open rectangle.
    pub fn contains(&self, cell: Cell) -> bool {
        (self.x_min..self.x_max).contains(&cell.x) && (self.y_min..self.y_max).contains(&cell.y)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) x [{}, {})",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}
