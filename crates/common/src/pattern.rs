//! Catalog of well-known seed patterns, laid out near the origin.

use crate::{Cell, LifeError};

/// A named arrangement of live cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i64, i64)],
}

/// 2x2 still life.
pub const BLOCK: Pattern = Pattern {
    name: "block",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

/// Period-2 oscillator; starts horizontal, centered on the origin.
pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    cells: &[(-1, 0), (0, 0), (1, 0)],
};

/// Period-2 oscillator.
pub const TOAD: Pattern = Pattern {
    name: "toad",
    cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
};

/// Period-2 oscillator: two diagonal blocks whose inner corners blink.
pub const BEACON: Pattern = Pattern {
    name: "beacon",
    cells: &[
        (0, 0),
        (1, 0),
        (0, 1),
        (1, 1),
        (2, 2),
        (3, 2),
        (2, 3),
        (3, 3),
    ],
};

/// Spaceship that moves by (+1, +1) every 4 generations.
pub const GLIDER: Pattern = Pattern {
    name: "glider",
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

/// Methuselah that stabilizes after 1103 generations.
pub const R_PENTOMINO: Pattern = Pattern {
    name: "r-pentomino",
    cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
};

/// Every cataloged pattern.
pub const PATTERNS: &[Pattern] = &[BLOCK, BLINKER, TOAD, BEACON, GLIDER, R_PENTOMINO];

impl Pattern {
    /// Look up a pattern by name, ignoring ASCII case.
    pub fn by_name(name: &str) -> Result<Pattern, LifeError> {
        PATTERNS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
    }

    /// Names of every cataloged pattern.
    pub fn names() -> impl Iterator<Item = &'static str> {
        PATTERNS.iter().map(|p| p.name)
    }

    /// The pattern's cells at their catalog positions.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        self.cells.iter().map(|&pair| Cell::from(pair))
    }

    /// The pattern's cells translated by `(dx, dy)`.
    pub fn offset(self, dx: i64, dy: i64) -> impl Iterator<Item = Cell> {
        self.cells().map(move |c| c.offset(dx, dy))
    }
}
