use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// All eight surrounding offsets, without any bounds check.
    /// Offsets that would go below zero are skipped.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        (-1isize..=1)
            .cartesian_product(-1isize..=1)
            .filter(|&offset| offset != (0, 0))
            .filter_map(move |(dr, dc)| {
                Some(Position::new(
                    self.row.checked_add_signed(dr)?,
                    self.col.checked_add_signed(dc)?,
                ))
            })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

/// Fixed grid bounds: `height` rows by `width` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub height: usize,
    pub width: usize,
}

impl Dimensions {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub fn area(&self) -> usize {
        self.height * self.width
    }

    /// Up to eight grid-adjacent cells, clipped at the edges.
    pub fn neighbors(&self, pos: Position) -> HashSet<Position> {
        pos.neighbors().filter(|p| self.contains(*p)).collect()
    }

    /// Every cell of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        (0..self.height)
            .cartesian_product(0..self.width)
            .map(Position::from)
    }
}
