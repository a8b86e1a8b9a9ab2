use crate::Position;
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;

/// A logical statement about the board: exactly `count` of `cells` are mines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    cells: HashSet<Position>,
    count: usize,
}

impl Sentence {
    pub fn new(cells: impl IntoIterator<Item = Position>, count: usize) -> Self {
        let cells: HashSet<Position> = cells.into_iter().collect();
        assert!(
            count <= cells.len(),
            "sentence claims {count} mines among {} cells",
            cells.len()
        );
        Self { cells, count }
    }

    pub fn cells(&self) -> &HashSet<Position> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every cell, if the count says all of them are mines.
    pub fn known_mines(&self) -> HashSet<Position> {
        if !self.cells.is_empty() && self.count == self.cells.len() {
            self.cells.clone()
        } else {
            HashSet::new()
        }
    }

    /// Every cell, if the count says none of them are mines.
    pub fn known_safes(&self) -> HashSet<Position> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            HashSet::new()
        }
    }

    /// Drops a cell known to be a mine, keeping the statement true.
    pub fn mark_mine(&mut self, cell: Position) {
        if self.cells.remove(&cell) {
            assert!(self.count > 0, "{cell} marked as a mine in a zero-count sentence");
            self.count -= 1;
        }
    }

    /// Drops a cell known to be safe.
    pub fn mark_safe(&mut self, cell: Position) {
        self.cells.remove(&cell);
    }

    /// If `other` covers a strict subset of this sentence's cells, the cells
    /// left over hold exactly the difference in counts.
    pub fn subtract(&self, other: &Sentence) -> Option<Sentence> {
        if self.cells == other.cells || !other.cells.is_subset(&self.cells) {
            return None;
        }
        Some(Sentence::new(
            self.cells.difference(&other.cells).copied(),
            self.count - other.count,
        ))
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}} = {}",
            self.cells.iter().sorted().join(", "),
            self.count
        )
    }
}
