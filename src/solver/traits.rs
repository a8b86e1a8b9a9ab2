use crate::Position;

/// Ground truth about the board, queried once per revealed safe cell.
pub trait MineOracle {
    /// Number of mines among the cells adjacent to `pos`.
    fn nearby_mines(&self, pos: Position) -> u8;
}

/// A move chosen by the engine, tagged with how it was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Provably safe and not yet played
    Safe(Position),
    /// Drawn uniformly from cells not known to be mines
    Random(Position),
}

impl Move {
    pub fn position(&self) -> Position {
        match *self {
            Move::Safe(pos) | Move::Random(pos) => pos,
        }
    }

    pub fn is_safe(&self) -> bool {
        matches!(self, Move::Safe(_))
    }
}
