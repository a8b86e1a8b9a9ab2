use crate::Position;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GameError {
    #[error("Position {0} is out of bounds")]
    OutOfBounds(Position),
    #[error("Cannot reveal or flag cell in current game state")]
    InvalidGameState,
    #[error("Cell at {0} is already revealed")]
    AlreadyRevealed(Position),
    #[error("Board must have at least one row and one column, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[error("Too many mines ({mines}) for board size {width}x{height}")]
    TooManyMines {
        width: usize,
        height: usize,
        mines: usize,
    },
}
