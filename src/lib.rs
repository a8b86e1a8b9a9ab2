pub mod board;
pub mod error;
pub mod game;
pub mod position;
pub mod solver;

pub use board::{Board, Cell};
pub use error::GameError;
pub use game::{Action, Game, GameConfig, GameState};
pub use position::{Dimensions, Position};
