use crate::{Board, Cell, Dimensions, GameError, Position};
use rand::Rng;
use std::collections::{BTreeSet, HashSet};

/// Board size and mine count for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            mines: 8,
        }
    }
}

impl GameConfig {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.height, self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Reveal,
    Flag,
}

pub struct Game {
    board: Board,
    state: GameState,
    revealed_count: usize,
    flagged: HashSet<Position>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self::from_board(Board::new(config)?))
    }

    pub fn new_with_rng<R: Rng + ?Sized>(
        config: GameConfig,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        Ok(Self::from_board(Board::new_with_rng(config, rng)?))
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            state: GameState::Playing,
            revealed_count: 0,
            flagged: HashSet::new(),
        }
    }

    /// Applies an action and returns every cell it revealed together with
    /// that cell's neighbouring mine count, in flood-fill order (row-major
    /// within each wave). Flagging reveals nothing.
    pub fn perform_action(
        &mut self,
        pos: Position,
        action: Action,
    ) -> Result<Vec<(Position, u8)>, GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::InvalidGameState);
        }

        match action {
            Action::Reveal => self.reveal(pos),
            Action::Flag => self.toggle_flag(pos).map(|_| Vec::new()),
        }
    }

    fn reveal(&mut self, pos: Position) -> Result<Vec<(Position, u8)>, GameError> {
        if !self.board.is_within_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }

        let mut revealed = Vec::new();
        match self.board.get_cell(pos)? {
            Cell::Revealed(_) => return Err(GameError::AlreadyRevealed(pos)),
            Cell::Flagged(_) => return Ok(revealed),
            Cell::Hidden(true) => {
                self.board.cells.insert(pos, Cell::Revealed(0));
                self.state = GameState::Lost;
                return Ok(revealed);
            }
            Cell::Hidden(false) => {
                let mut to_reveal = BTreeSet::new();
                to_reveal.insert(pos);

                while !to_reveal.is_empty() {
                    let mut next_batch = BTreeSet::new();

                    for &current_pos in &to_reveal {
                        if let Cell::Hidden(false) = self.board.get_cell(current_pos)? {
                            let adjacent_mines = self.board.count_adjacent_mines(current_pos);
                            self.revealed_count += 1;
                            self.board
                                .cells
                                .insert(current_pos, Cell::Revealed(adjacent_mines));
                            revealed.push((current_pos, adjacent_mines));

                            if adjacent_mines == 0 {
                                for neighbor_pos in self.board.dimensions().neighbors(current_pos) {
                                    if let Ok(Cell::Hidden(false)) =
                                        self.board.get_cell(neighbor_pos)
                                    {
                                        next_batch.insert(neighbor_pos);
                                    }
                                }
                            }
                        }
                    }

                    to_reveal = next_batch;
                }
            }
        }

        self.check_win_condition();
        Ok(revealed)
    }

    fn toggle_flag(&mut self, pos: Position) -> Result<(), GameError> {
        if !self.board.is_within_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }

        match *self.board.get_cell(pos)? {
            Cell::Hidden(has_mine) => {
                self.board.cells.insert(pos, Cell::Flagged(has_mine));
                self.flagged.insert(pos);
            }
            Cell::Flagged(has_mine) => {
                self.board.cells.insert(pos, Cell::Hidden(has_mine));
                self.flagged.remove(&pos);
            }
            Cell::Revealed(_) => return Err(GameError::AlreadyRevealed(pos)),
        }

        self.check_win_condition();
        Ok(())
    }

    fn check_win_condition(&mut self) {
        let total_non_mine_cells = self.board.dimensions().area() - self.board.mines_count();
        let all_mines_flagged =
            self.board.mines_count() > 0 && self.flagged == self.board.mine_positions();

        if self.revealed_count == total_non_mine_cells || all_mines_flagged {
            self.state = GameState::Won;
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn dimensions(&self) -> Dimensions {
        self.board.dimensions()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn flagged(&self) -> &HashSet<Position> {
        &self.flagged
    }
}
