use crate::solver::MineOracle;
use crate::{Dimensions, GameConfig, GameError, Position};
use itertools::Itertools;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Hidden(bool),
    Revealed(u8),
    Flagged(bool),
}

impl Cell {
    pub fn is_mine(&self) -> bool {
        matches!(self, Cell::Hidden(true) | Cell::Flagged(true))
    }
}

#[derive(Debug)]
pub struct Board {
    pub cells: HashMap<Position, Cell>,
    dimensions: Dimensions,
    mines_count: usize,
}

impl Board {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::new_with_rng(config, &mut rand::thread_rng())
    }

    pub fn new_with_rng<R: Rng + ?Sized>(
        config: GameConfig,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let dimensions = config.dimensions();
        check_not_empty(dimensions)?;
        if config.mines >= dimensions.area() {
            return Err(GameError::TooManyMines {
                width: config.width,
                height: config.height,
                mines: config.mines,
            });
        }

        let mut board = Board {
            cells: HashMap::new(),
            dimensions,
            mines_count: config.mines,
        };
        board.initialize_cells();
        board.place_mines(rng);
        Ok(board)
    }

    /// Builds a board with a fixed mine layout.
    pub fn with_mines(
        dimensions: Dimensions,
        mines: impl IntoIterator<Item = Position>,
    ) -> Result<Self, GameError> {
        check_not_empty(dimensions)?;
        let mut board = Board {
            cells: HashMap::new(),
            dimensions,
            mines_count: 0,
        };
        board.initialize_cells();

        for pos in mines {
            let Some(cell) = board.cells.get_mut(&pos) else {
                return Err(GameError::OutOfBounds(pos));
            };
            if *cell == Cell::Hidden(false) {
                *cell = Cell::Hidden(true);
                board.mines_count += 1;
            }
        }

        if board.mines_count >= dimensions.area() {
            return Err(GameError::TooManyMines {
                width: dimensions.width,
                height: dimensions.height,
                mines: board.mines_count,
            });
        }
        Ok(board)
    }

    fn initialize_cells(&mut self) {
        for pos in self.dimensions.positions() {
            self.cells.insert(pos, Cell::Hidden(false));
        }
    }

    fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut mines_placed = 0;

        while mines_placed < self.mines_count {
            let row = rng.gen_range(0..self.dimensions.height);
            let col = rng.gen_range(0..self.dimensions.width);
            let pos = Position::new(row, col);

            if let Some(Cell::Hidden(false)) = self.cells.get(&pos) {
                self.cells.insert(pos, Cell::Hidden(true));
                mines_placed += 1;
            }
        }
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        self.dimensions.contains(pos)
    }

    pub fn get_cell(&self, pos: Position) -> Result<&Cell, GameError> {
        self.cells.get(&pos).ok_or(GameError::OutOfBounds(pos))
    }

    pub fn is_mine(&self, pos: Position) -> Result<bool, GameError> {
        self.get_cell(pos).map(Cell::is_mine)
    }

    pub fn count_adjacent_mines(&self, pos: Position) -> u8 {
        self.dimensions
            .neighbors(pos)
            .into_iter()
            .filter(|p| self.cells.get(p).is_some_and(Cell::is_mine))
            .count() as u8
    }

    pub fn mine_positions(&self) -> HashSet<Position> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(&pos, _)| pos)
            .collect()
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = Position> {
        self.dimensions.positions()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn mines_count(&self) -> usize {
        self.mines_count
    }
}

fn check_not_empty(dimensions: Dimensions) -> Result<(), GameError> {
    if dimensions.area() == 0 {
        return Err(GameError::EmptyBoard {
            width: dimensions.width,
            height: dimensions.height,
        });
    }
    Ok(())
}

impl MineOracle for Board {
    fn nearby_mines(&self, pos: Position) -> u8 {
        self.count_adjacent_mines(pos)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(2 * self.dimensions.width + 1);
        for row in 0..self.dimensions.height {
            writeln!(f, "{separator}")?;
            let line = (0..self.dimensions.width)
                .map(|col| match self.cells.get(&Position::new(row, col)) {
                    Some(Cell::Hidden(true)) | Some(Cell::Flagged(true)) => "*".to_string(),
                    Some(Cell::Revealed(n)) => n.to_string(),
                    _ => " ".to_string(),
                })
                .join("|");
            writeln!(f, "|{line}|")?;
        }
        write!(f, "{separator}")
    }
}
