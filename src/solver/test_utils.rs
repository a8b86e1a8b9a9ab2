use super::{InferenceEngine, MineOracle};
use crate::{Board, GameConfig, Position};
use rand::prelude::*;
use std::collections::HashSet;

/// Configuration for test board generation
#[derive(Debug, Clone)]
pub struct TestBoardConfig {
    pub height: usize,
    pub width: usize,
    pub mine_density: f64,
    pub revealed_percentage: f64,
}

impl Default for TestBoardConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            mine_density: 0.15,
            revealed_percentage: 0.3,
        }
    }
}

impl TestBoardConfig {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            height: self.height,
            width: self.width,
            mines: (self.width as f64 * self.height as f64 * self.mine_density) as usize,
        }
    }
}

/// Generates boards with known solutions, and engines that have been told
/// about a random subset of their safe cells.
pub struct TestBoardGenerator {
    config: TestBoardConfig,
    rng: StdRng,
}

impl TestBoardGenerator {
    pub fn new(config: TestBoardConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(config: TestBoardConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self) -> (Board, HashSet<Position>) {
        let board = Board::new_with_rng(self.config.game_config(), &mut self.rng).unwrap();
        let mine_positions = board.mine_positions();
        (board, mine_positions)
    }

    /// Generates a board and feeds the engine a random selection of its safe
    /// cells, in random order.
    pub fn generate_engine(&mut self) -> (InferenceEngine, HashSet<Position>) {
        let (board, mine_positions) = self.generate();
        let mut engine = InferenceEngine::new(board.dimensions());

        let mut safe_cells: Vec<Position> = board
            .iter_positions()
            .filter(|pos| !mine_positions.contains(pos))
            .collect();
        safe_cells.shuffle(&mut self.rng);

        let cells_to_reveal = (board.dimensions().area() as f64
            * self.config.revealed_percentage) as usize;
        for pos in safe_cells.into_iter().take(cells_to_reveal) {
            engine.add_knowledge(pos, board.nearby_mines(pos));
        }

        (engine, mine_positions)
    }

    pub fn generate_batch(&mut self, count: usize) -> Vec<(InferenceEngine, HashSet<Position>)> {
        (0..count).map(|_| self.generate_engine()).collect()
    }
}

/// Checks the engine's conclusions against the real mine layout: proven
/// mines are mines, proven safes are safe, and every sentence counts the
/// mines among its cells exactly.
pub fn validate_engine(engine: &InferenceEngine, mine_positions: &HashSet<Position>) -> bool {
    for pos in engine.mines() {
        if !mine_positions.contains(pos) {
            println!("Engine incorrectly identified safe position {} as mine", pos);
            return false;
        }
    }

    for pos in engine.safes() {
        if mine_positions.contains(pos) {
            println!("Engine incorrectly identified mine {} as safe", pos);
            return false;
        }
    }

    for sentence in engine.knowledge().iter() {
        let actual = sentence.cells().intersection(mine_positions).count();
        if actual != sentence.count() {
            println!(
                "Sentence {} does not hold, board has {} mines there",
                sentence, actual
            );
            return false;
        }
    }

    true
}

/// Checks the structural invariants that hold after every update.
pub fn validate_knowledge_invariants(engine: &InferenceEngine) -> bool {
    if !engine.mines().is_disjoint(engine.safes()) {
        println!("Mines and safes overlap");
        return false;
    }

    for sentence in engine.knowledge().iter() {
        if sentence.is_empty() {
            println!("Empty sentence left in knowledge base");
            return false;
        }
        if sentence.count() > sentence.len() {
            println!("Sentence {} claims more mines than cells", sentence);
            return false;
        }
        if let Some(pos) = sentence
            .cells()
            .iter()
            .find(|pos| engine.mines().contains(pos) || engine.safes().contains(pos))
        {
            println!("Sentence {} still contains resolved cell {}", sentence, pos);
            return false;
        }
    }

    true
}
