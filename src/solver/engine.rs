use super::knowledge::KnowledgeBase;
use super::sentence::Sentence;
use super::traits::Move;
use crate::{Dimensions, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Knowledge-base Minesweeper player.
///
/// Keeps a list of [`Sentence`]s built from revealed cells and the mine
/// counts reported for them, and derives which unplayed cells are certainly
/// safe or certainly mines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceEngine {
    dimensions: Dimensions,
    moves_made: HashSet<Position>,
    mines: HashSet<Position>,
    safes: HashSet<Position>,
    knowledge: KnowledgeBase,
}

impl InferenceEngine {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            moves_made: HashSet::new(),
            mines: HashSet::new(),
            safes: HashSet::new(),
            knowledge: KnowledgeBase::new(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn moves_made(&self) -> &HashSet<Position> {
        &self.moves_made
    }

    pub fn mines(&self) -> &HashSet<Position> {
        &self.mines
    }

    pub fn safes(&self) -> &HashSet<Position> {
        &self.safes
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn mark_mine(&mut self, cell: Position) {
        self.mines.insert(cell);
        self.knowledge.mark_mine(cell);
    }

    pub fn mark_safe(&mut self, cell: Position) {
        self.safes.insert(cell);
        self.knowledge.mark_safe(cell);
    }

    /// Records that `cell` was revealed as safe with `count` mines around it.
    ///
    /// Must be called at most once per cell, and never for a cell known to
    /// be a mine; neither is checked. `count` must be truthful, a count that
    /// contradicts earlier knowledge panics.
    pub fn add_knowledge(&mut self, cell: Position, count: u8) {
        assert!(
            self.dimensions.contains(cell),
            "{cell} is outside a {}x{} grid",
            self.dimensions.height,
            self.dimensions.width
        );

        self.moves_made.insert(cell);
        self.mark_safe(cell);

        let mut remaining = usize::from(count);
        let mut unknown = HashSet::new();
        for neighbor in self.dimensions.neighbors(cell) {
            if self.mines.contains(&neighbor) {
                assert!(remaining > 0, "{cell} reports fewer mines than are known");
                remaining -= 1;
            } else if !self.safes.contains(&neighbor) {
                unknown.insert(neighbor);
            }
        }

        let new_index = self.knowledge.len();
        self.knowledge.push(Sentence::new(unknown, remaining));

        // Collect first; marking rewrites the sentences being scanned
        let mines_to_mark = self.knowledge.known_mines();
        let safes_to_mark = self.knowledge.known_safes();
        for mine in mines_to_mark {
            self.mark_mine(mine);
        }
        for safe in safes_to_mark {
            self.mark_safe(safe);
        }

        let new_sentence = self.knowledge.get(new_index).cloned();
        self.knowledge.remove_empty();

        if let Some(new_sentence) = new_sentence {
            for derived in self.knowledge.infer_from(&new_sentence) {
                self.knowledge.insert(derived);
            }
        }
    }

    /// A cell known to be safe that has not been played yet.
    ///
    /// Picks the lowest such cell in row-major order.
    pub fn make_safe_move(&self) -> Option<Position> {
        self.safes.difference(&self.moves_made).copied().min()
    }

    pub fn make_random_move(&self) -> Option<Position> {
        self.make_random_move_with(&mut rand::thread_rng())
    }

    /// Uniform draw over every cell not yet played and not known to be a mine.
    pub fn make_random_move_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        let candidates: Vec<Position> = self
            .dimensions
            .positions()
            .filter(|pos| !self.mines.contains(pos) && !self.moves_made.contains(pos))
            .collect();
        candidates.choose(rng).copied()
    }

    /// Safe move if one is known, otherwise a random one.
    pub fn next_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Move> {
        self.make_safe_move()
            .map(Move::Safe)
            .or_else(|| self.make_random_move_with(rng).map(Move::Random))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn sentence(cells: &[(usize, usize)], count: usize) -> Sentence {
        Sentence::new(cells.iter().copied().map(Position::from), count)
    }

    #[test]
    fn test_zero_count_marks_neighbor_safe() {
        let mut engine = InferenceEngine::new(Dimensions::new(1, 2));
        engine.add_knowledge(pos(0, 0), 0);

        assert!(engine.safes().contains(&pos(0, 1)));
        assert!(engine.mines().is_empty());
        assert!(engine.knowledge().is_empty());
        assert_eq!(engine.make_safe_move(), Some(pos(0, 1)));
    }

    #[test]
    fn test_full_count_marks_neighbor_mine() {
        let mut engine = InferenceEngine::new(Dimensions::new(1, 2));
        engine.add_knowledge(pos(0, 0), 1);

        assert_eq!(engine.mines(), &HashSet::from([pos(0, 1)]));
        assert_eq!(engine.make_safe_move(), None);
        assert_eq!(engine.make_random_move(), None);
    }

    #[test]
    fn test_played_cell_is_safe_and_recorded() {
        let mut engine = InferenceEngine::new(Dimensions::new(3, 3));
        engine.add_knowledge(pos(1, 1), 3);

        assert!(engine.moves_made().contains(&pos(1, 1)));
        assert!(engine.safes().contains(&pos(1, 1)));
        assert_eq!(engine.knowledge().len(), 1);
        assert_eq!(engine.knowledge().get(0).map(Sentence::len), Some(8));
        assert_eq!(engine.make_safe_move(), None);
    }

    #[test]
    fn test_known_neighbors_are_filtered_out() {
        let mut engine = InferenceEngine::new(Dimensions::new(2, 3));
        engine.mark_mine(pos(0, 0));
        engine.mark_safe(pos(1, 0));
        engine.add_knowledge(pos(0, 1), 2);

        // {(0,0),(1,0),(0,2),(1,1),(1,2)} = 2 minus one known mine, one known safe
        assert!(engine
            .knowledge()
            .contains(&sentence(&[(0, 2), (1, 1), (1, 2)], 1)));
    }

    #[test]
    fn test_subset_inference_derives_safe_cell() {
        // Single mine at (1,0)
        let mut engine = InferenceEngine::new(Dimensions::new(3, 3));
        engine.add_knowledge(pos(0, 0), 1);
        engine.add_knowledge(pos(2, 1), 1);
        engine.add_knowledge(pos(2, 0), 1);

        // {(1,0),(1,1)} = 1 sits inside {(0,1),(1,0),(1,1)} = 1
        assert!(engine.knowledge().contains(&sentence(&[(0, 1)], 0)));
        assert!(engine
            .knowledge()
            .contains(&sentence(&[(1, 2), (2, 2)], 0)));
        // Derived sentences are only acted on by the next update
        assert!(!engine.safes().contains(&pos(0, 1)));

        engine.add_knowledge(pos(1, 2), 0);
        assert!(engine.safes().contains(&pos(0, 1)));
        assert!(engine.safes().contains(&pos(2, 2)));
        assert_eq!(engine.make_safe_move(), Some(pos(0, 1)));
    }

    #[test]
    fn test_mine_found_through_propagation_updates_other_sentences() {
        // Mine at (0,2) on a 1x3 strip
        let mut engine = InferenceEngine::new(Dimensions::new(1, 3));
        engine.add_knowledge(pos(0, 0), 0);
        assert!(engine.safes().contains(&pos(0, 1)));

        engine.add_knowledge(pos(0, 1), 1);
        assert_eq!(engine.mines(), &HashSet::from([pos(0, 2)]));
        assert!(engine.knowledge().is_empty());
        assert_eq!(engine.make_safe_move(), None);
        assert_eq!(engine.make_random_move(), None);
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut engine = InferenceEngine::new(Dimensions::new(3, 3));
        engine.add_knowledge(pos(1, 1), 2);

        engine.mark_mine(pos(0, 0));
        let once = engine.clone();
        engine.mark_mine(pos(0, 0));
        assert_eq!(engine, once);

        engine.mark_safe(pos(2, 2));
        let once = engine.clone();
        engine.mark_safe(pos(2, 2));
        assert_eq!(engine, once);

        assert!(engine
            .knowledge()
            .contains(&sentence(&[(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)], 1)));
    }

    #[test]
    fn test_safe_move_skips_played_cells() {
        let mut engine = InferenceEngine::new(Dimensions::new(2, 2));
        engine.add_knowledge(pos(0, 0), 0);
        assert_eq!(engine.make_safe_move(), Some(pos(0, 1)));

        engine.add_knowledge(pos(0, 1), 0);
        engine.add_knowledge(pos(1, 0), 0);
        assert_eq!(engine.make_safe_move(), Some(pos(1, 1)));

        engine.add_knowledge(pos(1, 1), 0);
        assert_eq!(engine.make_safe_move(), None);
        assert_eq!(engine.make_random_move(), None);
    }

    #[test]
    fn test_random_move_avoids_mines_and_played_cells() {
        let mut engine = InferenceEngine::new(Dimensions::new(2, 2));
        engine.mark_mine(pos(0, 0));
        engine.add_knowledge(pos(1, 1), 1);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let choice = engine.make_random_move_with(&mut rng).unwrap();
            assert!(choice == pos(0, 1) || choice == pos(1, 0));
        }
    }

    #[test]
    fn test_random_move_covers_candidates() {
        let engine = InferenceEngine::new(Dimensions::new(2, 2));
        let mut rng = StdRng::seed_from_u64(1);
        let seen: HashSet<_> = (0..200)
            .filter_map(|_| engine.make_random_move_with(&mut rng))
            .collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_next_move_prefers_safe_cells() {
        let mut engine = InferenceEngine::new(Dimensions::new(3, 3));
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(engine.next_move(&mut rng), Some(Move::Random(_))));

        engine.add_knowledge(pos(0, 0), 0);
        assert_eq!(engine.next_move(&mut rng), Some(Move::Safe(pos(0, 1))));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_cell_panics() {
        let mut engine = InferenceEngine::new(Dimensions::new(2, 2));
        engine.add_knowledge(pos(2, 2), 0);
    }
}
