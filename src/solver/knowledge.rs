use super::sentence::Sentence;
use crate::Position;
use std::collections::HashSet;
use std::fmt;

/// The live set of sentences the engine reasons over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    sentences: Vec<Sentence>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    /// Appends the sentence unless an equal one is already present.
    pub fn insert(&mut self, sentence: Sentence) -> bool {
        if self.sentences.contains(&sentence) {
            return false;
        }
        self.sentences.push(sentence);
        true
    }

    pub fn get(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    pub fn contains(&self, sentence: &Sentence) -> bool {
        self.sentences.contains(sentence)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sentence> {
        self.sentences.iter()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn mark_mine(&mut self, cell: Position) {
        for sentence in &mut self.sentences {
            sentence.mark_mine(cell);
        }
    }

    pub fn mark_safe(&mut self, cell: Position) {
        for sentence in &mut self.sentences {
            sentence.mark_safe(cell);
        }
    }

    /// Union of the cells every sentence proves to be mines.
    pub fn known_mines(&self) -> HashSet<Position> {
        self.sentences.iter().flat_map(Sentence::known_mines).collect()
    }

    /// Union of the cells every sentence proves to be safe.
    pub fn known_safes(&self) -> HashSet<Position> {
        self.sentences.iter().flat_map(Sentence::known_safes).collect()
    }

    pub fn remove_empty(&mut self) {
        self.sentences.retain(|sentence| !sentence.is_empty());
    }

    /// Sentences derivable by comparing `sentence` against every live
    /// sentence with a different cell set, in both subset directions.
    pub fn infer_from(&self, sentence: &Sentence) -> Vec<Sentence> {
        if sentence.is_empty() {
            return Vec::new();
        }
        self.sentences
            .iter()
            .filter(|other| other.cells() != sentence.cells())
            .flat_map(|other| [sentence.subtract(other), other.subtract(sentence)])
            .flatten()
            .collect()
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Number of sentences in knowledge base: {}",
            self.sentences.len()
        )?;
        for sentence in &self.sentences {
            write!(f, "\n{sentence}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(cells: &[(usize, usize)], count: usize) -> Sentence {
        Sentence::new(cells.iter().copied().map(Position::from), count)
    }

    #[test]
    fn test_insert_skips_duplicates() {
        let mut kb = KnowledgeBase::new();
        assert!(kb.insert(sentence(&[(0, 0), (0, 1)], 1)));
        assert!(!kb.insert(sentence(&[(0, 1), (0, 0)], 1)));
        assert!(kb.insert(sentence(&[(0, 0), (0, 1)], 2)));
        assert_eq!(kb.len(), 2);
    }

    #[test]
    fn test_known_cells_are_collected_across_sentences() {
        let mut kb = KnowledgeBase::new();
        kb.push(sentence(&[(0, 0)], 1));
        kb.push(sentence(&[(1, 1), (1, 2)], 0));
        kb.push(sentence(&[(2, 0), (2, 1)], 1));

        assert_eq!(kb.known_mines(), HashSet::from([Position::new(0, 0)]));
        assert_eq!(
            kb.known_safes(),
            HashSet::from([Position::new(1, 1), Position::new(1, 2)])
        );
    }

    #[test]
    fn test_marking_prunes_every_sentence() {
        let mut kb = KnowledgeBase::new();
        kb.push(sentence(&[(0, 0), (0, 1)], 1));
        kb.push(sentence(&[(0, 0), (1, 0), (1, 1)], 2));
        kb.mark_mine(Position::new(0, 0));
        kb.mark_safe(Position::new(1, 1));

        assert!(kb.contains(&sentence(&[(0, 1)], 0)));
        assert!(kb.contains(&sentence(&[(1, 0)], 1)));
    }

    #[test]
    fn test_remove_empty() {
        let mut kb = KnowledgeBase::new();
        kb.push(sentence(&[], 0));
        kb.push(sentence(&[(0, 0)], 0));
        kb.mark_safe(Position::new(0, 0));
        kb.push(sentence(&[(2, 2)], 1));
        kb.remove_empty();
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn test_infer_from_both_directions() {
        let mut kb = KnowledgeBase::new();
        let a = sentence(&[(0, 1), (1, 1), (1, 0)], 1);
        let c = sentence(&[(1, 1)], 0);
        kb.push(a);
        kb.push(c);

        let b = sentence(&[(1, 1), (1, 0)], 1);
        kb.push(b.clone());
        let derived = kb.infer_from(&b);

        // b inside a, and c inside b
        assert_eq!(derived.len(), 2);
        assert!(derived.contains(&sentence(&[(0, 1)], 0)));
        assert!(derived.contains(&sentence(&[(1, 0)], 1)));
    }

    #[test]
    fn test_infer_from_ignores_same_cells_and_empty() {
        let mut kb = KnowledgeBase::new();
        kb.push(sentence(&[(0, 0), (0, 1)], 1));
        assert!(kb.infer_from(&sentence(&[(0, 0), (0, 1)], 1)).is_empty());
        assert!(kb.infer_from(&sentence(&[], 0)).is_empty());
    }

    #[test]
    fn test_display() {
        let mut kb = KnowledgeBase::new();
        kb.push(sentence(&[(0, 1), (0, 0)], 1));
        assert_eq!(
            kb.to_string(),
            "Number of sentences in knowledge base: 1\n{(0, 0), (0, 1)} = 1"
        );
    }
}
