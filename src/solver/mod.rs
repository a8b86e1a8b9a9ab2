pub mod autoplay;
mod engine;
mod knowledge;
mod sentence;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
mod traits;

pub use autoplay::{play, play_with, GameReport, Turn};
pub use engine::InferenceEngine;
pub use knowledge::KnowledgeBase;
pub use sentence::Sentence;
pub use traits::{MineOracle, Move};
