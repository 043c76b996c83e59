mod card;
mod difficulty;
mod ids;
mod memory;
mod quiz;

pub use card::Card;
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use ids::CardId;
pub use memory::{MemoryError, MemorySession, SelectOutcome, TurnOutcome};
pub use quiz::{AnswerOutcome, QuizAdvance, QuizError, QuizQuestion, QuizSession, QuizSummary};
