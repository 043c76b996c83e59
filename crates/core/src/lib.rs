#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod score;

pub use model::{
    AnswerOutcome, Card, CardId, Difficulty, MemoryError, MemorySession, QuizAdvance, QuizError,
    QuizQuestion, QuizSession, QuizSummary, SelectOutcome, TurnOutcome,
};
