mod controller;
mod deck;
mod quiz;

// Public API of the game subsystem.
pub use controller::{Command, GameController, GameEvent, GameMode};
pub use deck::DeckBuilder;
pub use quiz::QuizBuilder;
