#![forbid(unsafe_code)]

pub mod api;
pub mod error;
pub mod game_loop;
pub mod games;

pub use error::{ApiError, GameError};

pub use api::{
    ApiClient, ApiConfig, AuthResponse, LeaderboardRow, LoginRequest, MemoryScorePayload,
    MemoryScoreRow, MyRank, QuizScorePayload, QuizScoreRow, RegisterRequest, ResultSubmitter,
};
pub use game_loop::GameLoop;
pub use games::{Command, DeckBuilder, GameController, GameEvent, GameMode, QuizBuilder};
