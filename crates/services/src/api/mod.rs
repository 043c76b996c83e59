pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::ApiError;

pub use client::{ApiClient, ApiConfig};
pub use types::{
    AuthResponse, BestScore, LeaderboardRow, LoginRequest, MemoryScorePayload, MemoryScoreRow,
    MyRank, QuizScorePayload, QuizScoreRow, RegisterRequest, UserInfo,
};

/// Delivery seam for finished-game results.
///
/// One attempt per completed session, no retry; failures surface as
/// `ApiError` and must never stall a session reset.
#[async_trait]
pub trait ResultSubmitter: Send + Sync {
    async fn submit_memory(&self, payload: &MemoryScorePayload) -> Result<(), ApiError>;
    async fn submit_quiz(&self, payload: &QuizScorePayload) -> Result<(), ApiError>;
}
