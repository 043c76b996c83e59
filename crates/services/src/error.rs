//! Shared error types for the services crate.

use thiserror::Error;

use quizdeck_core::{MemoryError, QuizError};

/// Fallback text when the backend gives no usable error message.
pub(crate) const GENERIC_FAILURE: &str = "Request failed";

/// Errors emitted by `ApiClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The backend answered non-2xx; the payload is its `error` string
    /// (or the generic fallback when the body carried none).
    #[error("{0}")]
    Backend(String),

    /// Transport-level failure before a response could be read.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Short user-facing text: the backend's own message when it gave one,
    /// otherwise a generic failure line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Backend(msg) => msg.clone(),
            ApiError::Http(_) => GENERIC_FAILURE.to_owned(),
        }
    }
}

/// Errors emitted by the game controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
