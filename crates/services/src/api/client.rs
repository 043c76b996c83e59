use std::env;
use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use quizdeck_core::Difficulty;

use crate::api::ResultSubmitter;
use crate::api::types::{
    AuthResponse, ErrorBody, LeaderboardRow, LoginRequest, MemoryScorePayload, MemoryScoreRow,
    MyRank, QuizScorePayload, QuizScoreRow, RegisterRequest, RowsResponse,
};
use crate::error::{ApiError, GENERIC_FAILURE};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Reads `QUIZDECK_API_BASE` and `QUIZDECK_API_TOKEN`. A missing or empty
    /// token means anonymous access: the Authorization header is omitted.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("QUIZDECK_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let token = env::var("QUIZDECK_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        Self { base_url, token }
    }
}

/// Thin JSON client for the score/leaderboard backend.
///
/// Every request is a single attempt; retry policy is the caller's business.
pub struct ApiClient {
    client: Client,
    base_url: String,
    // Login replaces the token mid-flight while shared behind an Arc.
    token: RwLock<Option<String>>,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            token: RwLock::new(config.token),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }

    //
    // ─── AUTH ──────────────────────────────────────────────────────────────
    //

    /// Create an account. On success the returned token is kept for
    /// subsequent authenticated calls.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or backend rejection.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self
            .execute(self.client.post(self.url("/api/auth/register")).json(request))
            .await?;
        self.set_token(&auth.token);
        Ok(auth)
    }

    /// Log in with an email address or school id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or backend rejection.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self
            .execute(self.client.post(self.url("/api/auth/login")).json(request))
            .await?;
        self.set_token(&auth.token);
        Ok(auth)
    }

    //
    // ─── SCORES ────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or backend rejection.
    pub async fn submit_memory_score(&self, payload: &MemoryScorePayload) -> Result<(), ApiError> {
        self.execute_expect_empty(self.client.post(self.url("/api/scores")).json(payload))
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or backend rejection.
    pub async fn my_memory_scores(&self) -> Result<Vec<MemoryScoreRow>, ApiError> {
        let rows: RowsResponse<MemoryScoreRow> = self
            .execute(self.client.get(self.url("/api/scores/me")))
            .await?;
        Ok(rows.rows)
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or backend rejection.
    pub async fn submit_quiz_score(&self, payload: &QuizScorePayload) -> Result<(), ApiError> {
        self.execute_expect_empty(self.client.post(self.url("/api/quiz/scores")).json(payload))
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or backend rejection.
    pub async fn my_quiz_scores(&self) -> Result<Vec<QuizScoreRow>, ApiError> {
        let rows: RowsResponse<QuizScoreRow> = self
            .execute(self.client.get(self.url("/api/quiz/scores/me")))
            .await?;
        Ok(rows.rows)
    }

    //
    // ─── LEADERBOARD ───────────────────────────────────────────────────────
    //

    /// Top scores in descending rank order. `scope` is passed through to the
    /// backend unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or backend rejection.
    pub async fn leaderboard(
        &self,
        difficulty: Difficulty,
        scope: &str,
    ) -> Result<Vec<LeaderboardRow>, ApiError> {
        let rows: RowsResponse<LeaderboardRow> = self
            .execute(
                self.client
                    .get(self.url("/api/leaderboard"))
                    .query(&[("difficulty", difficulty.as_str()), ("scope", scope)]),
            )
            .await?;
        Ok(rows.rows)
    }

    /// The caller's own best score and rank for a difficulty/scope.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or backend rejection.
    pub async fn my_rank(&self, difficulty: Difficulty, scope: &str) -> Result<MyRank, ApiError> {
        self.execute(
            self.client
                .get(self.url("/api/leaderboard/me"))
                .query(&[("difficulty", difficulty.as_str()), ("scope", scope)]),
        )
        .await
    }

    //
    // ─── PLUMBING ──────────────────────────────────────────────────────────
    //

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().ok().and_then(|t| t.clone()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorize(request).send().await?;
        debug!(status = %response.status(), url = %response.url(), "api response");
        Ok(response)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::backend_error(response).await)
        }
    }

    /// For endpoints whose success body is `{}` (or empty): only the status
    /// matters, an unparsable success body is not an error.
    async fn execute_expect_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = self.send(request).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::backend_error(response).await)
        }
    }

    async fn backend_error(response: Response) -> ApiError {
        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_owned());
        ApiError::Backend(message)
    }
}

#[async_trait]
impl ResultSubmitter for ApiClient {
    async fn submit_memory(&self, payload: &MemoryScorePayload) -> Result<(), ApiError> {
        self.submit_memory_score(payload).await
    }

    async fn submit_quiz(&self, payload: &QuizScorePayload) -> Result<(), ApiError> {
        self.submit_quiz_score(payload).await
    }
}
