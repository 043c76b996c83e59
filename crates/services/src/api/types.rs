//! Wire types for the score/leaderboard backend.
//!
//! Field names follow the backend's JSON contract exactly; the handful of
//! camelCase fields are renamed per-field rather than per-struct because the
//! contract mixes styles.

use serde::{Deserialize, Serialize};

use quizdeck_core::Difficulty;

//
// ─── AUTH ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub school_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "emailOrSchoolId")]
    pub email_or_school_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub name: String,
    #[serde(default)]
    pub school_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

//
// ─── SCORES ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryScorePayload {
    pub difficulty: Difficulty,
    pub score: u32,
    pub moves: u32,
    pub seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizScorePayload {
    pub score: u32,
    pub total: u32,
    pub seconds: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemoryScoreRow {
    pub difficulty: String,
    pub score: u32,
    pub moves: u32,
    pub seconds: u32,
    /// Opaque server timestamp, displayed as-is.
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizScoreRow {
    pub score: u32,
    pub total: u32,
    pub seconds: u32,
    pub created_at: String,
}

//
// ─── LEADERBOARD ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardRow {
    pub player: String,
    pub score: u32,
    pub moves: u32,
    pub seconds: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BestScore {
    pub score: u32,
    pub moves: u32,
    pub seconds: u32,
}

/// The caller's own standing for one difficulty/scope combination.
#[derive(Debug, Clone, Deserialize)]
pub struct MyRank {
    #[serde(rename = "hasScore")]
    pub has_score: bool,
    #[serde(default)]
    pub best: Option<BestScore>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default, rename = "totalPlayers")]
    pub total_players: Option<u32>,
}

//
// ─── ENVELOPES ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RowsResponse<T> {
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_payload_serializes_difficulty_lowercase() {
        let payload = MemoryScorePayload {
            difficulty: Difficulty::Medium,
            score: 490,
            moves: 10,
            seconds: 30,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "difficulty": "medium",
                "score": 490,
                "moves": 10,
                "seconds": 30
            })
        );
    }

    #[test]
    fn login_request_uses_contract_field_name() {
        let req = LoginRequest {
            email_or_school_id: "s123".into(),
            password: "pw".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("emailOrSchoolId").is_some());
    }

    #[test]
    fn rank_defaults_optional_fields() {
        let rank: MyRank = serde_json::from_str(r#"{"hasScore": false}"#).unwrap();
        assert!(!rank.has_score);
        assert!(rank.best.is_none());
        assert!(rank.rank.is_none());
        assert!(rank.total_players.is_none());
    }

    #[test]
    fn rows_default_to_empty() {
        let rows: RowsResponse<QuizScoreRow> = serde_json::from_str("{}").unwrap();
        assert!(rows.rows.is_empty());
    }
}
