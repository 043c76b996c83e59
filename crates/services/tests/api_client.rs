//! `ApiClient` against a mock backend.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quizdeck_core::Difficulty;
use services::{ApiClient, ApiConfig, LoginRequest, MemoryScorePayload, QuizScorePayload};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig::new(server.uri()))
}

fn memory_payload() -> MemoryScorePayload {
    MemoryScorePayload {
        difficulty: Difficulty::Easy,
        score: 490,
        moves: 10,
        seconds: 30,
    }
}

#[tokio::test]
async fn submit_memory_score_accepts_empty_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.submit_memory_score(&memory_payload()).await.unwrap();
}

#[tokio::test]
async fn backend_error_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/quiz/scores"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"error": "Invalid token"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .submit_quiz_score(&QuizScorePayload {
            score: 1200,
            total: 10,
            seconds: 45,
        })
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Invalid token");
}

#[tokio::test]
async fn unparsable_error_body_falls_back_to_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scores/me"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.my_memory_scores().await.unwrap_err();
    assert_eq!(err.user_message(), "Request failed");
}

#[tokio::test]
async fn token_is_sent_as_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scores"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_token("secret-token");
    client.submit_memory_score(&memory_payload()).await.unwrap();
}

#[tokio::test]
async fn login_stores_token_for_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "fresh-token",
            "user": {"name": "Ada", "school_id": "s42"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/quiz/scores/me"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"rows": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(!client.has_token());

    let auth = client
        .login(&LoginRequest {
            email_or_school_id: "s42".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();
    assert_eq!(auth.user.name, "Ada");
    assert!(client.has_token());

    let rows = client.my_quiz_scores().await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn leaderboard_passes_difficulty_and_scope_and_parses_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .and(query_param("difficulty", "hard"))
        .and(query_param("scope", "alltime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "rows": [
                {"player": "Ada", "score": 1150, "moves": 14, "seconds": 22,
                 "created_at": "2026-08-01 10:00:00"},
                {"player": "Linus", "score": 900, "moves": 20, "seconds": 40,
                 "created_at": "2026-08-02 11:30:00"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let rows = client.leaderboard(Difficulty::Hard, "alltime").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].player, "Ada");
    assert_eq!(rows[0].score, 1150);
    assert_eq!(rows[1].created_at, "2026-08-02 11:30:00");
}

#[tokio::test]
async fn my_rank_handles_player_without_score() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/leaderboard/me"))
        .and(query_param("difficulty", "easy"))
        .and(query_param("scope", "weekly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hasScore": false
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let rank = client.my_rank(Difficulty::Easy, "weekly").await.unwrap();
    assert!(!rank.has_score);
    assert!(rank.rank.is_none());
    assert!(rank.total_players.is_none());
}
