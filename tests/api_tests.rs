use mazingira_mind::config::ServerConfig;
use mazingira_mind::message::ChatResponse;
use mazingira_mind::routes::create_router;
use mazingira_mind::state::AppState;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::path::PathBuf;
use std::sync::Arc;
use tower::util::ServiceExt;

fn test_config() -> ServerConfig {
    let dir = std::env::temp_dir().join(format!("mm-templates-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("home.html"), "<h1>Mazingira Mind</h1>").unwrap();
    ServerConfig {
        admin_key: Some("test-key".to_string()),
        templates_dir: dir,
        static_dir: PathBuf::from("does-not-exist"),
        ..ServerConfig::default()
    }
}

fn app() -> (Router, Arc<AppState>) {
    let config = test_config();
    let state = Arc::new(AppState::new(&config));
    (create_router(state.clone(), &config.static_dir), state)
}

fn chat_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_chat(response: axum::response::Response) -> ChatResponse {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn test_chat_endpoint() {
    let (app, _) = app();

    let response = app
        .oneshot(chat_request("/chat", r#"{"message": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let chat = read_chat(response).await;
    assert_eq!(chat.message, chat.response);
    assert!(chat.user_id.starts_with("anon_"));
    assert!(!chat.is_crisis);
}

#[tokio::test]
async fn test_api_chat_keeps_user_id() {
    let (app, state) = app();

    let response = app
        .clone()
        .oneshot(chat_request(
            "/api/chat",
            r#"{"message": "I feel anxious today", "user_id": "user_k3x9za"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let chat = read_chat(response).await;
    assert_eq!(chat.user_id, "user_k3x9za");
    assert_eq!(chat.response_type, "template");
    assert_eq!(chat.confidence, Some(0.3));
    assert!(chat.message.contains("anxi"));

    let history = state.sessions.get_history("user_k3x9za").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "I feel anxious today");
}

#[tokio::test]
async fn test_empty_message_rejected() {
    let (app, state) = app();

    let response = app
        .oneshot(chat_request("/chat", r#"{"message": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.sessions.len().await, 0);
}

#[tokio::test]
async fn test_crisis_response_fields() {
    let (app, state) = app();

    let response = app
        .oneshot(chat_request("/chat", r#"{"message": "I want to end it all"}"#))
        .await
        .unwrap();
    let chat = read_chat(response).await;

    assert!(chat.is_crisis);
    assert_eq!(chat.crisis_level.as_deref(), Some("high"));
    assert_eq!(chat.emergency_contacts.len(), 4);
    assert_eq!(chat.immediate_actions.len(), 6);
    assert_eq!(chat.response_type, "crisis");
    assert_eq!(state.metrics.get_metrics().await.crisis_count, 1);
}

#[tokio::test]
async fn test_pages() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&body).contains("Mazingira Mind"));

    let response = app
        .oneshot(Request::builder().uri("/about").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_requires_key() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/admin/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/metrics")
                .header("x-admin-key", "test-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_session_transcript() {
    let (app, _) = app();

    app.clone()
        .oneshot(chat_request("/chat", r#"{"message": "hi", "session_id": "user_000aaa"}"#))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/sessions/user_000aaa")
                .header("x-admin-key", "test-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let transcript: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(transcript.as_array().unwrap().len(), 2);
    assert_eq!(transcript[0]["role"], "user");
    assert_eq!(transcript[1]["role"], "bot");
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
