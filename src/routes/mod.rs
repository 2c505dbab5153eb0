// src/routes/mod.rs
pub mod admin;
pub mod chat;
pub mod pages;

use std::path::Path;

use crate::{error::AppError, state::SharedState};
use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use admin::{get_metrics_handler, get_session_handler, list_sessions_handler};
use chat::chat_handler;
use pages::page;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(state: SharedState, static_dir: impl AsRef<Path>) -> Router {
    let admin_routes = Router::new()
        .route("/metrics", get(get_metrics_handler))
        .route("/sessions", get(list_sessions_handler))
        .route("/sessions/{id}", get(get_session_handler))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/", page("home"))
        .route("/about", page("about"))
        .route("/contact", page("contact"))
        .route("/chatbot", page("chatbot"))
        .route("/materials", page("materials"))
        .route("/payments", page("payments"))
        .route("/chat", post(chat_handler))
        .route("/api/chat", post(chat_handler))
        .nest("/admin", admin_routes)
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn auth_middleware(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let expected = state.admin_key.as_deref().ok_or(AppError::Unauthorized)?;
    match req.headers().get("x-admin-key") {
        Some(val) if val.as_bytes() == expected.as_bytes() => Ok(next.run(req).await),
        _ => Err(AppError::Unauthorized),
    }
}
