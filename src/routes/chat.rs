// src/routes/chat.rs
use axum::{Json, extract::State};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::{
        responder::{Assessment, Reply},
        session_manager::MessageRole,
    },
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let trimmed = payload.message.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let user_id = match &payload.user_id {
        Some(id) if !id.trim().is_empty() => state.sessions.ensure_session(id.trim()).await,
        _ => state.sessions.create_session().await,
    };

    tracing::info!(user_id = %user_id, "chat message received");
    state.sessions.append_message(&user_id, MessageRole::User, trimmed).await;

    let reply = state.responder.respond(trimmed);
    record_metrics(&state, &reply).await;

    state.sessions.append_message(&user_id, MessageRole::Bot, &reply.text).await;

    Ok(Json(ChatResponse::from_reply(user_id, reply)))
}

async fn record_metrics(state: &SharedState, reply: &Reply) {
    match &reply.assessment {
        Assessment::Crisis { .. } => state.metrics.record_crisis().await,
        Assessment::Support { sentiment, mental_state, .. } => {
            state
                .metrics
                .record_support(mental_state.category.as_str(), sentiment.label.as_str())
                .await
        }
    }
}
