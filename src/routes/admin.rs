// src/routes/admin.rs
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::{
    error::AppError,
    services::{metrics_manager::MetricsData, session_manager::TranscriptEntry},
    state::SharedState,
};

#[derive(Debug, Serialize)]
pub struct SessionList {
    pub count: usize,
    pub ids: Vec<String>,
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}

pub async fn list_sessions_handler(State(state): State<SharedState>) -> Json<SessionList> {
    let ids = state.sessions.list_session_ids().await;
    Json(SessionList { count: ids.len(), ids })
}

pub async fn get_session_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TranscriptEntry>>, AppError> {
    let history = state
        .sessions
        .get_history(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("session {id}")))?;
    Ok(Json(history.iter().map(TranscriptEntry::from).collect()))
}
