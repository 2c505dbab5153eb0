// src/routes/pages.rs
use axum::{
    extract::State,
    response::Html,
    routing::{MethodRouter, get},
};

use crate::{error::AppError, state::SharedState};

/// GET route rendering `<templates_dir>/<name>.html`.
pub fn page(name: &'static str) -> MethodRouter<SharedState> {
    get(move |State(state): State<SharedState>| async move { render_page(&state, name).await })
}

pub async fn render_page(state: &SharedState, name: &str) -> Result<Html<String>, AppError> {
    let path = state.templates_dir.join(format!("{name}.html"));
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(page = name, path = %path.display(), "template missing");
            Err(AppError::NotFound(name.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
