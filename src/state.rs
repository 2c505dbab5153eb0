// src/state.rs
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::metrics_manager::MetricsManager;
use crate::services::responder::Responder;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub metrics: MetricsManager,
    pub responder: Responder,
    pub templates_dir: PathBuf,
    pub admin_key: Option<String>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            sessions: SessionManager::new(config.session_ttl),
            metrics: MetricsManager::new(),
            responder: Responder::new(),
            templates_dir: config.templates_dir.clone(),
            admin_key: config.admin_key.clone(),
        }
    }
}
