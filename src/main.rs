use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing::info;

use mazingira_mind::{config::ServerConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("no .env loaded: {e}");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    if config.admin_key.is_none() {
        info!("MM_ADMIN_KEY not set, admin routes will reject every request");
    }

    let state = Arc::new(AppState::new(&config));
    let purger = state.sessions.spawn_purger(config.purge_interval);

    let app = routes::create_router(state, &config.static_dir).layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("🧠 Mazingira Mind running at http://{}", config.bind_addr);

    tokio::select! {
        res = axum::serve(listener, app) => res?,
        _ = tokio::signal::ctrl_c() => info!("received Ctrl+C, shutting down"),
    }

    purger.abort();
    Ok(())
}
