//! Terminal front end for the chat widget.
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use mazingira_mind::config::ClientConfig;
use mazingira_mind::widget::{
    ChatWidget, HttpTransport, KeyEvent, TerminalView,
    session_id::{FileStorage, SessionIdManager},
};

const EXIT_WORDS: &[&str] = &["exit", "quit", "bye"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let config = ClientConfig::from_env()?;
    let storage = FileStorage::new(&config.storage_path);
    let identity = SessionIdManager::init(&storage)?;
    tracing::info!(user_id = identity.id(), storage = %storage.path().display(), "chat client ready");

    let transport = HttpTransport::new(&config.server_url);
    let view = Arc::new(TerminalView::new());
    let widget = ChatWidget::new(config.widget, transport, Arc::clone(&view))
        .with_user_id(identity.id());

    println!("Type a message and press Enter. 'exit' to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if EXIT_WORDS.contains(&line.trim().to_lowercase().as_str()) {
            println!("Goodbye 👋");
            break;
        }
        view.set_pending(&line);
        widget.on_key(KeyEvent::enter()).await;
    }

    Ok(())
}
