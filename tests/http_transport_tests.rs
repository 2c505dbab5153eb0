use mazingira_mind::config::ServerConfig;
use mazingira_mind::routes::create_router;
use mazingira_mind::services::responder::GREETING_REPLY;
use mazingira_mind::state::AppState;
use mazingira_mind::widget::{
    ChatView, ChatWidget, HttpTransport, KeyEvent, LogEntry, MemoryView, SITE_ERROR_TEXT,
    STANDALONE_ERROR_TEXT, SendOutcome, WidgetConfig, WidgetState,
};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

async fn serve() -> (SocketAddr, Arc<AppState>) {
    let config = ServerConfig {
        templates_dir: PathBuf::from("does-not-exist"),
        static_dir: PathBuf::from("does-not-exist"),
        ..ServerConfig::default()
    };
    let state = Arc::new(AppState::new(&config));
    let app = create_router(state.clone(), &config.static_dir);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

/// An address nothing is listening on.
async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn rendered(entries: &[LogEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| format!("{}: {}", e.label, e.text))
        .collect()
}

#[tokio::test]
async fn test_site_widget_against_live_server() {
    let (addr, state) = serve().await;
    let view = Arc::new(MemoryView::new());
    let widget = ChatWidget::new(
        WidgetConfig::site(),
        HttpTransport::new(format!("http://{addr}")),
        view.clone(),
    )
    .with_user_id("user_abc123");

    view.type_text("I feel anxious today");
    let outcome = widget.on_key(KeyEvent::enter()).await;

    let Some(SendOutcome::Replied { text, fallback }) = outcome else {
        panic!("expected a reply, got {outcome:?}");
    };
    assert!(!fallback);
    assert!(text.contains("anxious"));

    let entries = rendered(&view.entries());
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], "You: I feel anxious today");
    assert_eq!(entries[1], format!("Bot: {text}"));
    assert!(view.is_enabled());
    assert_eq!(widget.state(), WidgetState::Idle);

    let history = state.sessions.get_history("user_abc123").await.unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn test_standalone_widget_against_live_server() {
    let (addr, _) = serve().await;
    let view = Arc::new(MemoryView::new());
    let config = WidgetConfig {
        endpoint: format!("http://{addr}/chat"),
        ..WidgetConfig::standalone()
    };
    // Absolute endpoint, so the base url is never used.
    let widget = ChatWidget::new(config, HttpTransport::new("http://unused.invalid"), view.clone());

    view.type_text("hello");
    let outcome = widget.submit().await;

    assert_eq!(
        outcome,
        SendOutcome::Replied { text: GREETING_REPLY.to_string(), fallback: false }
    );
    assert_eq!(
        rendered(&view.entries()),
        vec!["You: hello".to_string(), format!("Bot: {GREETING_REPLY}")]
    );
}

#[tokio::test]
async fn test_closed_port_shows_error_and_reenables_input() {
    let addr = closed_addr().await;
    let view = Arc::new(MemoryView::new());
    let widget = ChatWidget::new(
        WidgetConfig::site(),
        HttpTransport::new(format!("http://{addr}")),
        view.clone(),
    );

    view.type_text("hello");
    let outcome = widget.submit().await;

    assert!(matches!(outcome, SendOutcome::Failed { .. }));
    assert_eq!(
        rendered(&view.entries()),
        vec!["You: hello".to_string(), format!("Bot: {SITE_ERROR_TEXT}")]
    );
    assert!(view.is_enabled());
    assert_eq!(view.input_value(), "");
    assert_eq!(widget.state(), WidgetState::Idle);
}

#[tokio::test]
async fn test_standalone_closed_port_error_text() {
    let addr = closed_addr().await;
    let view = Arc::new(MemoryView::new());
    let config = WidgetConfig {
        endpoint: format!("http://{addr}/chat"),
        ..WidgetConfig::standalone()
    };
    let widget = ChatWidget::new(config, HttpTransport::new("http://unused.invalid"), view.clone());

    view.type_text("hello");
    assert!(matches!(widget.submit().await, SendOutcome::Failed { .. }));
    assert_eq!(view.entries()[1].text, STANDALONE_ERROR_TEXT);
    assert!(view.is_enabled());
}
