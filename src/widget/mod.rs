// src/widget/mod.rs
//! Chat widget controller.
//!
//! The controller owns no UI or storage of its own: a [`ChatView`] supplies
//! the input field and message log, a [`ChatTransport`] performs the POST,
//! and the user id comes from [`session_id::SessionIdManager`].

pub mod session_id;
pub mod transport;
pub mod view;

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Datelike;
use serde_json::{Map, Value};

pub use transport::{ChatTransport, HttpTransport, TransportError};
pub use view::{ChatView, Key, KeyEvent, MemoryView, TerminalView};

pub const REPLY_FALLBACK: &str = "I'm here to listen — tell me more.";
pub const SITE_ERROR_TEXT: &str = "Sorry, I couldn't reach the server. Please try again.";
pub const STANDALONE_ERROR_TEXT: &str = "⚠️ Error: Could not connect to server.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub endpoint: String,
    pub message_field: String,
    /// When set, the stored user id is sent under this field.
    pub user_id_field: Option<String>,
    pub reply_field: String,
    /// Disable input while a reply is pending and refuse further submits.
    pub guard_double_submit: bool,
    pub reply_fallback: String,
    pub error_text: String,
    pub user_label: String,
    pub bot_label: String,
}

impl WidgetConfig {
    /// Widget embedded in the site pages, talking to `/api/chat`.
    pub fn site() -> Self {
        Self {
            endpoint: "/api/chat".to_string(),
            message_field: "message".to_string(),
            user_id_field: Some("user_id".to_string()),
            reply_field: "message".to_string(),
            guard_double_submit: true,
            reply_fallback: REPLY_FALLBACK.to_string(),
            error_text: SITE_ERROR_TEXT.to_string(),
            user_label: "You".to_string(),
            bot_label: "Bot".to_string(),
        }
    }

    /// Stand-alone chat page talking to the local dev server.
    pub fn standalone() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/chat".to_string(),
            user_id_field: None,
            reply_field: "response".to_string(),
            guard_double_submit: false,
            error_text: STANDALONE_ERROR_TEXT.to_string(),
            ..Self::site()
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::site()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Me,
    Bot,
}

impl Role {
    pub fn class_name(&self) -> &'static str {
        match self {
            Role::Me => "me",
            Role::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub role: Role,
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    AwaitingReply,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming; nothing sent.
    Ignored,
    /// A reply is still pending and the double-submit guard is on.
    Busy,
    Replied { text: String, fallback: bool },
    Failed { error: String },
}

/// Decrements the in-flight counter when a send cycle ends.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

pub struct ChatWidget<T, V> {
    config: WidgetConfig,
    transport: T,
    view: V,
    user_id: Option<String>,
    in_flight: AtomicUsize,
    // Serializes requests so replies land in send order.
    send_lane: tokio::sync::Mutex<()>,
}

impl<T: ChatTransport, V: ChatView> ChatWidget<T, V> {
    /// Builds the controller and stamps the current year into the view.
    pub fn new(config: WidgetConfig, transport: T, view: V) -> Self {
        let year = chrono::Local::now().year();
        if view.show_year(year) {
            tracing::trace!(year, "year stamped");
        }
        Self {
            config,
            transport,
            view,
            user_id: None,
            in_flight: AtomicUsize::new(0),
            send_lane: tokio::sync::Mutex::new(()),
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn state(&self) -> WidgetState {
        if self.in_flight.load(Ordering::Acquire) == 0 {
            WidgetState::Idle
        } else {
            WidgetState::AwaitingReply
        }
    }

    /// Plain Enter submits; any modifier leaves the input alone.
    pub async fn on_key(&self, event: KeyEvent) -> Option<SendOutcome> {
        if event.is_plain_enter() {
            Some(self.submit().await)
        } else {
            None
        }
    }

    pub async fn submit(&self) -> SendOutcome {
        let Some(_ticket) = self.begin() else {
            return SendOutcome::Busy;
        };

        let text = self.view.input_value().trim().to_string();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }
        self.view.clear_input();

        self.send(text).await
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        if self.config.guard_double_submit {
            self.in_flight
                .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
                .ok()?;
        } else {
            self.in_flight.fetch_add(1, Ordering::AcqRel);
        }
        Some(InFlight(&self.in_flight))
    }

    async fn send(&self, text: String) -> SendOutcome {
        self.append(Role::Me, &text);
        if self.config.guard_double_submit {
            self.view.set_input_enabled(false);
        }

        let payload = self.build_payload(&text);
        let result = {
            let _lane = self.send_lane.lock().await;
            self.transport.post_json(&self.config.endpoint, &payload).await
        };

        let outcome = match result {
            Ok(body) => match self.extract_reply(&body) {
                Some(reply) => {
                    self.append(Role::Bot, &reply);
                    SendOutcome::Replied { text: reply, fallback: false }
                }
                None => {
                    tracing::debug!(field = %self.config.reply_field, "reply field missing, using fallback");
                    let reply = self.config.reply_fallback.clone();
                    self.append(Role::Bot, &reply);
                    SendOutcome::Replied { text: reply, fallback: true }
                }
            },
            Err(e) => {
                tracing::warn!(endpoint = %self.config.endpoint, "chat request failed: {}", e);
                self.append(Role::Bot, &self.config.error_text);
                SendOutcome::Failed { error: e.to_string() }
            }
        };

        if self.config.guard_double_submit {
            self.view.set_input_enabled(true);
        }
        outcome
    }

    pub fn build_payload(&self, text: &str) -> Value {
        let mut body = Map::new();
        body.insert(self.config.message_field.clone(), Value::from(text));
        if let (Some(field), Some(id)) = (&self.config.user_id_field, &self.user_id) {
            body.insert(field.clone(), Value::from(id.as_str()));
        }
        Value::Object(body)
    }

    fn extract_reply(&self, body: &Value) -> Option<String> {
        match body.get(&self.config.reply_field)? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    fn append(&self, role: Role, text: &str) {
        let label = match role {
            Role::Me => &self.config.user_label,
            Role::Bot => &self.config.bot_label,
        };
        self.view.append_entry(&LogEntry {
            role,
            label: label.clone(),
            text: text.to_string(),
        });
        self.view.scroll_to_bottom();
    }
}
