// src/config.rs
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::widget::WidgetConfig;

pub mod env {
    pub const BIND_ADDR: &str = "MM_BIND_ADDR";
    pub const SESSION_TTL_SECS: &str = "MM_SESSION_TTL_SECS";
    pub const PURGE_INTERVAL_SECS: &str = "MM_PURGE_INTERVAL_SECS";
    pub const ADMIN_KEY: &str = "MM_ADMIN_KEY";
    pub const TEMPLATES_DIR: &str = "MM_TEMPLATES_DIR";
    pub const STATIC_DIR: &str = "MM_STATIC_DIR";

    pub const SERVER_URL: &str = "MM_SERVER_URL";
    pub const WIDGET_VARIANT: &str = "MM_WIDGET_VARIANT";
    pub const CHAT_ENDPOINT: &str = "MM_CHAT_ENDPOINT";
    pub const STORAGE_PATH: &str = "MM_STORAGE_PATH";
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid { var, value: value.to_string(), reason: reason.to_string() }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub session_ttl: Duration,
    pub purge_interval: Duration,
    pub admin_key: Option<String>,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            session_ttl: Duration::from_secs(30 * 60),
            purge_interval: Duration::from_secs(60),
            admin_key: None,
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("public"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(env::BIND_ADDR) {
            config.bind_addr = raw
                .parse()
                .map_err(|e| ConfigError::invalid(env::BIND_ADDR, &raw, e))?;
        }
        if let Some(raw) = lookup(env::SESSION_TTL_SECS) {
            config.session_ttl = parse_secs(env::SESSION_TTL_SECS, &raw)?;
        }
        if let Some(raw) = lookup(env::PURGE_INTERVAL_SECS) {
            config.purge_interval = parse_secs(env::PURGE_INTERVAL_SECS, &raw)?;
        }
        config.admin_key = lookup(env::ADMIN_KEY).filter(|k| !k.trim().is_empty());
        if let Some(dir) = lookup(env::TEMPLATES_DIR) {
            config.templates_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(env::STATIC_DIR) {
            config.static_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

fn parse_secs(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid(var, raw, "must be greater than zero")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::invalid(var, raw, e)),
    }
}

/// Settings for the terminal chat client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub widget: WidgetConfig,
    pub storage_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut widget = match lookup(env::WIDGET_VARIANT).as_deref().map(str::trim) {
            None | Some("") | Some("site") => WidgetConfig::site(),
            Some("standalone") => WidgetConfig::standalone(),
            Some(other) => {
                return Err(ConfigError::invalid(
                    env::WIDGET_VARIANT,
                    other,
                    "expected `site` or `standalone`",
                ));
            }
        };
        if let Some(endpoint) = lookup(env::CHAT_ENDPOINT) {
            widget.endpoint = endpoint;
        }

        let server_url = lookup(env::SERVER_URL)
            .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());
        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            return Err(ConfigError::invalid(env::SERVER_URL, &server_url, "must be an http(s) URL"));
        }

        let storage_path = lookup(env::STORAGE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".mazingira").join("storage.json"));

        Ok(Self { server_url, widget, storage_path })
    }
}
