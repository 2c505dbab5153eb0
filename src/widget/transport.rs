// src/widget/transport.rs
use std::future::Future;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not reach chat server: {0}")]
    Network(#[from] reqwest::Error),

    #[error("chat server replied with invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Issues one JSON POST and returns the decoded JSON body.
pub trait ChatTransport {
    fn post_json(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// Relative endpoints are resolved against `base_url`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
        }
    }
}

impl ChatTransport for HttpTransport {
    async fn post_json(&self, endpoint: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.resolve(endpoint);
        // Non-2xx statuses are not errors here; only the body decides.
        let bytes = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await?
            .bytes()
            .await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_and_absolute_endpoints() {
        let transport = HttpTransport::new("http://localhost:5000/");
        assert_eq!(transport.resolve("/api/chat"), "http://localhost:5000/api/chat");
        assert_eq!(transport.resolve("chat"), "http://localhost:5000/chat");
        assert_eq!(
            transport.resolve("http://127.0.0.1:5000/chat"),
            "http://127.0.0.1:5000/chat"
        );
    }
}
