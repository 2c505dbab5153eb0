// src/services/metrics_manager.rs
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub total_messages: u64,
    pub crisis_count: u64,
    pub category_usage: HashMap<String, u64>,
    pub sentiment_usage: HashMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_crisis(&self) {
        let mut data = self.inner.write().await;
        data.total_messages += 1;
        data.crisis_count += 1;
    }

    pub async fn record_support(&self, category: &str, sentiment: &str) {
        let mut data = self.inner.write().await;
        data.total_messages += 1;
        *data.category_usage.entry(category.to_string()).or_insert(0) += 1;
        *data.sentiment_usage.entry(sentiment.to_string()).or_insert(0) += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
