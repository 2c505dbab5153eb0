// src/message.rs
use serde::{Deserialize, Serialize};

use crate::services::responder::{
    Assessment, CrisisLevel, MentalState, Reply, Sentiment, crisis_contacts,
    immediate_crisis_actions,
};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "session_id")]
    pub user_id: Option<String>,
}

/// Reply text is sent as both `message` and `response` so either widget
/// configuration can read it.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub response: String,
    pub user_id: String,
    pub is_crisis: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crisis_level: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mental_state: Option<serde_json::Value>,
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emergency_contacts: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub immediate_actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub response_type: String,
}

impl ChatResponse {
    pub fn from_reply(user_id: String, reply: Reply) -> Self {
        let mut resp = Self {
            message: reply.text.clone(),
            response: reply.text,
            user_id,
            is_crisis: false,
            crisis_level: None,
            detected_keywords: Vec::new(),
            sentiment: None,
            mental_state: None,
            suggestions: reply.suggestions,
            emergency_contacts: Vec::new(),
            immediate_actions: Vec::new(),
            confidence: None,
            response_type: "template".to_string(),
        };

        match reply.assessment {
            Assessment::Crisis { level, keywords } => {
                resp.is_crisis = true;
                resp.crisis_level = Some(level_name(level));
                resp.detected_keywords = keywords;
                resp.emergency_contacts = crisis_contacts().iter().filter_map(to_value).collect();
                resp.immediate_actions = immediate_crisis_actions();
                resp.response_type = "crisis".to_string();
            }
            Assessment::Support { sentiment, mental_state, confidence } => {
                resp.sentiment = to_value::<Sentiment>(&sentiment);
                resp.mental_state = to_value::<MentalState>(&mental_state);
                resp.confidence = Some(confidence);
            }
        }
        resp
    }
}

fn level_name(level: CrisisLevel) -> String {
    level.as_str().to_string()
}

fn to_value<T: Serialize>(v: &T) -> Option<serde_json::Value> {
    serde_json::to_value(v).ok()
}
