// src/services/responder.rs
//! Rule-based reply generation for the chat endpoint.
//!
//! A message is checked for crisis language first. Everything else goes
//! through keyword sentiment, keyword mental-state classification and a
//! per-category response pool.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Crisis score is kept in tenths so the thresholds compare exactly.
const HIGH_RISK_WEIGHT: u32 = 10;
const MEDIUM_RISK_WEIGHT: u32 = 7;
const CONTEXTUAL_WEIGHT: u32 = 3;
const CRISIS_THRESHOLD: u32 = 7;
const HIGH_LEVEL_THRESHOLD: u32 = 10;

const HIGH_RISK: &[&str] = &[
    "kill myself",
    "end my life",
    "suicide",
    "better off dead",
    "no point living",
    "want to die",
    "end it all",
];

const MEDIUM_RISK: &[&str] = &[
    "hurt myself",
    "self harm",
    "cut myself",
    "overdose",
    "can't go on",
    "give up",
    "hopeless",
];

const CONTEXTUAL: &[&str] = &["pills", "rope", "bridge", "jump", "knife"];

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "happy", "better", "hope", "grateful", "blessed", "joy",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad",
    "depressed",
    "anxious",
    "worried",
    "stressed",
    "angry",
    "frustrated",
    "hopeless",
];

/// Confidence reported for keyword-template replies.
pub const TEMPLATE_CONFIDENCE: f32 = 0.3;

const GREETING_WORDS: &[&str] = &["hello", "hi", "hey"];

pub const GREETING_REPLY: &str =
    "Hello! 👋 I'm here to support you. How are you feeling today?";

const HIGH_CRISIS_REPLY: &str = "I'm very concerned about what you've shared. Please reach out for immediate help right now:

🚨 EMERGENCY CONTACTS:
• Kenya Red Cross Crisis Line: 1199
• Emergency Services: 999
• Befrienders Kenya: +254 722 178 177

You don't have to go through this alone. Professional help is available 24/7. Please contact one of these services immediately or go to the nearest hospital emergency room.

Your life has value, and there are people who want to help you through this difficult time.";

const MODERATE_CRISIS_REPLY: &str = "I'm worried about you based on what you've shared. It sounds like you're going through a really difficult time, and I want you to know that help is available.

Please consider reaching out to:
• Kenya Red Cross Counseling: 1199
• Befrienders Kenya: +254 722 178 177
• Or speak with a trusted family member or friend

You don't have to handle this alone. These feelings can be temporary, even when they feel overwhelming. Would you like me to help you find professional support in your area?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisLevel {
    High,
    Moderate,
}

impl CrisisLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrisisLevel::High => "high",
            CrisisLevel::Moderate => "moderate",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrisisAssessment {
    /// Sum of matched weights, in tenths.
    pub score: u32,
    pub keywords: Vec<String>,
}

impl CrisisAssessment {
    pub fn level(&self) -> Option<CrisisLevel> {
        if self.score >= HIGH_LEVEL_THRESHOLD {
            Some(CrisisLevel::High)
        } else if self.score >= CRISIS_THRESHOLD {
            Some(CrisisLevel::Moderate)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f32,
    pub confidence: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Anxiety,
    Depression,
    Stress,
    Trauma,
    Relationships,
    Financial,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Anxiety => "anxiety",
            Category::Depression => "depression",
            Category::Stress => "stress",
            Category::Trauma => "trauma",
            Category::Relationships => "relationships",
            Category::Financial => "financial",
            Category::General => "general",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Anxiety => &["anxious", "worried", "panic", "nervous", "fear", "scared"],
            Category::Depression => &["sad", "depressed", "hopeless", "empty", "worthless"],
            Category::Stress => &["stressed", "overwhelmed", "pressure", "burden", "exhausted"],
            Category::Trauma => &["trauma", "flashback", "nightmare", "abuse", "assault"],
            Category::Relationships => &["family", "marriage", "spouse", "relationship", "partner"],
            Category::Financial => &["money", "job", "work", "financial", "bills", "debt"],
            Category::General => &[],
        }
    }

    fn responses(&self) -> [&'static str; 2] {
        match self {
            Category::Anxiety => [
                "I can hear the worry in your words, and I want you to know that anxiety is something many people experience. In our communities, we often say 'pole pole' - take it slowly. Let's work through this step by step. What specific situation is making you feel most anxious right now?",
                "Anxiety can feel like a storm in your mind, but remember that even the strongest storms eventually pass. You mentioned feeling anxious - can you tell me more about what's triggering these feelings? Sometimes talking through our worries can help reduce their power over us.",
            ],
            Category::Depression => [
                "I hear the heaviness in what you've shared, and I want you to know that you're not alone in feeling this way. Depression can make everything feel more difficult, but reaching out like you have today shows real strength. What has been weighing on you most lately?",
                "Thank you for trusting me with your feelings. When we're feeling low, it can seem like the darkness will never lift, but healing is possible. In many African traditions, we understand that 'baada ya dhiki faraja' - after hardship comes ease. What would help you feel a little lighter today?",
            ],
            Category::Stress => [
                "It sounds like you're carrying a heavy load right now. Stress is very common in our busy lives, especially when we're trying to balance family, work, and personal responsibilities. The Swahili saying 'haraka haraka haina baraka' reminds us that rushing brings no blessing. What's putting the most pressure on you?",
                "I can sense that you're feeling overwhelmed. Stress affects all of us, and it's important to acknowledge when the burden feels too heavy. Let's think about ways to lighten this load. What part of your stress feels most manageable to address first?",
            ],
            Category::Trauma => [
                "Thank you for having the courage to share something so difficult. Trauma can have lasting effects on how we see ourselves and the world around us. Healing from trauma takes time, and everyone's journey is different. You don't have to go through this alone - there are people trained to help with trauma recovery. How are you feeling right now after sharing this?",
                "I'm honored that you felt safe enough to share your trauma with me. What you've experienced was not your fault, and your feelings about it are completely valid. Trauma recovery is possible, though it often requires professional support. Would you like me to help you find trauma-informed therapists in your area?",
            ],
            Category::Relationships => [
                "Relationships, especially family ones, can be both our greatest source of joy and our biggest challenges. In African culture, we deeply value our connections with others, which can sometimes create complex dynamics. What relationship situation is concerning you most?",
                "I understand that relationship issues can be particularly difficult because they involve people we care about deeply. The concept of Ubuntu teaches us that we are interconnected, but it's also important to maintain healthy boundaries. Can you share more about what's happening?",
            ],
            Category::Financial => [
                "Financial stress can affect every aspect of our lives - our sleep, relationships, and overall wellbeing. Many people are facing economic challenges, especially in these uncertain times. While I can't solve money problems directly, I can help you manage the emotional impact. How are these financial concerns affecting your daily life?",
                "Money worries can feel overwhelming and can consume our thoughts. You're not alone in facing financial challenges - many people in our community struggle with this. Let's talk about ways to manage the stress while you work on practical solutions. What aspect of your financial situation worries you most?",
            ],
            Category::General => [
                "Thank you for reaching out and sharing what's on your mind. It takes courage to talk about our mental health, and you've taken an important step today. I'm here to listen and support you through whatever you're experiencing. What would you like to explore together?",
                "I'm glad you decided to talk today. Sometimes just expressing our thoughts and feelings can provide some relief. Your mental health matters, and you deserve support. What's been on your mind lately that you'd like to discuss?",
            ],
        }
    }
}

/// Checked in this order; the first category with a matching keyword wins.
const CATEGORY_ORDER: [Category; 6] = [
    Category::Anxiety,
    Category::Depression,
    Category::Stress,
    Category::Trauma,
    Category::Relationships,
    Category::Financial,
];

#[derive(Debug, Clone, Serialize)]
pub struct MentalState {
    pub category: Category,
    pub confidence: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmergencyContact {
    pub name: &'static str,
    pub number: &'static str,
    pub availability: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

pub fn crisis_contacts() -> Vec<EmergencyContact> {
    vec![
        EmergencyContact {
            name: "Kenya Red Cross Crisis Line",
            number: "1199",
            availability: "24/7",
            kind: "Crisis counseling",
        },
        EmergencyContact {
            name: "Emergency Services",
            number: "999",
            availability: "24/7",
            kind: "Emergency medical response",
        },
        EmergencyContact {
            name: "Befrienders Kenya",
            number: "+254 722 178 177",
            availability: "3PM - 9PM daily",
            kind: "Emotional support",
        },
        EmergencyContact {
            name: "Kenyatta National Hospital Emergency",
            number: "+254 20 2726300",
            availability: "24/7",
            kind: "Emergency psychiatric services",
        },
    ]
}

pub fn immediate_crisis_actions() -> Vec<String> {
    [
        "Call one of the crisis hotlines immediately",
        "Go to the nearest hospital emergency room",
        "Remove any means of self-harm from your immediate area",
        "Contact a trusted family member or friend right now",
        "Stay with someone until you can get professional help",
        "Remember: This crisis is temporary, help is available",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Clone)]
pub enum Assessment {
    Crisis {
        level: CrisisLevel,
        keywords: Vec<String>,
    },
    Support {
        sentiment: Sentiment,
        mental_state: MentalState,
        confidence: f32,
    },
}

/// Outcome of processing one user message.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub assessment: Assessment,
    pub suggestions: Vec<String>,
}

impl Reply {
    pub fn is_crisis(&self) -> bool {
        matches!(self.assessment, Assessment::Crisis { .. })
    }
}

#[derive(Debug, Default)]
pub struct Responder {
    rotation: AtomicUsize,
}

impl Responder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, user_msg: &str) -> Reply {
        let crisis = detect_crisis(user_msg);
        if let Some(level) = crisis.level() {
            tracing::warn!(level = level.as_str(), score = crisis.score, "crisis language detected");
            let text = match level {
                CrisisLevel::High => HIGH_CRISIS_REPLY,
                CrisisLevel::Moderate => MODERATE_CRISIS_REPLY,
            };
            return Reply {
                text: text.to_string(),
                assessment: Assessment::Crisis {
                    level,
                    keywords: crisis.keywords,
                },
                suggestions: vec![
                    "Get immediate help".to_string(),
                    "Contact emergency services".to_string(),
                    "Reach out to family".to_string(),
                ],
            };
        }

        let sentiment = analyze_sentiment(user_msg);
        let mental_state = classify_mental_state(user_msg);
        let text = if mental_state.category == Category::General && is_greeting(user_msg) {
            GREETING_REPLY.to_string()
        } else {
            self.pick_response(mental_state.category, sentiment.label)
                .to_string()
        };

        Reply {
            text,
            suggestions: suggestions_for(user_msg),
            assessment: Assessment::Support {
                confidence: TEMPLATE_CONFIDENCE,
                sentiment,
                mental_state,
            },
        }
    }

    fn pick_response(&self, category: Category, sentiment: SentimentLabel) -> &'static str {
        let pool = category.responses();
        if sentiment == SentimentLabel::Negative {
            return pool[0];
        }
        let turn = self.rotation.fetch_add(1, Ordering::Relaxed);
        pool[turn % pool.len()]
    }
}

pub fn detect_crisis(msg: &str) -> CrisisAssessment {
    let lower = msg.to_lowercase();
    let mut score = 0;
    let mut keywords = Vec::new();

    for (phrases, weight) in [(HIGH_RISK, HIGH_RISK_WEIGHT), (MEDIUM_RISK, MEDIUM_RISK_WEIGHT)] {
        for phrase in phrases.iter().filter(|p| lower.contains(**p)) {
            score += weight;
            keywords.push(phrase.to_string());
        }
    }

    // Contextual words only count alongside explicit risk language.
    if score > 0 {
        for word in CONTEXTUAL.iter().filter(|w| lower.contains(**w)) {
            score += CONTEXTUAL_WEIGHT;
            keywords.push(word.to_string());
        }
    }

    CrisisAssessment { score, keywords }
}

pub fn analyze_sentiment(msg: &str) -> Sentiment {
    let lower = msg.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(**w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(**w)).count();

    if positive > negative {
        Sentiment { label: SentimentLabel::Positive, score: 0.7, confidence: "medium" }
    } else if negative > positive {
        Sentiment { label: SentimentLabel::Negative, score: 0.7, confidence: "medium" }
    } else {
        Sentiment { label: SentimentLabel::Neutral, score: 0.5, confidence: "low" }
    }
}

pub fn classify_mental_state(msg: &str) -> MentalState {
    let lower = msg.to_lowercase();
    CATEGORY_ORDER
        .iter()
        .find(|c| c.keywords().iter().any(|k| lower.contains(k)))
        .map(|&category| MentalState { category, confidence: 0.7 })
        .unwrap_or(MentalState { category: Category::General, confidence: 0.5 })
}

fn is_greeting(msg: &str) -> bool {
    msg.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| GREETING_WORDS.contains(&word))
}

pub fn suggestions_for(msg: &str) -> Vec<String> {
    let lower = msg.to_lowercase();
    let picks: [&str; 4] = if lower.contains("stress") {
        [
            "Try a 5-minute breathing exercise",
            "Take our detailed stress assessment",
            "Learn stress management techniques",
            "Consider booking a therapy session",
        ]
    } else if ["sad", "depressed", "down"].iter().any(|w| lower.contains(w)) {
        [
            "Complete our depression screening",
            "Explore mood tracking techniques",
            "Connect with a mental health professional",
            "Join a support group",
        ]
    } else if lower.contains("anxious") || lower.contains("anxiety") {
        [
            "Practice grounding techniques",
            "Learn about anxiety management",
            "Take our anxiety assessment",
            "Consider professional counseling",
        ]
    } else if lower.contains("family") {
        [
            "Explore family therapy options",
            "Learn communication strategies",
            "Consider mediation services",
            "Join family support groups",
        ]
    } else {
        [
            "Take our comprehensive wellness assessment",
            "Explore our therapy directory",
            "Join community support groups",
            "Learn more about mental wellness",
        ]
    };
    picks.iter().map(|s| s.to_string()).collect()
}
