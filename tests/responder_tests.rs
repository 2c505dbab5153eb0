use mazingira_mind::services::responder::{
    Assessment, Category, CrisisLevel, GREETING_REPLY, Responder, SentimentLabel,
    TEMPLATE_CONFIDENCE, analyze_sentiment, classify_mental_state, detect_crisis, suggestions_for,
};

#[test]
fn test_crisis_levels() {
    let high = detect_crisis("I want to die");
    assert_eq!(high.level(), Some(CrisisLevel::High));
    assert_eq!(high.keywords, vec!["want to die".to_string()]);

    let moderate = detect_crisis("I feel hopeless");
    assert_eq!(moderate.score, 7);
    assert_eq!(moderate.level(), Some(CrisisLevel::Moderate));

    // Contextual words add on top of explicit risk language.
    let with_context = detect_crisis("I might overdose on pills");
    assert_eq!(with_context.score, 10);
    assert_eq!(with_context.level(), Some(CrisisLevel::High));
    assert!(with_context.keywords.contains(&"pills".to_string()));

    assert_eq!(detect_crisis("I need to jump in the shower").level(), None);
}

#[test]
fn test_crisis_reply_carries_resources() {
    let responder = Responder::new();
    let reply = responder.respond("Sometimes I think about suicide");
    assert!(reply.is_crisis());
    assert!(reply.text.contains("EMERGENCY CONTACTS"));
    assert_eq!(reply.suggestions.len(), 3);
    match reply.assessment {
        Assessment::Crisis { level, keywords } => {
            assert_eq!(level, CrisisLevel::High);
            assert_eq!(keywords, vec!["suicide".to_string()]);
        }
        other => panic!("expected crisis, got {other:?}"),
    }
}

#[test]
fn test_sentiment() {
    assert_eq!(analyze_sentiment("I feel great and happy").label, SentimentLabel::Positive);
    assert_eq!(analyze_sentiment("I am worried and sad").label, SentimentLabel::Negative);
    let neutral = analyze_sentiment("The bus was late");
    assert_eq!(neutral.label, SentimentLabel::Neutral);
    assert_eq!(neutral.confidence, "low");
}

#[test]
fn test_classification_order() {
    assert_eq!(classify_mental_state("I feel anxious today").category, Category::Anxiety);
    assert_eq!(classify_mental_state("My partner left").category, Category::Relationships);
    assert_eq!(classify_mental_state("I lost my job").category, Category::Financial);
    // anxiety is checked before stress
    assert_eq!(
        classify_mental_state("worried and overwhelmed").category,
        Category::Anxiety
    );
    let general = classify_mental_state("The weather is nice");
    assert_eq!(general.category, Category::General);
    assert_eq!(general.confidence, 0.5);
}

#[test]
fn test_greeting() {
    let responder = Responder::new();
    assert_eq!(responder.respond("Hi there").text, GREETING_REPLY);
    // "this" contains "hi" but is not a greeting
    assert_ne!(responder.respond("this is odd").text, GREETING_REPLY);
}

#[test]
fn test_suggestions() {
    assert_eq!(suggestions_for("so much stress")[0], "Try a 5-minute breathing exercise");
    assert_eq!(suggestions_for("feeling down")[0], "Complete our depression screening");
    assert_eq!(suggestions_for("anxiety attacks")[0], "Practice grounding techniques");
    assert_eq!(suggestions_for("my family")[0], "Explore family therapy options");
    assert_eq!(suggestions_for("hmm")[0], "Take our comprehensive wellness assessment");
}

#[test]
fn test_template_confidence_is_fixed() {
    let responder = Responder::new();
    for msg in [
        "ok",
        "I feel tired",
        "I feel like nothing is working out for me at school or at home these days",
    ] {
        match responder.respond(msg).assessment {
            Assessment::Support { confidence, .. } => assert_eq!(confidence, TEMPLATE_CONFIDENCE),
            other => panic!("expected support reply, got {other:?}"),
        }
    }
    assert!(responder.respond("I want to die").is_crisis());
}

#[test]
fn test_non_negative_rotates_pool() {
    let responder = Responder::new();
    let first = responder.respond("The weather is nice").text;
    let second = responder.respond("The weather is nice").text;
    assert_ne!(first, second);
    let third = responder.respond("The weather is nice").text;
    assert_eq!(first, third);
}
