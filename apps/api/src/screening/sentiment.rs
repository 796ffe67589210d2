//! Sentiment annotation — pluggable, trait-based classifier for interview
//! answers. `AppState` holds an `Arc<dyn SentimentClassifier>` so tests swap
//! in a stub without touching the turn engine.
//!
//! Classification is informational only: a failed call downgrades to
//! `Unknown` and never halts the session.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::LlmClient;
use crate::screening::prompts::{SENTIMENT_PROMPT_TEMPLATE, SENTIMENT_SYSTEM};

/// Coarse sentiment label surfaced back to the candidate as an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Unknown,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Unknown => "unknown",
        }
    }
}

/// The classifier trait. Infallible by contract: implementations absorb
/// their own failures into `Unknown`.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, answer: &str) -> Sentiment;
}

/// Default classifier backed by the shared LLM client.
pub struct LlmSentimentClassifier {
    llm: LlmClient,
}

impl LlmSentimentClassifier {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SentimentClassifier for LlmSentimentClassifier {
    async fn classify(&self, answer: &str) -> Sentiment {
        let prompt = SENTIMENT_PROMPT_TEMPLATE.replace("{answer}", answer);
        match self.llm.complete(SENTIMENT_SYSTEM, &prompt).await {
            Ok(text) => parse_label(&text),
            Err(e) => {
                warn!("Sentiment classification failed, downgrading to unknown: {e}");
                Sentiment::Unknown
            }
        }
    }
}

/// Maps the model's one-word reply to a label. Anything off-script —
/// preamble, hedging, an unexpected word — is `Unknown`.
fn parse_label(text: &str) -> Sentiment {
    let first_word = text
        .trim()
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase();

    match first_word.as_str() {
        "positive" => Sentiment::Positive,
        "neutral" => Sentiment::Neutral,
        "negative" => Sentiment::Negative,
        _ => Sentiment::Unknown,
    }
}
