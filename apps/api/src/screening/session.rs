//! Session state — one per conversation, created on first contact, mutated
//! only through the turn engine, discarded with the session. Never shared
//! across conversations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::screening::fields::INTAKE_FIELDS;
use crate::screening::sentiment::Sentiment;

/// Explicit conversation phase. Replaces the re-render-driven control flow of
/// chat-widget bots with one state machine: each turn applies exactly one
/// transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Collecting profile field `index` of `INTAKE_FIELDS`.
    CollectingField { index: usize },
    /// All fields collected; question synthesis pending. Transient — a
    /// session in this phase synthesizes on its next turn, exactly once.
    Synthesizing,
    /// Asking synthesized question `index`.
    AskingQuestion { index: usize },
    /// Absorbing. Exit keyword, completion, or synthesis failure.
    Terminated,
}

/// One collected profile field, in intake order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectedField {
    pub key: String,
    pub value: String,
}

/// One interview exchange: the question served, the candidate's answer, and
/// the sentiment annotation.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub question: String,
    pub answer: String,
    pub sentiment: Sentiment,
}

/// Full per-conversation state. The report-export collaborator reads
/// `fields` and `transcript` from the snapshot endpoint; nothing here is
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub phase: Phase,
    pub fields: Vec<CollectedField>,
    pub questions: Vec<String>,
    pub transcript: Vec<TranscriptEntry>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: Phase::CollectingField { index: 0 },
            fields: Vec::new(),
            questions: Vec::new(),
            transcript: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Prompt text for the intake field currently being collected, or None
    /// outside the intake phase.
    pub fn current_prompt(&self) -> Option<&'static str> {
        match self.phase {
            Phase::CollectingField { index } => INTAKE_FIELDS.get(index).map(|f| f.prompt),
            _ => None,
        }
    }

    /// The synthesized question currently being asked, or None outside the
    /// interview phase.
    pub fn current_question(&self) -> Option<&str> {
        match self.phase {
            Phase::AskingQuestion { index } => self.questions.get(index).map(String::as_str),
            _ => None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    /// The collected answer for a field key, if already answered.
    pub fn answer_for(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// Stores `value` under the current intake field and advances by exactly
    /// one, moving to `Synthesizing` when the field list is exhausted.
    /// Returns the key of the field just answered. No-op outside intake.
    pub fn record_field(&mut self, value: String) -> Option<&'static str> {
        let Phase::CollectingField { index } = self.phase else {
            return None;
        };
        let field = INTAKE_FIELDS.get(index)?;
        self.fields.push(CollectedField {
            key: field.key.to_string(),
            value,
        });
        self.phase = if index + 1 < INTAKE_FIELDS.len() {
            Phase::CollectingField { index: index + 1 }
        } else {
            Phase::Synthesizing
        };
        Some(field.key)
    }

    /// Installs the synthesized question list and starts the interview.
    /// Only legal from `Synthesizing` — synthesis happens exactly once.
    pub fn begin_interview(&mut self, questions: Vec<String>) {
        debug_assert_eq!(self.phase, Phase::Synthesizing);
        self.questions = questions;
        self.phase = if self.questions.is_empty() {
            Phase::Terminated
        } else {
            Phase::AskingQuestion { index: 0 }
        };
    }

    /// Records the answer to the current question and advances by exactly
    /// one, terminating after the last question. No-op outside the interview.
    pub fn record_interview_answer(&mut self, answer: String, sentiment: Sentiment) {
        let Phase::AskingQuestion { index } = self.phase else {
            return;
        };
        let Some(question) = self.questions.get(index) else {
            return;
        };
        self.transcript.push(TranscriptEntry {
            question: question.clone(),
            answer,
            sentiment,
        });
        self.phase = if index + 1 < self.questions.len() {
            Phase::AskingQuestion { index: index + 1 }
        } else {
            Phase::Terminated
        };
    }

    /// Absorbing terminal transition.
    pub fn terminate(&mut self) {
        self.phase = Phase::Terminated;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
