//! Turn engine — applies exactly one state transition per submitted user
//! turn. Evaluation order is fixed: terminal check, exit keywords, empty
//! input, then the active sequencer.

use tracing::info;

use crate::screening::fields::{acknowledgment, EXPERIENCE_KEY, TECH_STACK_KEY};
use crate::screening::normalize::NormalizePolicy;
use crate::screening::sentiment::SentimentClassifier;
use crate::screening::session::{Phase, Session};
use crate::screening::synthesizer::{synthesize, CompletionService};

/// Exit keywords. Matched case-insensitively against whole word tokens of
/// the input — substring matching would fire on words like "backend".
const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "stop", "end", "bye"];

pub const GREETING: &str = "Welcome to TalentScout! I'm here to help with your initial screening. \
    I'll collect a few details, then ask some short technical questions. \
    You can type 'exit' at any time to finish.";

const FAREWELL: &str = "Thank you for your interest in TalentScout. \
    We will review your details and be in touch. Have a great day!";

const CLOSING: &str = "That's everything! Thank you for completing the screening — \
    our team will review your answers and follow up soon.";

const SESSION_CLOSED_NOTICE: &str =
    "This screening session has already ended. Thank you again for your time!";

const EMPTY_INPUT_REPROMPT: &str = "I didn't catch that — could you type an answer?";

const SYNTHESIS_FAILED_MESSAGE: &str = "I'm sorry — I couldn't prepare technical questions \
    for that tech stack. A recruiter will reach out to continue your screening manually.";

/// Everything one turn produces: the assistant's reply lines, in order, and
/// whether the session is now terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReply {
    pub messages: Vec<String>,
    pub terminated: bool,
}

impl TurnReply {
    fn new(session: &Session, messages: Vec<String>) -> Self {
        Self {
            messages,
            terminated: session.is_terminated(),
        }
    }
}

/// True when any whole word of the input is an exit keyword,
/// case-insensitively.
pub fn exit_requested(input: &str) -> bool {
    input
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| EXIT_KEYWORDS.contains(&word))
}

/// Processes one user turn against the session, mutating it by exactly one
/// transition. The exit check runs before any sequencer logic, every turn.
pub async fn process_turn(
    session: &mut Session,
    input: &str,
    completion: &dyn CompletionService,
    sentiment: &dyn SentimentClassifier,
    policy: &NormalizePolicy,
) -> TurnReply {
    if session.is_terminated() {
        return TurnReply::new(session, vec![SESSION_CLOSED_NOTICE.to_string()]);
    }

    if exit_requested(input) {
        info!(session_id = %session.id, "Exit keyword received, terminating session");
        session.terminate();
        return TurnReply::new(session, vec![FAREWELL.to_string()]);
    }

    if input.trim().is_empty() {
        let mut messages = vec![EMPTY_INPUT_REPROMPT.to_string()];
        if let Some(prompt) = session.current_prompt() {
            messages.push(prompt.to_string());
        } else if let Some(question) = session.current_question() {
            messages.push(question.to_string());
        }
        return TurnReply::new(session, messages);
    }

    match session.phase {
        Phase::CollectingField { .. } => {
            let mut messages = Vec::new();
            if let Some(key) = session.record_field(input.to_string()) {
                if let Some(ack) = acknowledgment(key, input) {
                    messages.push(ack);
                }
            }
            match session.phase {
                Phase::CollectingField { .. } => {
                    // current_prompt is Some by construction in this phase
                    if let Some(prompt) = session.current_prompt() {
                        messages.push(prompt.to_string());
                    }
                }
                Phase::Synthesizing => {
                    messages.extend(run_synthesis(session, completion, policy).await);
                }
                _ => {}
            }
            TurnReply::new(session, messages)
        }
        // Intake completion synthesizes within the same turn, so this phase
        // is only observable if that synthesis was interrupted; re-run it.
        Phase::Synthesizing => {
            let messages = run_synthesis(session, completion, policy).await;
            TurnReply::new(session, messages)
        }
        Phase::AskingQuestion { .. } => {
            let label = sentiment.classify(input).await;
            session.record_interview_answer(input.to_string(), label);

            let mut messages = vec![format!("Noted — your answer reads as {}.", label.label())];
            if let Some(question) = session.current_question() {
                messages.push(question.to_string());
            } else {
                messages.push(CLOSING.to_string());
            }
            TurnReply::new(session, messages)
        }
        Phase::Terminated => TurnReply::new(session, vec![SESSION_CLOSED_NOTICE.to_string()]),
    }
}

/// Runs question synthesis exactly once, at intake completion, and starts
/// the interview. Synthesis failure terminates the session with a
/// user-visible message.
async fn run_synthesis(
    session: &mut Session,
    completion: &dyn CompletionService,
    policy: &NormalizePolicy,
) -> Vec<String> {
    let tech_stack = session.answer_for(TECH_STACK_KEY).unwrap_or("").to_string();
    let experience = session.answer_for(EXPERIENCE_KEY).unwrap_or("").to_string();

    match synthesize(completion, &tech_stack, &experience, policy).await {
        Ok(questions) => {
            session.begin_interview(questions);
            let mut messages =
                vec!["Here comes your first technical question.".to_string()];
            if let Some(question) = session.current_question() {
                messages.push(question.to_string());
            }
            messages
        }
        Err(e) => {
            info!(session_id = %session.id, "Synthesis failed: {e}");
            session.terminate();
            vec![SYNTHESIS_FAILED_MESSAGE.to_string()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::llm_client::LlmError;
    use crate::screening::fields::INTAKE_FIELDS;
    use crate::screening::sentiment::Sentiment;

    /// Completion stub that records every prompt it receives.
    struct RecordingCompletion {
        prompts: Mutex<Vec<String>>,
        reply: Result<String, ()>,
    }

    impl RecordingCompletion {
        fn replying(text: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Ok(text.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Err(()),
            }
        }

        fn call_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionService for RecordingCompletion {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(LlmError::EmptyContent),
            }
        }
    }

    struct FixedSentiment(Sentiment);

    #[async_trait]
    impl SentimentClassifier for FixedSentiment {
        async fn classify(&self, _answer: &str) -> Sentiment {
            self.0
        }
    }

    const GOOD_OUTPUT: &str = "\
1. How would you migrate a live Postgres schema without downtime?
2. What would you check first when a container is OOM-killed in production?
3. How do you keep dependency upgrades from breaking your deploy pipeline?";

    fn answers() -> Vec<&'static str> {
        vec![
            "Jane Doe",
            "jane@example.com",
            "+1 555 0100",
            "5",
            "Backend Engineer",
            "Berlin",
            "Python, Docker",
        ]
    }

    async fn complete_intake(
        session: &mut Session,
        completion: &dyn CompletionService,
        sentiment: &dyn SentimentClassifier,
    ) -> TurnReply {
        let policy = NormalizePolicy::default();
        let mut last = TurnReply {
            messages: vec![],
            terminated: false,
        };
        for answer in answers() {
            last = process_turn(session, answer, completion, sentiment, &policy).await;
        }
        last
    }

    #[test]
    fn test_exit_keywords_match_whole_words_case_insensitively() {
        assert!(exit_requested("BYE"));
        assert!(exit_requested("ok, stop now"));
        assert!(exit_requested("I Quit."));
        assert!(!exit_requested("I work on backend systems"));
        assert!(!exit_requested("my laptop is a desktop replacement"));
        assert!(!exit_requested("Python, Docker"));
    }

    #[tokio::test]
    async fn test_intake_walk_stores_answers_and_synthesizes_once() {
        let completion = RecordingCompletion::replying(GOOD_OUTPUT);
        let sentiment = FixedSentiment(Sentiment::Neutral);
        let mut session = Session::new();

        let reply = complete_intake(&mut session, &completion, &sentiment).await;

        assert_eq!(session.answer_for("Full Name"), Some("Jane Doe"));
        assert_eq!(session.answer_for("Tech Stack"), Some("Python, Docker"));
        assert_eq!(session.fields.len(), INTAKE_FIELDS.len());

        // Synthesis fired exactly once, with the stack and experience inlined.
        assert_eq!(completion.call_count(), 1);
        let prompt = completion.prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("Python, Docker"));
        assert!(prompt.contains('5'));

        // The first question is served in the same turn.
        assert_eq!(session.phase, Phase::AskingQuestion { index: 0 });
        assert!(reply
            .messages
            .iter()
            .any(|m| m.starts_with("How would you migrate")));
    }

    #[tokio::test]
    async fn test_interview_annotates_answers_and_closes() {
        let completion = RecordingCompletion::replying(GOOD_OUTPUT);
        let sentiment = FixedSentiment(Sentiment::Positive);
        let policy = NormalizePolicy::default();
        let mut session = Session::new();
        complete_intake(&mut session, &completion, &sentiment).await;

        let reply = process_turn(&mut session, "I'd use pg_dump", &completion, &sentiment, &policy).await;
        assert!(reply.messages[0].contains("positive"));
        assert!(!reply.terminated);

        process_turn(&mut session, "Check memory limits", &completion, &sentiment, &policy).await;
        let last = process_turn(&mut session, "Pin versions and test", &completion, &sentiment, &policy).await;

        assert!(last.terminated);
        assert!(last.messages.last().unwrap().contains("Thank you"));
        assert_eq!(session.transcript.len(), 3);
        assert_eq!(session.transcript[0].sentiment, Sentiment::Positive);
        // No further completion calls during the interview.
        assert_eq!(completion.call_count(), 1);
    }

    #[tokio::test]
    async fn test_exit_keyword_takes_precedence_and_is_absorbing() {
        let completion = RecordingCompletion::replying(GOOD_OUTPUT);
        let sentiment = FixedSentiment(Sentiment::Neutral);
        let policy = NormalizePolicy::default();
        let mut session = Session::new();

        process_turn(&mut session, "Jane Doe", &completion, &sentiment, &policy).await;
        let reply = process_turn(&mut session, "BYE", &completion, &sentiment, &policy).await;
        assert!(reply.terminated);
        assert!(reply.messages[0].contains("Thank you"));

        // Subsequent turns change nothing.
        let fields_before = session.fields.clone();
        let reply = process_turn(&mut session, "hello again", &completion, &sentiment, &policy).await;
        assert!(reply.terminated);
        assert_eq!(session.fields, fields_before);
        assert_eq!(completion.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_input_reprompts_without_advancing() {
        let completion = RecordingCompletion::replying(GOOD_OUTPUT);
        let sentiment = FixedSentiment(Sentiment::Neutral);
        let policy = NormalizePolicy::default();
        let mut session = Session::new();

        let reply = process_turn(&mut session, "   ", &completion, &sentiment, &policy).await;
        assert_eq!(session.phase, Phase::CollectingField { index: 0 });
        assert!(session.fields.is_empty());
        assert_eq!(reply.messages.len(), 2);
        assert_eq!(reply.messages[1], INTAKE_FIELDS[0].prompt);
    }

    #[tokio::test]
    async fn test_synthesis_failure_without_fallback_halts_session() {
        let completion = RecordingCompletion::failing();
        let sentiment = FixedSentiment(Sentiment::Neutral);
        let policy = NormalizePolicy::default();
        let mut session = Session::new();

        for answer in [
            "Jane Doe",
            "jane@example.com",
            "+1 555 0100",
            "5",
            "Backend Engineer",
            "Berlin",
            "COBOL", // no fallback entry
        ] {
            process_turn(&mut session, answer, &completion, &sentiment, &policy).await;
        }

        assert!(session.is_terminated());
        assert!(session.questions.is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_with_fallback_match_continues() {
        let completion = RecordingCompletion::failing();
        let sentiment = FixedSentiment(Sentiment::Neutral);
        let mut session = Session::new();

        complete_intake(&mut session, &completion, &sentiment).await;

        // Python + Docker fallbacks cover the minimum viable count.
        assert_eq!(session.phase, Phase::AskingQuestion { index: 0 });
        assert!(session.questions.len() >= 3);
    }
}
