//! Question Synthesizer — builds the synthesis prompt from the candidate's
//! stack and experience, invokes the completion service, and runs the
//! normalize-then-fallback pipeline over whatever comes back.
//!
//! The service is pluggable: `AppState` holds an `Arc<dyn CompletionService>`;
//! production wires in the Groq-backed implementation, tests wire in canned
//! output.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::screening::fallback::merge_with_fallback;
use crate::screening::normalize::{normalize_questions, NormalizePolicy};
use crate::screening::prompts::{QUESTION_PROMPT_TEMPLATE, QUESTION_SYSTEM};

/// Minimal seam over the external text-completion service: one stateless
/// instruction+context call returning a text blob or failing.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Production completion service backed by the shared Groq client.
pub struct GroqCompletion {
    llm: LlmClient,
}

impl GroqCompletion {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CompletionService for GroqCompletion {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        self.llm.complete(system, prompt).await
    }
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Neither the service output nor the fallback table produced a single
    /// usable question. Session-halting, user-visible.
    #[error("no usable questions for tech stack '{tech_stack}'")]
    NoUsableQuestions { tech_stack: String },
}

/// Splits a comma-delimited tech-stack answer into trimmed tokens.
pub fn parse_stack(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds the synthesis prompt from the fixed instruction block plus the
/// candidate's stated experience and comma-delimited stack.
pub fn build_prompt(experience: &str, tech_stack: &str) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{experience}", experience.trim())
        .replace("{tech_stack}", tech_stack.trim())
}

/// Synthesizes the interview question list. Service failure and malformed
/// output are expected, not exceptional: both flow into the fallback merge.
/// Fails only when the merged list comes back empty.
pub async fn synthesize(
    service: &dyn CompletionService,
    tech_stack: &str,
    experience: &str,
    policy: &NormalizePolicy,
) -> Result<Vec<String>, SynthesisError> {
    let prompt = build_prompt(experience, tech_stack);

    let raw = match service.complete(QUESTION_SYSTEM, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            // Treated as zero output; the fallback table takes over.
            warn!("Completion service failed, falling back to static questions: {e}");
            String::new()
        }
    };

    let tokens = parse_stack(tech_stack);
    let normalized = normalize_questions(&raw, policy);
    debug!(
        "Normalization kept {} usable lines from service output",
        normalized.questions().len()
    );
    let questions = merge_with_fallback(normalized, &tokens, policy);

    if questions.is_empty() {
        return Err(SynthesisError::NoUsableQuestions {
            tech_stack: tech_stack.to_string(),
        });
    }

    info!("Synthesized {} questions", questions.len());
    Ok(questions)
}
