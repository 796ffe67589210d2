use std::sync::Arc;

use crate::config::Config;
use crate::screening::normalize::NormalizePolicy;
use crate::screening::sentiment::SentimentClassifier;
use crate::screening::synthesizer::CompletionService;
use crate::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable completion service. Production: GroqCompletion. Tests swap in stubs.
    pub completion: Arc<dyn CompletionService>,
    /// Pluggable sentiment classifier — informational annotations only.
    pub sentiment: Arc<dyn SentimentClassifier>,
    /// Normalization thresholds — one policy is the contract, fixed at startup.
    pub policy: NormalizePolicy,
    /// Kept for handlers that need runtime settings beyond the collaborators.
    #[allow(dead_code)]
    pub config: Config,
}
