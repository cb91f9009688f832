//! Inference gateway port
//!
//! Defines the interface for the remote LLM completion service. The
//! gateway is a black box: latency is unbounded, failures are possible at
//! any call, and nothing it returns is trusted; adapters run completions
//! through the defensive parsers in `nyay_domain::intake::parsing` before
//! handing back typed values.

use async_trait::async_trait;
use nyay_domain::{CaseDescription, ConversationHistory, DialogueTurn, InitialAnalysis};
use thiserror::Error;

/// Errors that can occur at the gateway boundary
///
/// Rate-limit and quota exhaustion are distinguished cases shown to the
/// user verbatim; every other failure is a generic "try again". None of
/// them are retried automatically.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("The assistant is receiving too many requests right now. Please try again in a moment.")]
    RateLimited,

    #[error("The AI usage quota is exhausted. Please try again later.")]
    QuotaExhausted,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Empty response from the inference gateway")]
    EmptyResponse,
}

impl GatewayError {
    /// Whether this error carries a user-facing message of its own
    /// (rate limit / quota) rather than the generic failure notice.
    pub fn is_distinguished(&self) -> bool {
        matches!(self, GatewayError::RateLimited | GatewayError::QuotaExhausted)
    }
}

/// Which detailed-dialogue call this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueAction {
    /// Open the dialogue (empty or replayed history)
    Start,
    /// Deliver the current round's answers
    Respond,
    /// Demand the final report
    Generate,
}

impl DialogueAction {
    /// Wire name used in request payloads and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogueAction::Start => "start",
            DialogueAction::Respond => "respond",
            DialogueAction::Generate => "generate",
        }
    }
}

impl std::fmt::Display for DialogueAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One detailed-dialogue request: full context plus the action
#[derive(Debug, Clone)]
pub struct DialogueRequest {
    pub case_description: CaseDescription,
    pub initial_analysis: InitialAnalysis,
    pub history: ConversationHistory,
    pub action: DialogueAction,
}

/// Gateway for LLM communication
///
/// This port defines how the application layer reaches the inference
/// service. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// First-pass classification of a case description.
    ///
    /// Adapters must degrade malformed completions to
    /// [`InitialAnalysis::fallback`] rather than fail; only transport
    /// errors surface as `Err`.
    async fn classify(
        &self,
        description: &CaseDescription,
    ) -> Result<InitialAnalysis, GatewayError>;

    /// One turn of the detailed dialogue.
    async fn dialogue(&self, request: DialogueRequest) -> Result<DialogueTurn, GatewayError>;
}
