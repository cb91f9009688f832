//! Application layer for nyaybuddy
//!
//! This crate contains the use cases and ports. The central use case is
//! [`IntakeSession`], which drives the whole intake dialogue against the
//! [`InferenceGateway`] port. Adapters live in the infrastructure layer;
//! progress display lives in the presentation layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    ConversationEvent, ConversationLogger, DialogueAction, DialogueRequest, GatewayError,
    InferenceGateway, IntakeProgressNotifier, NoConversationLogger, NoIntakeProgress,
};
pub use use_cases::{IntakeError, IntakeSession, PendingRound};
