//! Ports (interfaces) for the application layer
//!
//! Ports define how the application layer communicates with the outside
//! world. Implementations (adapters) live in the infrastructure and
//! presentation layers.

pub mod conversation_logger;
pub mod inference_gateway;
pub mod intake_progress;

pub use conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
pub use inference_gateway::{DialogueAction, DialogueRequest, GatewayError, InferenceGateway};
pub use intake_progress::{IntakeProgressNotifier, NoIntakeProgress};
