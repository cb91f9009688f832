//! Infrastructure layer for nyaybuddy
//!
//! This crate contains the adapters behind the application-layer ports:
//! the HTTP inference gateway, the configuration loader, and the JSONL
//! conversation logger.

pub mod config;
pub mod gateway;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, GatewayConfig, LoggingConfig};
pub use gateway::HttpInferenceGateway;
pub use logging::JsonlConversationLogger;
