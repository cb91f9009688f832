//! Conversation history for the clarifying-question dialogue

pub mod entities;

pub use entities::{ConversationHistory, ConversationMessage, Role};
