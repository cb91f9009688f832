//! Conversation domain entities

use serde::{Deserialize, Serialize};

/// Role of a message in the clarifying-question dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message in the dialogue (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only record of the clarifying dialogue (Entity)
///
/// Each follow-up round contributes exactly two entries: the round's
/// questions serialized into one assistant message, and the user's
/// formatted answers into one user message. The full history is replayed
/// to the gateway on every "respond" and "generate" request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationHistory {
    messages: Vec<ConversationMessage>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ConversationMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ConversationMessage::assistant(content));
    }

    /// Append a completed round: the assistant's question block followed by
    /// the user's formatted answer block.
    pub fn push_round(
        &mut self,
        questions: impl Into<String>,
        answers: impl Into<String>,
    ) {
        self.push_assistant(questions);
        self.push_user(answers);
    }
}
