//! Gateway-generated clarifying questions and their typed answers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Input widget a question should be rendered as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "snake_case")]
pub enum QuestionKind {
    YesNo,
    MultipleChoice,
    Scale,
    Date,
    Amount,
    #[default]
    Text,
}

impl From<String> for QuestionKind {
    // Unknown kinds degrade to free text; the safest widget
    fn from(s: String) -> Self {
        match s.as_str() {
            "yes_no" => QuestionKind::YesNo,
            "multiple_choice" => QuestionKind::MultipleChoice,
            "scale" => QuestionKind::Scale,
            "date" => QuestionKind::Date,
            "amount" => QuestionKind::Amount,
            _ => QuestionKind::Text,
        }
    }
}

/// End labels for a 1-5 scale question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleLabels {
    pub min: String,
    pub max: String,
}

/// A clarifying question produced fresh each round by the gateway
///
/// Not validated or persisted beyond the current round, except by echoing
/// it into the conversation history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartQuestion {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub options: Vec<String>,
    pub scale_labels: Option<ScaleLabels>,
    pub required: bool,
}

/// A typed answer to a [`SmartQuestion`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Answer {
    YesNo(bool),
    Choice(String),
    Scale(u8),
    Date(String),
    Amount(String),
    Text(String),
}

impl Answer {
    /// Scale answer clamped to the 1-5 range
    pub fn scale(value: u8) -> Self {
        Answer::Scale(value.clamp(1, 5))
    }

    /// Whether the answer carries any content
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::YesNo(_) | Answer::Scale(_) => false,
            Answer::Choice(s) | Answer::Date(s) | Answer::Amount(s) | Answer::Text(s) => {
                s.trim().is_empty()
            }
        }
    }
}

/// Answers recorded for the current round, keyed by question id
///
/// Cleared at the start of each round and folded into the conversation
/// history at round's end.
#[derive(Debug, Clone, Default)]
pub struct RoundResponses {
    answers: HashMap<String, Answer>,
}

impl RoundResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question_id: impl Into<String>, answer: Answer) {
        self.answers.insert(question_id.into(), answer);
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Ids of required questions that have no non-empty answer yet
    pub fn missing_required<'a>(&self, questions: &'a [SmartQuestion]) -> Vec<&'a str> {
        questions
            .iter()
            .filter(|q| q.required)
            .filter(|q| self.get(&q.id).is_none_or(|a| a.is_empty()))
            .map(|q| q.id.as_str())
            .collect()
    }

    /// Whether every required question has an answer
    pub fn is_complete(&self, questions: &[SmartQuestion]) -> bool {
        self.missing_required(questions).is_empty()
    }
}
