//! Defensive parsing of gateway completions
//!
//! Every completion is untrusted input: the model may fence its JSON in a
//! code block, wrap it in prose, drop fields, or return something else
//! entirely. These functions are pure; no I/O, no session state; and
//! never fail: unparsable output degrades to a typed fallback value so the
//! session always keeps moving.

use super::analysis::{DetailedAnalysis, InitialAnalysis};
use super::question::SmartQuestion;
use serde::Deserialize;

/// One turn of the detailed dialogue, tagged by the `type` field
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogueTurn {
    /// More clarifying questions to render
    FollowUp {
        #[serde(default)]
        message: String,
        #[serde(default)]
        questions: Vec<SmartQuestion>,
    },
    /// Enough context gathered; caller should request generation
    AnalysisReady {
        #[serde(default)]
        message: String,
    },
    /// The final report itself
    DetailedAnalysis(DetailedAnalysis),
}

impl DialogueTurn {
    /// Fallback used when a turn parses as none of the known shapes.
    ///
    /// Degrading to `AnalysisReady` lets the session proceed to generation
    /// instead of wedging mid-dialogue.
    pub fn fallback() -> Self {
        DialogueTurn::AnalysisReady {
            message: "Enough information has been collected. Generating your detailed analysis."
                .to_string(),
        }
    }
}

/// Strip a markdown code fence (```json ... ``` or ``` ... ```) if the
/// completion is wrapped in one.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") up to the first newline
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Extract the outermost `{...}` object from a completion that may carry
/// surrounding prose.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse a classification completion into an [`InitialAnalysis`].
///
/// Malformed or empty output yields [`InitialAnalysis::fallback`]; the
/// classification call must never crash the session.
pub fn parse_initial_analysis(completion: &str) -> InitialAnalysis {
    parse_object::<InitialAnalysis>(completion)
        .filter(InitialAnalysis::is_presentable)
        .unwrap_or_else(InitialAnalysis::fallback)
}

/// Parse a detailed-dialogue completion into a [`DialogueTurn`].
pub fn parse_dialogue_turn(completion: &str) -> DialogueTurn {
    match parse_object::<DialogueTurn>(completion) {
        Some(DialogueTurn::FollowUp { message, questions }) if questions.is_empty() => {
            // A follow_up with no questions would render an empty round;
            // treat it as ready-for-generation instead.
            let _ = message;
            DialogueTurn::fallback()
        }
        Some(turn) => turn,
        None => DialogueTurn::fallback(),
    }
}

/// Parse a generation completion into a [`DetailedAnalysis`].
pub fn parse_detailed_analysis(completion: &str) -> DetailedAnalysis {
    // The generate action may answer either with the bare report object or
    // with the tagged detailed_analysis turn; accept both.
    match parse_object::<DialogueTurn>(completion) {
        Some(DialogueTurn::DetailedAnalysis(report)) if report.is_presentable() => report,
        _ => parse_object::<DetailedAnalysis>(completion)
            .filter(DetailedAnalysis::is_presentable)
            .unwrap_or_else(DetailedAnalysis::fallback),
    }
}

fn parse_object<T: serde::de::DeserializeOwned>(completion: &str) -> Option<T> {
    let stripped = strip_code_fences(completion);
    let candidate = extract_json_object(stripped)?;
    serde_json::from_str(candidate).ok()
}
