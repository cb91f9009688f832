//! Analysis records produced by the inference gateway
//!
//! [`InitialAnalysis`] is the first-pass triage of a case description;
//! [`DetailedAnalysis`] is the final report produced after the clarifying
//! dialogue. Both are created once and never mutated. Both carry a
//! `fallback()` constructor because the gateway may not conform to the
//! requested schema; callers must degrade, never crash.

use serde::{Deserialize, Serialize};

/// How urgently the matter needs attention
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl From<String> for UrgencyLevel {
    // Unknown gateway strings degrade to Medium
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => UrgencyLevel::Low,
            "high" => UrgencyLevel::High,
            _ => UrgencyLevel::Medium,
        }
    }
}

impl UrgencyLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "Low",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::High => "High",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// First-pass classification of a case description (Value Object)
///
/// Produced once by the classification call, held for the rest of the
/// session, and passed as context into every detailed-dialogue request.
/// Field names follow the gateway's wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitialAnalysis {
    pub case_type: String,
    pub summary: String,
    pub is_consumer_case: bool,
    #[serde(rename = "requiresFIR")]
    pub requires_fir: bool,
    pub prerequisites: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    pub urgency_level: UrgencyLevel,
    pub estimated_timeframe: String,
}

impl InitialAnalysis {
    /// Minimal analysis used when the gateway returns something unparsable.
    ///
    /// The session must keep working on malformed output, so this carries
    /// generic-but-safe guidance instead of an error.
    pub fn fallback() -> Self {
        Self {
            case_type: "General Legal Matter".to_string(),
            summary: "Your case requires professional legal review to determine \
                      the applicable law and the right forum."
                .to_string(),
            is_consumer_case: false,
            requires_fir: false,
            prerequisites: vec!["Collect all documents related to the dispute".to_string()],
            recommendations: vec![
                "Consult a lawyer for a detailed assessment of your case".to_string(),
            ],
            next_steps: vec!["Connect with a verified lawyer through NyayBuddy".to_string()],
            urgency_level: UrgencyLevel::Medium,
            estimated_timeframe: "Varies by forum and case complexity".to_string(),
        }
    }

    /// Whether the parsed record carries enough substance to present.
    ///
    /// A structurally valid but empty object (e.g. `{}`) is treated the
    /// same as a parse failure by the response parser.
    pub fn is_presentable(&self) -> bool {
        !self.case_type.trim().is_empty() && !self.summary.trim().is_empty()
    }
}

/// Which authority handles the matter, and how to reach it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorityMapping {
    pub primary_authority: String,
    pub jurisdiction: String,
    pub filing_mechanism: String,
}

/// A statute/section the case rests on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalProvision {
    pub statute: String,
    pub section: String,
    pub relevance: String,
}

/// One step of the recommended action plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionStep {
    pub order: u32,
    pub action: String,
    pub detail: String,
}

/// The final structured report produced after the clarifying dialogue
/// (Value Object, terminal)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailedAnalysis {
    pub case_title: String,
    pub executive_summary: String,
    pub authority: AuthorityMapping,
    pub legal_provisions: Vec<LegalProvision>,
    pub action_plan: Vec<ActionStep>,
    pub timeline_estimate: String,
    pub cost_estimate: String,
    pub success_factors: Vec<String>,
    pub final_assessment: String,
}

impl DetailedAnalysis {
    /// Minimal report used when the generation output is unparsable.
    pub fn fallback() -> Self {
        Self {
            case_title: "Legal Case Assessment".to_string(),
            executive_summary: "A complete automated report could not be produced for \
                                this case. The guidance below is general; a lawyer can \
                                give you a precise assessment."
                .to_string(),
            authority: AuthorityMapping {
                primary_authority: "To be determined by a lawyer".to_string(),
                jurisdiction: "Depends on the facts of the case".to_string(),
                filing_mechanism: "Consult a lawyer before filing".to_string(),
            },
            legal_provisions: Vec::new(),
            action_plan: vec![ActionStep {
                order: 1,
                action: "Consult a verified lawyer".to_string(),
                detail: "Share your case description and any documents you have collected."
                    .to_string(),
            }],
            timeline_estimate: "Varies by forum".to_string(),
            cost_estimate: "Varies by forum and representation".to_string(),
            success_factors: Vec::new(),
            final_assessment: "Professional review recommended.".to_string(),
        }
    }

    pub fn is_presentable(&self) -> bool {
        !self.case_title.trim().is_empty() && !self.executive_summary.trim().is_empty()
    }
}
