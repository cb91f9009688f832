//! Prompt templates for the intake flow
//!
//! The wording of the JSON-contract sections must stay aligned with the
//! parsers in [`crate::intake::parsing`]; the field names below are the
//! ones the parsers expect on the wire.

use crate::conversation::ConversationHistory;
use crate::core::description::CaseDescription;
use crate::intake::analysis::InitialAnalysis;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the first-pass classification call
    pub fn classification_system() -> &'static str {
        r#"You are a legal triage assistant for India. Given a citizen's description of
a problem, classify it and return ONLY a JSON object with exactly these fields:

{
  "caseType": "short category, e.g. Consumer Dispute, Tenancy, Employment",
  "summary": "2-3 sentence plain-language summary of the legal position",
  "isConsumerCase": true or false,
  "requiresFIR": true or false,
  "prerequisites": ["documents or steps needed before filing"],
  "recommendations": ["concrete recommendations"],
  "nextSteps": ["ordered next steps"],
  "urgencyLevel": "low" | "medium" | "high",
  "estimatedTimeframe": "expected duration, e.g. 3-6 months"
}

Set isConsumerCase to true only for disputes about goods or services bought
for consideration (Consumer Protection Act, 2019). Set requiresFIR to true
only when the matter involves a cognizable offence. Do not add any text
outside the JSON object."#
    }

    /// User prompt for the classification call
    pub fn classification_prompt(description: &CaseDescription) -> String {
        format!(
            "A citizen describes their problem as follows:\n\n{}\n\nClassify this case.",
            description.content()
        )
    }

    /// System prompt for the clarifying-question dialogue
    pub fn dialogue_system() -> &'static str {
        r#"You are conducting a structured intake interview to prepare a detailed legal
analysis for a citizen in India. You may ask clarifying questions in rounds,
at most 5 rounds in total, and each answer you receive is folded into the
conversation. Reply with ONLY one JSON object, in one of these shapes:

When you need more information:
{
  "type": "follow_up",
  "message": "short preamble shown above the questions",
  "questions": [
    {
      "id": "unique id",
      "question": "the question text",
      "type": "yes_no" | "multiple_choice" | "scale" | "date" | "amount" | "text",
      "options": ["only for multiple_choice"],
      "scale_labels": {"min": "label for 1", "max": "label for 5"},
      "required": true or false
    }
  ]
}

When you have enough information:
{"type": "analysis_ready", "message": "one sentence telling the user the analysis is ready"}

Ask only what materially changes the legal assessment. Never repeat a
question that was already answered. Do not add any text outside the JSON
object."#
    }

    /// Context block carried as the first user message of every dialogue
    /// request
    pub fn dialogue_context(
        description: &CaseDescription,
        analysis: &InitialAnalysis,
    ) -> String {
        let analysis_json =
            serde_json::to_string_pretty(analysis).unwrap_or_else(|_| "{}".to_string());
        format!(
            "Case description:\n{}\n\nInitial classification:\n{}",
            description.content(),
            analysis_json
        )
    }

    /// Instruction closing the dialogue and demanding the final report
    pub fn generation_instruction() -> &'static str {
        r#"Based on the case description, the initial classification, and all answers
above, produce the final detailed analysis. Reply with ONLY one JSON object:

{
  "type": "detailed_analysis",
  "caseTitle": "short title for the case",
  "executiveSummary": "3-5 sentence assessment",
  "authority": {
    "primaryAuthority": "forum or authority that handles this matter",
    "jurisdiction": "territorial/pecuniary jurisdiction notes",
    "filingMechanism": "how to file, e.g. e-Daakhil portal, district forum"
  },
  "legalProvisions": [
    {"statute": "act name", "section": "section number", "relevance": "why it applies"}
  ],
  "actionPlan": [
    {"order": 1, "action": "what to do", "detail": "how to do it"}
  ],
  "timelineEstimate": "expected duration",
  "costEstimate": "expected fees and costs in INR",
  "successFactors": ["facts that strengthen or weaken the case"],
  "finalAssessment": "closing assessment and recommendation"
}

Do not add any text outside the JSON object."#
    }

    /// Render the history as a labelled transcript (diagnostic output and
    /// conversation logs; the gateway receives the structured messages).
    pub fn transcript(history: &ConversationHistory) -> String {
        history
            .messages()
            .iter()
            .map(|m| {
                let label = match m.role {
                    crate::conversation::Role::User => "User",
                    crate::conversation::Role::Assistant => "Assistant",
                };
                format!("{}: {}", label, m.content)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
