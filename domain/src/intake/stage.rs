//! Intake state machine
//!
//! The dialogue is user-paced: every transition is gated on a user action
//! followed by at most one outstanding gateway request. [`IntakeStage`] is
//! a proper sum type and [`IntakeStage::apply`] is the single transition
//! function, so an illegal state cannot be reached by a stray string
//! comparison.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Hard cap on clarifying-question rounds. After the fifth `follow_up`
/// the next request must be `generate`, regardless of what the gateway
/// asks for.
pub const MAX_FOLLOW_UP_ROUNDS: usize = 5;

/// Where an intake session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStage {
    /// Waiting for the case description
    Input,
    /// Classification request outstanding
    Analyzing,
    /// Consumer case: asking about an existing helpline complaint
    ConsumerCheck,
    /// Consumer case: choosing self-file vs lawyer-assisted
    ProceedChoice,
    /// Initial analysis on screen
    Result,
    /// Detailed-dialogue request outstanding
    DetailedLoading,
    /// A round of clarifying questions on screen
    DetailedFollowUp,
    /// Final report on screen
    DetailedResult,
}

/// A user action or gateway outcome driving the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeEvent {
    /// Non-empty description submitted
    DescriptionSubmitted,
    /// Classification returned
    Classified { is_consumer_case: bool },
    /// Helpline-complaint answer recorded (local, no network)
    HelplineRecorded,
    /// Resolution path chosen (local, no network)
    PathChosen,
    /// User opted into (or continued) the detailed dialogue
    DetailedRequested,
    /// Gateway returned a round of clarifying questions
    QuestionsReceived,
    /// Gateway returned the final report
    ReportReady,
    /// User returned from the report to the summary
    BackToSummary,
    /// Gateway call failed; revert to the prior stable stage
    RequestFailed,
}

impl IntakeStage {
    /// Apply an event, returning the next stage.
    ///
    /// Rejects combinations the flow does not allow instead of silently
    /// staying put.
    pub fn apply(self, event: IntakeEvent) -> Result<IntakeStage, DomainError> {
        use IntakeEvent::*;
        use IntakeStage::*;

        let next = match (self, event) {
            (Input, DescriptionSubmitted) => Analyzing,
            (Analyzing, Classified { is_consumer_case }) => {
                if is_consumer_case {
                    ConsumerCheck
                } else {
                    Result
                }
            }
            (Analyzing, RequestFailed) => Input,
            (ConsumerCheck, HelplineRecorded) => ProceedChoice,
            (ProceedChoice, PathChosen) => Result,
            (Result, DetailedRequested) => DetailedLoading,
            (DetailedFollowUp, DetailedRequested) => DetailedLoading,
            (DetailedLoading, QuestionsReceived) => DetailedFollowUp,
            (DetailedLoading, ReportReady) => DetailedResult,
            (DetailedLoading, RequestFailed) => Result,
            (DetailedResult, BackToSummary) => Result,
            (stage, _) => {
                return Err(DomainError::InvalidStage(stage.display_name().to_string()));
            }
        };
        Ok(next)
    }

    /// Whether the stage waits on user input (no request outstanding)
    pub fn is_stable(&self) -> bool {
        !matches!(self, IntakeStage::Analyzing | IntakeStage::DetailedLoading)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IntakeStage::Input => "input",
            IntakeStage::Analyzing => "analyzing",
            IntakeStage::ConsumerCheck => "consumer-check",
            IntakeStage::ProceedChoice => "proceed-choice",
            IntakeStage::Result => "result",
            IntakeStage::DetailedLoading => "detailed-loading",
            IntakeStage::DetailedFollowUp => "detailed-followup",
            IntakeStage::DetailedResult => "detailed-result",
        }
    }
}

impl std::fmt::Display for IntakeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
