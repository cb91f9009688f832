//! Intake session use case.
//!
//! [`IntakeSession`] drives the whole intake dialogue: classification of
//! the case description, the local consumer sub-flow, and the bounded
//! clarifying-question loop ending in the detailed report.
//!
//! The session is user-paced; every method is triggered by one user
//! action and performs at most one outstanding gateway request. It owns
//! all per-session state exclusively; there is no cross-session sharing
//! and therefore no locking.
//!
//! A round's Q/A block is committed to [`ConversationHistory`] only after
//! the gateway call it belongs to succeeds. A failed call leaves history
//! and the pending round untouched, so a manual resubmit sees identical
//! state.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::inference_gateway::{
    DialogueAction, DialogueRequest, GatewayError, InferenceGateway,
};
use crate::ports::intake_progress::IntakeProgressNotifier;
use nyay_domain::util::truncate_str;
use nyay_domain::{
    Answer, CaseDescription, ConversationHistory, DetailedAnalysis, DialogueTurn, DomainError,
    HelplineStatus, InitialAnalysis, IntakeEvent, IntakeStage, MAX_FOLLOW_UP_ROUNDS,
    ResolutionPath, RoundResponses, SmartQuestion, format_question_block, format_round,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by the intake session.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntakeError {
    /// Whether the underlying failure carries its own user-facing message
    /// (rate limit / quota exhaustion).
    pub fn is_distinguished(&self) -> bool {
        matches!(self, IntakeError::Gateway(err) if err.is_distinguished())
    }
}

/// The round of clarifying questions currently on screen.
#[derive(Debug, Clone)]
pub struct PendingRound {
    pub message: String,
    pub questions: Vec<SmartQuestion>,
}

/// Use case driving one intake session.
pub struct IntakeSession {
    gateway: Arc<dyn InferenceGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
    stage: IntakeStage,
    description: Option<CaseDescription>,
    analysis: Option<InitialAnalysis>,
    helpline_status: Option<HelplineStatus>,
    resolution_path: Option<ResolutionPath>,
    history: ConversationHistory,
    pending_round: Option<PendingRound>,
    responses: RoundResponses,
    rounds_completed: usize,
    report: Option<DetailedAnalysis>,
}

impl IntakeSession {
    pub fn new(gateway: Arc<dyn InferenceGateway>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
            stage: IntakeStage::Input,
            description: None,
            analysis: None,
            helpline_status: None,
            resolution_path: None,
            history: ConversationHistory::new(),
            pending_round: None,
            responses: RoundResponses::new(),
            rounds_completed: 0,
            report: None,
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    // ==================== Accessors ====================

    pub fn stage(&self) -> IntakeStage {
        self.stage
    }

    pub fn description(&self) -> Option<&CaseDescription> {
        self.description.as_ref()
    }

    pub fn analysis(&self) -> Option<&InitialAnalysis> {
        self.analysis.as_ref()
    }

    pub fn helpline_status(&self) -> Option<&HelplineStatus> {
        self.helpline_status.as_ref()
    }

    pub fn resolution_path(&self) -> Option<ResolutionPath> {
        self.resolution_path
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn current_round(&self) -> Option<&PendingRound> {
        self.pending_round.as_ref()
    }

    /// Completed clarifying rounds so far.
    pub fn rounds_completed(&self) -> usize {
        self.rounds_completed
    }

    /// 1-based number of the round currently on screen.
    pub fn round_number(&self) -> usize {
        self.rounds_completed + 1
    }

    pub fn report(&self) -> Option<&DetailedAnalysis> {
        self.report.as_ref()
    }

    // ==================== Classification ====================

    /// Submit the case description and run first-pass classification.
    ///
    /// On success the stage is `ConsumerCheck` (consumer case) or
    /// `Result`. On gateway failure the stage reverts to `Input` and the
    /// error is surfaced; nothing is retried.
    pub async fn submit_description(
        &mut self,
        text: &str,
        progress: &dyn IntakeProgressNotifier,
    ) -> Result<(), IntakeError> {
        let description =
            CaseDescription::try_new(text).ok_or(DomainError::EmptyDescription)?;
        self.stage = self.stage.apply(IntakeEvent::DescriptionSubmitted)?;

        info!(
            "Classifying case: {}",
            truncate_str(description.content(), 100)
        );
        progress.on_request_start("classify");
        let result = self.gateway.classify(&description).await;
        progress.on_request_end("classify");

        match result {
            Ok(analysis) => {
                self.stage = self.stage.apply(IntakeEvent::Classified {
                    is_consumer_case: analysis.is_consumer_case,
                })?;
                debug!(
                    "Classified as '{}' (consumer: {})",
                    analysis.case_type, analysis.is_consumer_case
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "classification",
                    serde_json::json!({
                        "case_type": analysis.case_type,
                        "is_consumer_case": analysis.is_consumer_case,
                        "urgency": analysis.urgency_level.display_name(),
                    }),
                ));
                self.description = Some(description);
                self.analysis = Some(analysis);
                Ok(())
            }
            Err(err) => {
                warn!("Classification failed: {}", err);
                self.stage = self.stage.apply(IntakeEvent::RequestFailed)?;
                self.log_gateway_error("classify", &err);
                Err(err.into())
            }
        }
    }

    // ==================== Consumer sub-flow (local, no network) ====================

    /// Record whether a National Consumer Helpline complaint exists.
    pub fn record_helpline_status(&mut self, status: HelplineStatus) -> Result<(), IntakeError> {
        self.stage = self.stage.apply(IntakeEvent::HelplineRecorded)?;
        self.helpline_status = Some(status);
        Ok(())
    }

    /// Record the chosen resolution path (self-file vs lawyer-assisted).
    pub fn choose_path(&mut self, path: ResolutionPath) -> Result<(), IntakeError> {
        self.stage = self.stage.apply(IntakeEvent::PathChosen)?;
        self.resolution_path = Some(path);
        Ok(())
    }

    // ==================== Detailed dialogue ====================

    /// Opt into the detailed analysis from the result view.
    pub async fn begin_detailed(
        &mut self,
        progress: &dyn IntakeProgressNotifier,
    ) -> Result<(), IntakeError> {
        self.stage = self.stage.apply(IntakeEvent::DetailedRequested)?;
        match self
            .send_dialogue(DialogueAction::Start, self.history.clone(), progress)
            .await
        {
            Ok(turn) => self.handle_turn(turn, progress).await,
            Err(err) => {
                self.stage = self.stage.apply(IntakeEvent::RequestFailed)?;
                Err(err)
            }
        }
    }

    /// Record one answer for the current round.
    pub fn record_answer(
        &mut self,
        question_id: impl Into<String>,
        answer: Answer,
    ) -> Result<(), IntakeError> {
        if self.pending_round.is_none() {
            return Err(DomainError::InvalidStage(self.stage.display_name().to_string()).into());
        }
        self.responses.record(question_id, answer);
        Ok(())
    }

    /// Ids of required questions still missing an answer this round.
    pub fn missing_required(&self) -> Vec<String> {
        match &self.pending_round {
            Some(round) => self
                .responses
                .missing_required(&round.questions)
                .into_iter()
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Deliver the current round's answers.
    ///
    /// Every required question must be answered. The Q/A block is folded
    /// into history only after the gateway call succeeds; on failure the
    /// questions stay on screen and a resubmit sees identical state.
    pub async fn submit_answers(
        &mut self,
        progress: &dyn IntakeProgressNotifier,
    ) -> Result<(), IntakeError> {
        let round = self
            .pending_round
            .clone()
            .ok_or_else(|| DomainError::InvalidStage(self.stage.display_name().to_string()))?;
        if let Some(id) = self.responses.missing_required(&round.questions).first() {
            return Err(DomainError::UnansweredQuestion(id.to_string()).into());
        }

        self.stage = self.stage.apply(IntakeEvent::DetailedRequested)?;

        let mut candidate = self.history.clone();
        candidate.push_round(
            format_question_block(&round.message, &round.questions),
            format_round(&round.questions, &self.responses),
        );

        match self
            .send_dialogue(DialogueAction::Respond, candidate.clone(), progress)
            .await
        {
            Ok(turn) => {
                self.history = candidate;
                self.rounds_completed += 1;
                self.pending_round = None;
                self.responses.clear();
                debug!("Round {} committed", self.rounds_completed);
                self.handle_turn(turn, progress).await
            }
            Err(err) => {
                // The round's questions are still on screen; return the
                // user to them, with history and answers untouched.
                self.stage = self.stage.apply(IntakeEvent::QuestionsReceived)?;
                Err(err)
            }
        }
    }

    /// Skip the remaining questions and generate the report now.
    ///
    /// Answers recorded this round are folded in first; a round with zero
    /// recorded answers folds nothing, so history never claims questions
    /// were answered.
    pub async fn skip_to_analysis(
        &mut self,
        progress: &dyn IntakeProgressNotifier,
    ) -> Result<(), IntakeError> {
        let round = self
            .pending_round
            .clone()
            .ok_or_else(|| DomainError::InvalidStage(self.stage.display_name().to_string()))?;

        self.stage = self.stage.apply(IntakeEvent::DetailedRequested)?;

        let mut candidate = self.history.clone();
        if !self.responses.is_empty() {
            candidate.push_round(
                format_question_block(&round.message, &round.questions),
                format_round(&round.questions, &self.responses),
            );
        }

        match self
            .send_dialogue(DialogueAction::Generate, candidate.clone(), progress)
            .await
        {
            Ok(turn) => {
                self.history = candidate;
                self.pending_round = None;
                self.responses.clear();
                self.install_report(turn)
            }
            Err(err) => {
                self.stage = self.stage.apply(IntakeEvent::QuestionsReceived)?;
                Err(err)
            }
        }
    }

    /// Return from the detailed report to the result view.
    pub fn return_to_summary(&mut self) -> Result<(), IntakeError> {
        self.stage = self.stage.apply(IntakeEvent::BackToSummary)?;
        Ok(())
    }

    // ==================== Internals ====================

    async fn handle_turn(
        &mut self,
        turn: DialogueTurn,
        progress: &dyn IntakeProgressNotifier,
    ) -> Result<(), IntakeError> {
        match turn {
            DialogueTurn::FollowUp { message, questions }
                if self.rounds_completed < MAX_FOLLOW_UP_ROUNDS =>
            {
                self.pending_round = Some(PendingRound { message, questions });
                self.responses.clear();
                self.stage = self.stage.apply(IntakeEvent::QuestionsReceived)?;
                Ok(())
            }
            DialogueTurn::FollowUp { .. } => {
                // Round cap reached; generate regardless of the gateway's
                // preference to keep asking
                info!(
                    "Follow-up round cap ({}) reached, forcing generation",
                    MAX_FOLLOW_UP_ROUNDS
                );
                self.generate(progress).await
            }
            DialogueTurn::AnalysisReady { message } => {
                debug!("Gateway ready to generate: {}", message);
                self.generate(progress).await
            }
            DialogueTurn::DetailedAnalysis(report) => {
                self.install_report(DialogueTurn::DetailedAnalysis(report))
            }
        }
    }

    async fn generate(
        &mut self,
        progress: &dyn IntakeProgressNotifier,
    ) -> Result<(), IntakeError> {
        match self
            .send_dialogue(DialogueAction::Generate, self.history.clone(), progress)
            .await
        {
            Ok(turn) => self.install_report(turn),
            Err(err) => {
                self.stage = self.stage.apply(IntakeEvent::RequestFailed)?;
                Err(err)
            }
        }
    }

    fn install_report(&mut self, turn: DialogueTurn) -> Result<(), IntakeError> {
        let report = match turn {
            DialogueTurn::DetailedAnalysis(report) => report,
            // A generate call must produce a report; anything else degrades
            _ => DetailedAnalysis::fallback(),
        };
        self.conversation_logger.log(ConversationEvent::new(
            "detailed_analysis",
            serde_json::json!({
                "case_title": report.case_title,
                "rounds": self.rounds_completed,
            }),
        ));
        self.report = Some(report);
        self.stage = self.stage.apply(IntakeEvent::ReportReady)?;
        Ok(())
    }

    async fn send_dialogue(
        &self,
        action: DialogueAction,
        history: ConversationHistory,
        progress: &dyn IntakeProgressNotifier,
    ) -> Result<DialogueTurn, IntakeError> {
        let case_description = self
            .description
            .clone()
            .ok_or_else(|| DomainError::InvalidStage(self.stage.display_name().to_string()))?;
        let initial_analysis = self
            .analysis
            .clone()
            .ok_or_else(|| DomainError::InvalidStage(self.stage.display_name().to_string()))?;

        let request = DialogueRequest {
            case_description,
            initial_analysis,
            history,
            action,
        };

        progress.on_request_start(action.as_str());
        let result = self.gateway.dialogue(request).await;
        progress.on_request_end(action.as_str());

        match result {
            Ok(turn) => {
                self.conversation_logger.log(ConversationEvent::new(
                    "dialogue_turn",
                    serde_json::json!({
                        "action": action.as_str(),
                        "turn": turn_type(&turn),
                        "round": self.rounds_completed,
                    }),
                ));
                Ok(turn)
            }
            Err(err) => {
                warn!("Dialogue call '{}' failed: {}", action, err);
                self.log_gateway_error(action.as_str(), &err);
                Err(err.into())
            }
        }
    }

    fn log_gateway_error(&self, action: &str, err: &GatewayError) {
        self.conversation_logger.log(ConversationEvent::new(
            "gateway_error",
            serde_json::json!({
                "action": action,
                "error": err.to_string(),
            }),
        ));
    }
}

fn turn_type(turn: &DialogueTurn) -> &'static str {
    match turn {
        DialogueTurn::FollowUp { .. } => "follow_up",
        DialogueTurn::AnalysisReady { .. } => "analysis_ready",
        DialogueTurn::DetailedAnalysis(_) => "detailed_analysis",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::intake_progress::NoIntakeProgress;
    use async_trait::async_trait;
    use nyay_domain::QuestionKind;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MockGateway {
        classify_results: Mutex<VecDeque<Result<InitialAnalysis, GatewayError>>>,
        dialogue_results: Mutex<VecDeque<Result<DialogueTurn, GatewayError>>>,
        dialogue_calls: Mutex<Vec<(DialogueAction, usize)>>,
    }

    impl MockGateway {
        fn new() -> Self {
            Self::default()
        }

        fn queue_classify(&self, result: Result<InitialAnalysis, GatewayError>) {
            self.classify_results.lock().unwrap().push_back(result);
        }

        fn queue_dialogue(&self, result: Result<DialogueTurn, GatewayError>) {
            self.dialogue_results.lock().unwrap().push_back(result);
        }

        /// (action, history length) per dialogue call, in order
        fn dialogue_calls(&self) -> Vec<(DialogueAction, usize)> {
            self.dialogue_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InferenceGateway for MockGateway {
        async fn classify(
            &self,
            _description: &CaseDescription,
        ) -> Result<InitialAnalysis, GatewayError> {
            self.classify_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("No more classify responses queued"))
        }

        async fn dialogue(
            &self,
            request: DialogueRequest,
        ) -> Result<DialogueTurn, GatewayError> {
            self.dialogue_calls
                .lock()
                .unwrap()
                .push((request.action, request.history.len()));
            self.dialogue_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("No more dialogue responses queued"))
        }
    }

    fn consumer_analysis() -> InitialAnalysis {
        InitialAnalysis {
            case_type: "Consumer Dispute".to_string(),
            summary: "Airline refused a refund for a cancelled flight.".to_string(),
            is_consumer_case: true,
            ..InitialAnalysis::fallback()
        }
    }

    fn general_analysis() -> InitialAnalysis {
        InitialAnalysis {
            case_type: "Tenancy Dispute".to_string(),
            summary: "Landlord withholding a security deposit.".to_string(),
            is_consumer_case: false,
            ..InitialAnalysis::fallback()
        }
    }

    fn question_round(ids: &[&str]) -> DialogueTurn {
        DialogueTurn::FollowUp {
            message: "A few more details:".to_string(),
            questions: ids
                .iter()
                .map(|id| SmartQuestion {
                    id: id.to_string(),
                    question: format!("Question {}", id),
                    kind: QuestionKind::Text,
                    required: true,
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn report_turn(title: &str) -> DialogueTurn {
        DialogueTurn::DetailedAnalysis(DetailedAnalysis {
            case_title: title.to_string(),
            executive_summary: "Strong claim.".to_string(),
            ..Default::default()
        })
    }

    const FLIGHT_CASE: &str =
        "My flight was cancelled and the airline refuses a refund of ₹8000 paid on 2024-01-10";

    async fn session_at_result(gateway: Arc<MockGateway>) -> IntakeSession {
        gateway.queue_classify(Ok(general_analysis()));
        let mut session = IntakeSession::new(gateway);
        session
            .submit_description(FLIGHT_CASE, &NoIntakeProgress)
            .await
            .unwrap();
        assert_eq!(session.stage(), IntakeStage::Result);
        session
    }

    // ==================== Classification ====================

    #[tokio::test]
    async fn test_consumer_case_branches_to_consumer_check() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_classify(Ok(consumer_analysis()));
        let mut session = IntakeSession::new(gateway);

        session
            .submit_description(FLIGHT_CASE, &NoIntakeProgress)
            .await
            .unwrap();

        assert_eq!(session.stage(), IntakeStage::ConsumerCheck);
        assert!(session.analysis().unwrap().is_consumer_case);
    }

    #[tokio::test]
    async fn test_non_consumer_case_goes_straight_to_result() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_classify(Ok(general_analysis()));
        let mut session = IntakeSession::new(gateway);

        session
            .submit_description("Landlord kept my deposit", &NoIntakeProgress)
            .await
            .unwrap();

        assert_eq!(session.stage(), IntakeStage::Result);
    }

    #[tokio::test]
    async fn test_empty_description_is_blocked_before_any_call() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = IntakeSession::new(gateway);

        let result = session.submit_description("   ", &NoIntakeProgress).await;

        assert!(matches!(
            result,
            Err(IntakeError::Domain(DomainError::EmptyDescription))
        ));
        assert_eq!(session.stage(), IntakeStage::Input);
    }

    #[tokio::test]
    async fn test_classification_failure_reverts_to_input() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_classify(Err(GatewayError::Connection("timeout".to_string())));
        gateway.queue_classify(Ok(general_analysis()));
        let mut session = IntakeSession::new(gateway);

        let result = session
            .submit_description(FLIGHT_CASE, &NoIntakeProgress)
            .await;
        assert!(result.is_err());
        assert_eq!(session.stage(), IntakeStage::Input);
        assert!(session.analysis().is_none());

        // Manual retry works from the reverted stage
        session
            .submit_description(FLIGHT_CASE, &NoIntakeProgress)
            .await
            .unwrap();
        assert_eq!(session.stage(), IntakeStage::Result);
    }

    #[tokio::test]
    async fn test_rate_limit_is_distinguished() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_classify(Err(GatewayError::RateLimited));
        let mut session = IntakeSession::new(gateway);

        let err = session
            .submit_description(FLIGHT_CASE, &NoIntakeProgress)
            .await
            .unwrap_err();

        assert!(err.is_distinguished());
        let generic = IntakeError::Gateway(GatewayError::RequestFailed("500".to_string()));
        assert!(!generic.is_distinguished());
    }

    // ==================== Consumer sub-flow ====================

    #[tokio::test]
    async fn test_consumer_sub_flow_lawyer_path() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_classify(Ok(consumer_analysis()));
        let mut session = IntakeSession::new(gateway.clone());

        session
            .submit_description(FLIGHT_CASE, &NoIntakeProgress)
            .await
            .unwrap();
        session
            .record_helpline_status(HelplineStatus::NotRegistered)
            .unwrap();
        assert_eq!(session.stage(), IntakeStage::ProceedChoice);

        session.choose_path(ResolutionPath::LawyerAssisted).unwrap();
        assert_eq!(session.stage(), IntakeStage::Result);
        assert_eq!(
            session.resolution_path(),
            Some(ResolutionPath::LawyerAssisted)
        );
        // The sub-flow is purely local
        assert!(gateway.dialogue_calls().is_empty());
    }

    #[tokio::test]
    async fn test_consumer_sub_flow_self_file_path() {
        let gateway = Arc::new(MockGateway::new());
        gateway.queue_classify(Ok(consumer_analysis()));
        let mut session = IntakeSession::new(gateway);

        session
            .submit_description(FLIGHT_CASE, &NoIntakeProgress)
            .await
            .unwrap();
        session
            .record_helpline_status(HelplineStatus::registered("NCH-2024-12345"))
            .unwrap();
        session.choose_path(ResolutionPath::SelfFile).unwrap();

        assert_eq!(session.resolution_path(), Some(ResolutionPath::SelfFile));
        assert!(session.helpline_status().unwrap().is_registered());
    }

    // ==================== Detailed dialogue ====================

    #[tokio::test]
    async fn test_begin_detailed_installs_questions() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session_at_result(gateway.clone()).await;
        gateway.queue_dialogue(Ok(question_round(&["q1", "q2"])));

        session.begin_detailed(&NoIntakeProgress).await.unwrap();

        assert_eq!(session.stage(), IntakeStage::DetailedFollowUp);
        assert_eq!(session.current_round().unwrap().questions.len(), 2);
        assert_eq!(session.round_number(), 1);
        assert_eq!(
            gateway.dialogue_calls(),
            vec![(DialogueAction::Start, 0)]
        );
    }

    #[tokio::test]
    async fn test_analysis_ready_on_start_generates_immediately() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session_at_result(gateway.clone()).await;
        gateway.queue_dialogue(Ok(DialogueTurn::AnalysisReady {
            message: "Ready.".to_string(),
        }));
        gateway.queue_dialogue(Ok(report_turn("Tenancy Deposit Claim")));

        session.begin_detailed(&NoIntakeProgress).await.unwrap();

        assert_eq!(session.stage(), IntakeStage::DetailedResult);
        assert_eq!(session.report().unwrap().case_title, "Tenancy Deposit Claim");
        assert_eq!(
            gateway.dialogue_calls(),
            vec![(DialogueAction::Start, 0), (DialogueAction::Generate, 0)]
        );
    }

    #[tokio::test]
    async fn test_round_commits_after_success_only() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session_at_result(gateway.clone()).await;
        gateway.queue_dialogue(Ok(question_round(&["q1"])));
        session.begin_detailed(&NoIntakeProgress).await.unwrap();

        session
            .record_answer("q1", Answer::Text("On 2024-01-10".to_string()))
            .unwrap();

        // First submit fails; history must stay untouched, questions stay on screen
        gateway.queue_dialogue(Err(GatewayError::Connection("reset".to_string())));
        let err = session.submit_answers(&NoIntakeProgress).await.unwrap_err();
        assert!(!err.is_distinguished());
        assert_eq!(session.stage(), IntakeStage::DetailedFollowUp);
        assert!(session.history().is_empty());
        assert_eq!(session.rounds_completed(), 0);
        assert!(session.current_round().is_some());

        // Resubmit sees identical state and succeeds
        gateway.queue_dialogue(Ok(DialogueTurn::AnalysisReady {
            message: "Ready.".to_string(),
        }));
        gateway.queue_dialogue(Ok(report_turn("Report")));
        session.submit_answers(&NoIntakeProgress).await.unwrap();

        assert_eq!(session.rounds_completed(), 1);
        // One assistant + one user entry for the committed round
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.stage(), IntakeStage::DetailedResult);
    }

    #[tokio::test]
    async fn test_missing_required_answer_blocks_submit() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session_at_result(gateway.clone()).await;
        gateway.queue_dialogue(Ok(question_round(&["q1", "q2"])));
        session.begin_detailed(&NoIntakeProgress).await.unwrap();

        session
            .record_answer("q1", Answer::Text("answered".to_string()))
            .unwrap();

        let err = session.submit_answers(&NoIntakeProgress).await.unwrap_err();
        assert!(matches!(
            err,
            IntakeError::Domain(DomainError::UnansweredQuestion(ref id)) if id == "q2"
        ));
        assert_eq!(session.stage(), IntakeStage::DetailedFollowUp);
        // Validation failures never reach the gateway
        assert_eq!(gateway.dialogue_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_round_cap_forces_generation() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session_at_result(gateway.clone()).await;

        // Gateway insists on more questions forever
        gateway.queue_dialogue(Ok(question_round(&["q1"])));
        session.begin_detailed(&NoIntakeProgress).await.unwrap();

        for round in 1..=MAX_FOLLOW_UP_ROUNDS {
            let next_id = format!("q{}", round + 1);
            gateway.queue_dialogue(Ok(question_round(&[next_id.as_str()])));
            if round == MAX_FOLLOW_UP_ROUNDS {
                // The cap overrides the gateway's follow_up with a generate
                gateway.queue_dialogue(Ok(report_turn("Capped Report")));
            }
            let question_id = session.current_round().unwrap().questions[0].id.clone();
            session
                .record_answer(question_id, Answer::Text("answer".to_string()))
                .unwrap();
            session.submit_answers(&NoIntakeProgress).await.unwrap();
        }

        assert_eq!(session.rounds_completed(), MAX_FOLLOW_UP_ROUNDS);
        assert_eq!(session.stage(), IntakeStage::DetailedResult);

        let actions: Vec<DialogueAction> =
            gateway.dialogue_calls().iter().map(|(a, _)| *a).collect();
        assert_eq!(actions[0], DialogueAction::Start);
        assert_eq!(*actions.last().unwrap(), DialogueAction::Generate);
        let responds = actions
            .iter()
            .filter(|a| **a == DialogueAction::Respond)
            .count();
        assert_eq!(responds, MAX_FOLLOW_UP_ROUNDS);
    }

    #[tokio::test]
    async fn test_skip_with_no_answers_folds_nothing() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session_at_result(gateway.clone()).await;
        gateway.queue_dialogue(Ok(question_round(&["q1", "q2"])));
        session.begin_detailed(&NoIntakeProgress).await.unwrap();

        gateway.queue_dialogue(Ok(report_turn("Skipped Report")));
        session.skip_to_analysis(&NoIntakeProgress).await.unwrap();

        assert_eq!(session.stage(), IntakeStage::DetailedResult);
        // Nothing was answered, so nothing was folded into history
        assert!(session.history().is_empty());
        // The generate request also carried the empty history
        assert_eq!(
            gateway.dialogue_calls(),
            vec![(DialogueAction::Start, 0), (DialogueAction::Generate, 0)]
        );
    }

    #[tokio::test]
    async fn test_skip_with_partial_answers_folds_them() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session_at_result(gateway.clone()).await;
        gateway.queue_dialogue(Ok(question_round(&["q1", "q2"])));
        session.begin_detailed(&NoIntakeProgress).await.unwrap();

        session
            .record_answer("q1", Answer::Text("partial".to_string()))
            .unwrap();
        gateway.queue_dialogue(Ok(report_turn("Partial Report")));
        session.skip_to_analysis(&NoIntakeProgress).await.unwrap();

        assert_eq!(session.history().len(), 2);
        let (action, history_len) = gateway.dialogue_calls()[1];
        assert_eq!(action, DialogueAction::Generate);
        assert_eq!(history_len, 2);
    }

    #[tokio::test]
    async fn test_generate_turn_that_is_not_a_report_falls_back() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session_at_result(gateway.clone()).await;
        gateway.queue_dialogue(Ok(DialogueTurn::AnalysisReady {
            message: "Ready.".to_string(),
        }));
        // Gateway misbehaves and answers generate with analysis_ready again
        gateway.queue_dialogue(Ok(DialogueTurn::AnalysisReady {
            message: "Still ready.".to_string(),
        }));

        session.begin_detailed(&NoIntakeProgress).await.unwrap();

        assert_eq!(session.stage(), IntakeStage::DetailedResult);
        assert_eq!(session.report().unwrap().case_title, "Legal Case Assessment");
    }

    #[tokio::test]
    async fn test_return_to_summary() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session_at_result(gateway.clone()).await;
        gateway.queue_dialogue(Ok(DialogueTurn::AnalysisReady {
            message: "Ready.".to_string(),
        }));
        gateway.queue_dialogue(Ok(report_turn("Report")));
        session.begin_detailed(&NoIntakeProgress).await.unwrap();

        session.return_to_summary().unwrap();
        assert_eq!(session.stage(), IntakeStage::Result);
        // The report remains available after going back
        assert!(session.report().is_some());
    }

    #[tokio::test]
    async fn test_start_failure_reverts_to_result() {
        let gateway = Arc::new(MockGateway::new());
        let mut session = session_at_result(gateway.clone()).await;
        gateway.queue_dialogue(Err(GatewayError::QuotaExhausted));

        let err = session.begin_detailed(&NoIntakeProgress).await.unwrap_err();

        assert!(err.is_distinguished());
        assert_eq!(session.stage(), IntakeStage::Result);
        assert!(session.report().is_none());
    }
}
