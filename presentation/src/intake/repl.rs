//! Interactive driver for a full intake session

use crate::intake::prompter::{IntakePrompter, RoundOutcome};
use crate::output::ConsoleFormatter;
use crate::progress::IntakeSpinner;
use colored::Colorize;
use nyay_application::ports::conversation_logger::ConversationLogger;
use nyay_application::ports::inference_gateway::InferenceGateway;
use nyay_application::ports::intake_progress::{IntakeProgressNotifier, NoIntakeProgress};
use nyay_application::{IntakeError, IntakeSession};
use nyay_domain::{IntakeStage, MAX_FOLLOW_UP_ROUNDS, UiSettings};
use std::sync::Arc;

/// Interactive intake session: description, consumer sub-flow, question
/// rounds, final report.
pub struct IntakeRepl {
    session: IntakeSession,
    prompter: IntakePrompter,
    spinner: IntakeSpinner,
    settings: UiSettings,
    show_progress: bool,
    offer_detailed: bool,
}

impl IntakeRepl {
    pub fn new(gateway: Arc<dyn InferenceGateway>, settings: UiSettings) -> Self {
        Self {
            session: IntakeSession::new(gateway),
            prompter: IntakePrompter::new(settings),
            spinner: IntakeSpinner::new(),
            settings,
            show_progress: true,
            offer_detailed: true,
        }
    }

    /// Set whether to show the progress spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set whether to offer the detailed clarifying dialogue
    pub fn with_detailed(mut self, offer: bool) -> Self {
        self.offer_detailed = offer;
        self
    }

    /// Attach a conversation logger to the session
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.session = self.session.with_conversation_logger(logger);
        self
    }

    /// Run the interactive intake flow to completion.
    pub async fn run(&mut self) -> dialoguer::Result<()> {
        let progress: &dyn IntakeProgressNotifier = if self.show_progress {
            &self.spinner
        } else {
            &NoIntakeProgress
        };

        self.print_welcome();

        // Description + classification, retried on demand
        loop {
            let text = self.prompter.ask_description()?;
            match self.session.submit_description(&text, progress).await {
                Ok(()) => break,
                Err(err) => {
                    Self::print_error(&err);
                    if !self.prompter.confirm_retry()? {
                        return Ok(());
                    }
                }
            }
        }

        // Consumer sub-flow (purely local)
        if self.session.stage() == IntakeStage::ConsumerCheck {
            let status = self.prompter.ask_helpline_status()?;
            let _ = self.session.record_helpline_status(status);
            let path = self.prompter.ask_resolution_path()?;
            let _ = self.session.choose_path(path);
        }

        if let Some(analysis) = self.session.analysis() {
            println!();
            println!(
                "{}",
                ConsoleFormatter::format_initial(
                    analysis,
                    self.session.resolution_path(),
                    &self.settings
                )
            );
        }

        if !self.offer_detailed || !self.prompter.confirm_detailed()? {
            return Ok(());
        }

        loop {
            match self.session.begin_detailed(progress).await {
                Ok(()) => break,
                Err(err) => {
                    Self::print_error(&err);
                    if !self.prompter.confirm_retry()? {
                        return Ok(());
                    }
                }
            }
        }

        while self.session.stage() == IntakeStage::DetailedFollowUp {
            let Some(round) = self.session.current_round() else {
                break;
            };
            let message = round.message.clone();
            let questions = round.questions.clone();

            let outcome = self.prompter.ask_round(
                &message,
                &questions,
                self.session.round_number(),
                MAX_FOLLOW_UP_ROUNDS,
            )?;

            let result = match outcome {
                RoundOutcome::Answered(answers) => {
                    for (id, answer) in answers {
                        let _ = self.session.record_answer(id, answer);
                    }
                    self.session.submit_answers(progress).await
                }
                RoundOutcome::SkipToAnalysis => self.session.skip_to_analysis(progress).await,
            };

            if let Err(err) = result {
                Self::print_error(&err);
                if !self.prompter.confirm_retry()? {
                    break;
                }
            }
        }

        if let Some(report) = self.session.report() {
            println!();
            println!("{}", ConsoleFormatter::format_detailed(report, &self.settings));
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("+--------------------------------------------+");
        println!("|        NyayBuddy - Case Intake             |");
        println!("+--------------------------------------------+");
        println!();
    }

    /// Rate-limit and quota errors carry their own message; everything
    /// else gets the generic "try again" notice.
    fn print_error(err: &IntakeError) {
        if err.is_distinguished() {
            eprintln!("{}", err.to_string().yellow());
        } else {
            eprintln!(
                "{}",
                "Something went wrong while contacting the assistant. Please try again."
                    .yellow()
            );
            tracing::debug!("Intake error: {}", err);
        }
    }
}
