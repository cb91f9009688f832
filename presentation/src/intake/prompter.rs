//! Terminal widgets for the intake dialogue
//!
//! Each [`QuestionKind`] maps to a specific input widget: confirm for
//! yes/no, select for multiple choice and the 1-5 scale, free input for
//! date, amount and text. Required questions cannot be skipped; optional
//! ones always offer a skip.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use nyay_domain::{
    Answer, HelplineStatus, Language, QuestionKind, ResolutionPath, SmartQuestion, UiSettings,
    translate,
};

/// What the user decided to do with the current round.
pub enum RoundOutcome {
    /// Answers recorded per question id, in question order
    Answered(Vec<(String, Answer)>),
    /// Jump straight to report generation
    SkipToAnalysis,
}

/// Build the five items shown for a scale question, using the gateway's
/// end labels when present.
pub fn scale_items(question: &SmartQuestion) -> Vec<String> {
    (1..=5u8)
        .map(|value| {
            let label = question.scale_labels.as_ref().and_then(|labels| match value {
                1 => Some(labels.min.as_str()).filter(|s| !s.is_empty()),
                5 => Some(labels.max.as_str()).filter(|s| !s.is_empty()),
                _ => None,
            });
            match label {
                Some(label) => format!("{} ({})", value, label),
                None => value.to_string(),
            }
        })
        .collect()
}

/// Interactive prompter for the intake flow.
pub struct IntakePrompter {
    settings: UiSettings,
    theme: ColorfulTheme,
}

impl IntakePrompter {
    pub fn new(settings: UiSettings) -> Self {
        Self {
            settings,
            theme: ColorfulTheme::default(),
        }
    }

    fn lang(&self) -> Language {
        self.settings.language
    }

    /// Prompt for the case description (re-prompts while empty).
    pub fn ask_description(&self) -> dialoguer::Result<String> {
        Input::with_theme(&self.theme)
            .with_prompt("Describe your legal problem")
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err("Please describe your problem")
                } else {
                    Ok(())
                }
            })
            .interact_text()
    }

    /// Consumer sub-flow: existing helpline complaint?
    pub fn ask_helpline_status(&self) -> dialoguer::Result<HelplineStatus> {
        let registered = Confirm::with_theme(&self.theme)
            .with_prompt(translate(self.lang(), "helpline_question"))
            .default(false)
            .interact()?;

        if !registered {
            return Ok(HelplineStatus::NotRegistered);
        }

        let complaint_id: String = Input::with_theme(&self.theme)
            .with_prompt("Helpline complaint id")
            .allow_empty(true)
            .interact_text()?;
        Ok(HelplineStatus::registered(complaint_id))
    }

    /// Consumer sub-flow: self-file or lawyer-assisted?
    pub fn ask_resolution_path(&self) -> dialoguer::Result<ResolutionPath> {
        let paths = [ResolutionPath::SelfFile, ResolutionPath::LawyerAssisted];
        let index = Select::with_theme(&self.theme)
            .with_prompt(translate(self.lang(), "path_question"))
            .items(&paths.map(|p| p.display_name()))
            .default(0)
            .interact()?;
        Ok(paths[index])
    }

    /// Offer the optional detailed analysis.
    pub fn confirm_detailed(&self) -> dialoguer::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt("Run a detailed analysis with a few clarifying questions?")
            .default(true)
            .interact()
    }

    /// Offer a retry after a failed gateway call.
    pub fn confirm_retry(&self) -> dialoguer::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt("Try again?")
            .default(true)
            .interact()
    }

    /// Run one round of clarifying questions.
    pub fn ask_round(
        &self,
        message: &str,
        questions: &[SmartQuestion],
        round_number: usize,
        max_rounds: usize,
    ) -> dialoguer::Result<RoundOutcome> {
        println!();
        println!("Round {}/{}: {}", round_number, max_rounds, message);

        let action = Select::with_theme(&self.theme)
            .items(&["Answer the questions", "Skip to the analysis"])
            .default(0)
            .interact()?;
        if action == 1 {
            return Ok(RoundOutcome::SkipToAnalysis);
        }

        let mut answers = Vec::new();
        for question in questions {
            if let Some(answer) = self.ask_question(question)? {
                answers.push((question.id.clone(), answer));
            }
        }
        Ok(RoundOutcome::Answered(answers))
    }

    fn ask_question(&self, question: &SmartQuestion) -> dialoguer::Result<Option<Answer>> {
        match question.kind {
            QuestionKind::YesNo => self.ask_yes_no(question),
            QuestionKind::MultipleChoice => self.ask_choice(question),
            QuestionKind::Scale => self.ask_scale(question),
            QuestionKind::Date => self.ask_input(question, "YYYY-MM-DD", Answer::Date),
            QuestionKind::Amount => self.ask_input(question, "amount in INR", Answer::Amount),
            QuestionKind::Text => self.ask_input(question, "", Answer::Text),
        }
    }

    fn ask_yes_no(&self, question: &SmartQuestion) -> dialoguer::Result<Option<Answer>> {
        if question.required {
            let value = Confirm::with_theme(&self.theme)
                .with_prompt(&question.question)
                .interact()?;
            return Ok(Some(Answer::YesNo(value)));
        }
        let index = Select::with_theme(&self.theme)
            .with_prompt(&question.question)
            .items(&["Yes", "No", "Skip"])
            .default(0)
            .interact()?;
        Ok(match index {
            0 => Some(Answer::YesNo(true)),
            1 => Some(Answer::YesNo(false)),
            _ => None,
        })
    }

    fn ask_choice(&self, question: &SmartQuestion) -> dialoguer::Result<Option<Answer>> {
        let mut items: Vec<&str> = question.options.iter().map(String::as_str).collect();
        if items.is_empty() {
            // A choice question without options degrades to free text
            return self.ask_input(question, "", Answer::Choice);
        }
        if !question.required {
            items.push("Skip");
        }
        let index = Select::with_theme(&self.theme)
            .with_prompt(&question.question)
            .items(&items)
            .default(0)
            .interact()?;
        if !question.required && index == items.len() - 1 {
            return Ok(None);
        }
        Ok(Some(Answer::Choice(question.options[index].clone())))
    }

    fn ask_scale(&self, question: &SmartQuestion) -> dialoguer::Result<Option<Answer>> {
        let items = scale_items(question);
        let index = Select::with_theme(&self.theme)
            .with_prompt(&question.question)
            .items(&items)
            .default(2)
            .interact()?;
        Ok(Some(Answer::scale(index as u8 + 1)))
    }

    fn ask_input(
        &self,
        question: &SmartQuestion,
        hint: &str,
        wrap: fn(String) -> Answer,
    ) -> dialoguer::Result<Option<Answer>> {
        let prompt = if hint.is_empty() {
            question.question.clone()
        } else {
            format!("{} ({})", question.question, hint)
        };
        let required = question.required;
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(!required)
            .validate_with(move |input: &String| {
                if required && input.trim().is_empty() {
                    Err("This question is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        if value.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(wrap(value)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyay_domain::ScaleLabels;

    #[test]
    fn test_scale_items_with_labels() {
        let question = SmartQuestion {
            id: "q1".to_string(),
            question: "How urgent is this?".to_string(),
            kind: QuestionKind::Scale,
            scale_labels: Some(ScaleLabels {
                min: "Not urgent".to_string(),
                max: "Very urgent".to_string(),
            }),
            ..Default::default()
        };
        let items = scale_items(&question);
        assert_eq!(items.len(), 5);
        assert_eq!(items[0], "1 (Not urgent)");
        assert_eq!(items[2], "3");
        assert_eq!(items[4], "5 (Very urgent)");
    }

    #[test]
    fn test_scale_items_without_labels() {
        let question = SmartQuestion {
            id: "q1".to_string(),
            question: "Rate the impact".to_string(),
            kind: QuestionKind::Scale,
            ..Default::default()
        };
        assert_eq!(scale_items(&question), vec!["1", "2", "3", "4", "5"]);
    }
}
