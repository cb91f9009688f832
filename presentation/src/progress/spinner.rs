//! Progress spinner shown while a gateway request is outstanding
//!
//! The intake flow blocks input while a request is in flight; the spinner
//! is the only feedback during that window. There is no cancellation;
//! the spinner runs until the request resolves.

use indicatif::{ProgressBar, ProgressStyle};
use nyay_application::ports::intake_progress::IntakeProgressNotifier;
use std::sync::Mutex;
use std::time::Duration;

/// Maps a request purpose to the message shown next to the spinner.
pub fn purpose_message(purpose: &str) -> &'static str {
    match purpose {
        "classify" => "Analyzing your case...",
        "start" | "respond" => "Preparing clarifying questions...",
        "generate" => "Generating your detailed analysis...",
        _ => "Contacting the assistant...",
    }
}

/// Spinner-based progress notifier.
pub struct IntakeSpinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl IntakeSpinner {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for IntakeSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeProgressNotifier for IntakeSpinner {
    fn on_request_start(&self, purpose: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message(purpose_message(purpose));
        bar.enable_steady_tick(Duration::from_millis(100));
        *self.bar.lock().unwrap() = Some(bar);
    }

    fn on_request_end(&self, _purpose: &str) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_messages() {
        assert_eq!(purpose_message("classify"), "Analyzing your case...");
        assert_eq!(
            purpose_message("respond"),
            "Preparing clarifying questions..."
        );
        assert_eq!(
            purpose_message("generate"),
            "Generating your detailed analysis..."
        );
        assert_eq!(purpose_message("anything"), "Contacting the assistant...");
    }

    #[test]
    fn test_start_and_end_do_not_panic_without_tty() {
        let spinner = IntakeSpinner::new();
        spinner.on_request_start("classify");
        spinner.on_request_end("classify");
        assert!(spinner.bar.lock().unwrap().is_none());
    }
}
