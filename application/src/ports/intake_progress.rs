//! Intake progress port
//!
//! [`IntakeProgressNotifier`] is an output port the presentation layer
//! implements to show that a gateway request is outstanding; the UI
//! blocks further input between `on_request_start` and `on_request_end`
//! (there is no cancellation).
//!
//! All methods have default no-op implementations, so implementers only
//! need to override the callbacks they care about.

/// Progress notifier for the intake session.
pub trait IntakeProgressNotifier: Send + Sync {
    /// Called when a gateway request is sent. `purpose` is one of
    /// `"classify"`, `"start"`, `"respond"`, `"generate"`.
    fn on_request_start(&self, _purpose: &str) {}

    /// Called when the outstanding request resolved (success or failure).
    fn on_request_end(&self, _purpose: &str) {}
}

/// No-op implementation for tests and non-interactive runs.
pub struct NoIntakeProgress;

impl IntakeProgressNotifier for NoIntakeProgress {}
