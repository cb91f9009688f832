//! Presentation layer for nyaybuddy
//!
//! This crate contains CLI definitions, output formatters, the progress
//! spinner, and the interactive intake flow.

pub mod cli;
pub mod intake;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use intake::{IntakePrompter, IntakeRepl, RoundOutcome};
pub use output::ConsoleFormatter;
pub use progress::IntakeSpinner;
