//! Interactive intake flow

pub mod prompter;
pub mod repl;

pub use prompter::{IntakePrompter, RoundOutcome};
pub use repl::IntakeRepl;
