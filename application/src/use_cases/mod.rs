//! Use cases for the application layer

pub mod intake_session;

pub use intake_session::{IntakeError, IntakeSession, PendingRound};
