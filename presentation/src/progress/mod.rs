//! Progress reporting

pub mod spinner;

pub use spinner::IntakeSpinner;
