//! Prompt templates for the intake flow

pub mod template;

pub use template::PromptTemplate;
