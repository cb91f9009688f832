//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Case description cannot be empty")]
    EmptyDescription,

    #[error("Required question not answered: {0}")]
    UnansweredQuestion(String),

    #[error("Operation not allowed in stage {0}")]
    InvalidStage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::UnansweredQuestion("q3".to_string());
        assert_eq!(error.to_string(), "Required question not answered: q3");
    }
}
