//! Case description value object

use serde::{Deserialize, Serialize};

/// The free-text problem description provided by the user (Value Object)
///
/// Captured once at the start of an intake session and immutable for the
/// rest of it. Every later gateway call carries it as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDescription {
    content: String,
}

impl CaseDescription {
    /// Create a new case description
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(
            !content.trim().is_empty(),
            "Case description cannot be empty"
        );
        Self { content }
    }

    /// Try to create a new case description, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the description content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for CaseDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for CaseDescription {
    fn from(s: &str) -> Self {
        CaseDescription::new(s)
    }
}

impl From<String> for CaseDescription {
    fn from(s: String) -> Self {
        CaseDescription::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_creation() {
        let d = CaseDescription::new("My landlord will not return my deposit");
        assert_eq!(d.content(), "My landlord will not return my deposit");
    }

    #[test]
    fn test_description_from_str() {
        let d: CaseDescription = "My employer has not paid my salary".into();
        assert_eq!(d.content(), "My employer has not paid my salary");
    }

    #[test]
    #[should_panic]
    fn test_empty_description_panics() {
        CaseDescription::new("");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(CaseDescription::try_new("").is_none());
        assert!(CaseDescription::try_new("   ").is_none());
    }

    #[test]
    fn test_try_new_valid() {
        assert!(CaseDescription::try_new("A consumer dispute").is_some());
    }
}
