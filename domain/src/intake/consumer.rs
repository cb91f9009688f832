//! Consumer-complaint sub-flow value objects
//!
//! When classification marks a case as a consumer matter, the session asks
//! two purely local questions before showing the result: whether a National
//! Consumer Helpline complaint is already registered, and whether the user
//! wants to self-file or go through a lawyer.

use serde::{Deserialize, Serialize};

/// Whether a National Consumer Helpline complaint already exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HelplineStatus {
    /// Complaint registered; carries the helpline complaint id
    Registered { complaint_id: String },
    NotRegistered,
}

impl HelplineStatus {
    pub fn registered(complaint_id: impl Into<String>) -> Self {
        Self::Registered {
            complaint_id: complaint_id.into(),
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, HelplineStatus::Registered { .. })
    }
}

/// How the user wants to pursue the consumer complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPath {
    /// File on the e-Daakhil portal without representation;
    /// the result view shows the e-filing guide
    SelfFile,
    /// Connect with a lawyer; the result view shows the lawyer CTA
    LawyerAssisted,
}

impl ResolutionPath {
    pub fn display_name(&self) -> &'static str {
        match self {
            ResolutionPath::SelfFile => "File online yourself",
            ResolutionPath::LawyerAssisted => "Proceed with a lawyer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpline_status() {
        let status = HelplineStatus::registered("NCH-2024-12345");
        assert!(status.is_registered());
        assert!(!HelplineStatus::NotRegistered.is_registered());
    }

    #[test]
    fn test_path_serializes_snake_case() {
        let json = serde_json::to_value(ResolutionPath::SelfFile).unwrap();
        assert_eq!(json, "self_file");
    }
}
