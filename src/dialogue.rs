//! Triage dialogue module for holding per-chat conversation state.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::actions::Coordinates;

/// Where the chat currently is in the triage flow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    AwaitingProblem,
    AwaitingUrgency,
    AwaitingLocation,
    AwaitingAddress,
}

/// Conversation state stored per chat
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageSession {
    pub stage: Stage,
    pub problem: Option<String>,
    pub severe: Option<bool>,
    pub coordinates: Option<Coordinates>,
    pub address: Option<String>,
}

impl TriageSession {
    /// Urgency that was never chosen counts as mild
    pub fn is_severe(&self) -> bool {
        self.severe.unwrap_or(false)
    }

    pub fn has_problem(&self) -> bool {
        self.problem.as_deref().is_some_and(|p| !p.trim().is_empty())
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }
}

/// Type alias for our triage dialogue
pub type TriageDialogue = Dialogue<TriageSession, InMemStorage<TriageSession>>;

/// Longest complaint we store; it is echoed back in prompts and results
pub const MAX_PROBLEM_CHARS: usize = 500;

/// Longest manual address we store
pub const MAX_ADDRESS_CHARS: usize = 200;

fn validate_text(text: &str, max_chars: usize) -> Result<String, &'static str> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err("empty");
    }

    if trimmed.chars().count() > max_chars {
        return Err("too_long");
    }

    Ok(trimmed.to_string())
}

/// Validates a complaint description
pub fn validate_problem(text: &str) -> Result<String, &'static str> {
    validate_text(text, MAX_PROBLEM_CHARS)
}

/// Validates a manually entered address
pub fn validate_address(text: &str) -> Result<String, &'static str> {
    validate_text(text, MAX_ADDRESS_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_waits_for_problem() {
        let session = TriageSession::default();
        assert_eq!(session.stage, Stage::AwaitingProblem);
        assert!(!session.has_problem());
        assert!(!session.is_severe());
    }

    #[test]
    fn test_problem_validation() {
        assert_eq!(validate_problem("  болит живот "), Ok("болит живот".to_string()));
        assert!(validate_problem("   ").is_err());
        assert_eq!(validate_problem(&"а".repeat(MAX_PROBLEM_CHARS + 1)), Err("too_long"));
        // limit counts characters, not bytes
        assert!(validate_problem(&"а".repeat(MAX_PROBLEM_CHARS)).is_ok());
    }

    #[test]
    fn test_address_validation() {
        assert_eq!(validate_address(" Graudu iela 1 "), Ok("Graudu iela 1".to_string()));
        assert_eq!(validate_address(&"a".repeat(MAX_ADDRESS_CHARS + 1)), Err("too_long"));
        assert_eq!(validate_address(""), Err("empty"));
    }
}
