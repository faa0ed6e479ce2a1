//! Non-interactive confirmation.

use tracing::debug;

use firmkit_core::application::ports::{Confirm, ConfirmPrompt};

/// Answers every prompt with the same text.
///
/// The answer is judged like a typed one, so `AutoConfirm::new("y")` accepts
/// creation but declines overwriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoConfirm {
    answer: String,
}

impl AutoConfirm {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }

    /// Accepts every prompt (`--yes`).
    pub fn yes() -> Self {
        Self::new("yes")
    }

    /// Declines every prompt.
    pub fn no() -> Self {
        Self::new("no")
    }
}

impl Confirm for AutoConfirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        let accepted = prompt.kind.accepts(&self.answer);
        debug!(kind = ?prompt.kind, answer = %self.answer, accepted, "Auto-confirm");
        accepted
    }
}
