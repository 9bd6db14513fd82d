//! Interactive prompt capability
//!
//! The workflow never talks to a terminal directly. It asks questions
//! through a [`Prompter`], so tests can script the answers.

use crate::error::PromptError;

/// Result type for prompt operations
pub type PromptResult<T> = std::result::Result<T, PromptError>;

/// Blocking question/answer capability
///
/// `Ok(None)` means the user cancelled the prompt (escape, quit). That is
/// a clean end of the workflow, not an error.
pub trait Prompter: Send + Sync {
    /// Single choice among `items`; returns the chosen index
    fn select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> PromptResult<Option<usize>>;

    /// Yes/no question
    fn confirm(&self, prompt: &str, default: bool) -> PromptResult<Option<bool>>;
}
