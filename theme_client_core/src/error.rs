//! Error types for the theme client core library
//!
//! Every fatal condition of the workflow is a variant of [`Error`]. Nothing
//! in this crate terminates the process; the caller decides how to report
//! an error and which exit code to use.

use crate::commands::CommandError;
use crate::config::ConfigError;
use crate::safety::SafetyViolation;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the theme client core library
#[derive(Error, Debug)]
pub enum Error {
    /// Credentials file missing, unparsable or incomplete
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The theme-listing command failed or printed unusable output
    #[error("Failed to fetch themes: {0}")]
    Fetch(#[source] CommandError),

    /// The fetched set does not contain exactly one live theme
    #[error("{}", no_live_message(.found))]
    NoLiveTheme { found: usize },

    /// Every fetched theme is live; nothing can be developed against
    #[error("No development themes found")]
    NoEligibleThemes,

    /// The selected theme failed the safety gate
    #[error(transparent)]
    Safety(#[from] SafetyViolation),

    /// The dev server exited abnormally (not through an interrupt)
    #[error("Dev server error: {0}")]
    Server(#[source] CommandError),

    /// Pushing to the selected theme failed
    #[error("Theme push failed: {0}")]
    Push(#[source] CommandError),

    /// The interactive prompt could not be shown or read
    #[error("Prompt failed: {0}")]
    Prompt(#[from] PromptError),
}

fn no_live_message(found: &usize) -> String {
    if *found == 0 {
        "Could not identify live theme".to_string()
    } else {
        format!("Could not identify live theme: {found} themes report role \"live\"")
    }
}

/// Failure of the prompt capability itself (not a user cancellation)
#[derive(Error, Debug)]
#[error("{message}")]
pub struct PromptError {
    message: String,
    #[source]
    source: Option<std::io::Error>,
}

impl PromptError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn from_io(error: std::io::Error) -> Self {
        Self {
            message: error.to_string(),
            source: Some(error),
        }
    }
}
