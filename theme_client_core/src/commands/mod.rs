//! Boundary to the external theme-management command
//!
//! The workflow only needs four things from the platform: the theme list,
//! a content pull, a push and a dev server. [`ThemeCommands`] is that
//! boundary; [`ShopifyCli`] drives the real `shopify` executable.

pub mod shopify;

pub use shopify::ShopifyCli;

use crate::config::EnvironmentCredentials;
use crate::theme::Theme;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Files synced from the source theme: content only
pub const CONTENT_FILES: &[&str] = &[
    "config/settings_data.json",
    "locales/*",
    "templates/*.json",
    "templates/**/*.json",
];

/// Files that are never part of a content sync
pub const EXCLUDED_FILES: &[&str] = &["config/settings_schema.json"];

/// Failure of an external command invocation
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' failed with {status}{}", stderr_suffix(.stderr))]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected output from '{command}': {source}")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Where a content pull reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullSource {
    /// The live theme, addressed by the `--live` flag
    Live,
    /// A theme addressed by id
    Theme(u64),
}

impl fmt::Display for PullSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PullSource::Live => write!(f, "live theme"),
            PullSource::Theme(id) => write!(f, "theme {id}"),
        }
    }
}

/// How a dev server session ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerExit {
    /// The server exited on its own with success
    Finished,
    /// The user interrupted the session (Ctrl+C)
    Interrupted,
}

/// Operations of the external theme command
#[async_trait]
pub trait ThemeCommands: Send + Sync {
    /// List every theme of the store
    async fn list_themes(
        &self,
        credentials: &EnvironmentCredentials,
    ) -> Result<Vec<Theme>, CommandError>;

    /// Pull [`CONTENT_FILES`] from `source` without deleting local files
    async fn pull_content(
        &self,
        credentials: &EnvironmentCredentials,
        source: PullSource,
    ) -> Result<(), CommandError>;

    /// Push local files to the theme with `theme_id`
    async fn push_theme(
        &self,
        credentials: &EnvironmentCredentials,
        theme_id: u64,
    ) -> Result<(), CommandError>;

    /// Run the dev server against `theme_id` until it stops
    async fn serve(
        &self,
        credentials: &EnvironmentCredentials,
        theme_id: u64,
    ) -> Result<ServerExit, CommandError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_files_never_include_schema() {
        for excluded in EXCLUDED_FILES {
            assert!(!CONTENT_FILES.contains(excluded));
        }
        assert!(CONTENT_FILES.iter().all(|f| !f.contains("settings_schema")));
    }

    #[test]
    fn test_failed_error_message() {
        let error = CommandError::Failed {
            command: "shopify theme pull".to_string(),
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        };
        assert_eq!(
            error.to_string(),
            "'shopify theme pull' failed with exit status: 1"
        );

        let error = CommandError::Failed {
            command: "shopify theme list".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "Invalid API key".to_string(),
        };
        assert!(error.to_string().ends_with(": Invalid API key"));
    }
}
