//! Theme Client Core Library
//!
//! Core of the safe theme development workflow: credentials loading, theme
//! ordering, the live-theme safety gate and the workflow state machine that
//! drives the external Shopify CLI.

pub mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod events;
pub mod prompt;
pub mod safety;
pub mod theme;
pub mod workflow;

// Re-export main types
pub use commands::{
    CONTENT_FILES, CommandError, EXCLUDED_FILES, PullSource, ServerExit, ShopifyCli, ThemeCommands,
};
pub use config::{AccessToken, CONFIG_FILE_NAME, ConfigError, EnvironmentCredentials};
pub use directory::{development_themes, identify_live, sort_for_display};
pub use error::{Error, PromptError, Result};
pub use events::{NullObserver, WorkflowEvent, WorkflowObserver};
pub use prompt::{PromptResult, Prompter};
pub use safety::{SafetyViolation, is_eligible};
pub use theme::{Theme, ThemeRole};
pub use workflow::{
    CancelReason, Selection, SyncChoice, SyncPolicy, ThemeWorkflow, WorkflowKind, WorkflowOptions,
    WorkflowOutcome,
};
