//! Test utilities for the theme CLI
//!
//! This crate provides a mock theme command, a scripted prompter, a
//! recording observer and fixtures for testing the workflow without a
//! terminal or the real Shopify CLI.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{ProjectDir, ThemeSetBuilder, store_themes};
pub use mocks::{
    Answer, AskedPrompt, Invocation, MockThemeCommands, RecordingObserver, ScriptedPrompter,
    ServerBehavior,
};
