//! Shopify Theme CLI
//!
//! Terminal front end for the safe theme development workflow in
//! `theme_client_core`.

pub mod config;
pub mod error;
pub mod orchestrators;
pub mod progress;
pub mod prompt;
pub mod terminal;

pub use config::{AppConfig, ConfigManager};
pub use error::{CliError, CliResult, ExitCode};
pub use orchestrators::ThemeOrchestrator;
