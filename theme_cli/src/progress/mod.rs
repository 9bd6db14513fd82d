//! Progress reporting module for the CLI
//!
//! Renders the events reported by the core workflow.

pub mod renderer;

pub use renderer::{Banner, TerminalRenderer};
