//! Command orchestrators
//!
//! Coordinate between the CLI layer and the core workflow.

pub mod theme_orchestrator;

pub use theme_orchestrator::ThemeOrchestrator;
