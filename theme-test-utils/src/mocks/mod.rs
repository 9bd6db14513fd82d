//! Mock implementations for testing

mod commands;
mod observer;
mod prompter;

pub use commands::{Invocation, MockThemeCommands, ServerBehavior};
pub use observer::RecordingObserver;
pub use prompter::{Answer, AskedPrompt, ScriptedPrompter};
