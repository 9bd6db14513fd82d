//! Workflow event reporting
//!
//! The workflow reports what it is doing through a [`WorkflowObserver`]
//! instead of printing, keeping rendering out of the core library.

use crate::theme::Theme;
use crate::workflow::CancelReason;

/// Observer for workflow progress
pub trait WorkflowObserver: Send + Sync {
    fn on_event(&self, event: WorkflowEvent);
}

/// Everything the workflow reports, in the order it can happen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// Credentials loaded; never carries the token
    ConfigLoaded { store: String, environment: String },

    /// Theme listing command started
    FetchStarted,

    /// Theme listing finished
    ThemesFetched { count: usize },

    /// Theme listing failed; the workflow returns an error next
    FetchFailed { reason: String },

    /// The protected live theme
    LiveThemeIdentified { theme: Theme },

    /// Sorted listing for the `list` command
    ThemesListed { themes: Vec<Theme> },

    /// About to run the safety gate on the selected theme
    SafetyCheck { candidate: Theme, live: Theme },

    /// Gate passed
    SafetyPassed { candidate: Theme },

    /// Content pull started from `source`
    SyncStarted {
        source: Theme,
        from_live: bool,
        files: &'static [&'static str],
    },

    SyncCompleted { source: Theme },

    /// Content pull failed; the workflow continues with local content
    SyncFailed { reason: String },

    SyncSkipped,

    ServerStarting { theme: Theme },

    ServerStopped,

    PushStarting { theme: Theme },

    PushCompleted { theme: Theme },

    Cancelled { reason: CancelReason },
}

/// Observer that drops every event
pub struct NullObserver;

impl WorkflowObserver for NullObserver {
    fn on_event(&self, _event: WorkflowEvent) {}
}
