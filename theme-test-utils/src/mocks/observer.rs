//! Observer recording workflow events

use std::sync::Mutex;
use theme_client_core::{WorkflowEvent, WorkflowObserver};

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<WorkflowEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<WorkflowEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Whether any recorded event matches
    pub fn any(&self, predicate: impl Fn(&WorkflowEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(predicate)
    }
}

impl WorkflowObserver for RecordingObserver {
    fn on_event(&self, event: WorkflowEvent) {
        self.events.lock().unwrap().push(event);
    }
}
