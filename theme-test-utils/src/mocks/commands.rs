//! Mock implementation of ThemeCommands for testing

use async_trait::async_trait;
use std::sync::Mutex;
use theme_client_core::{
    CommandError, EnvironmentCredentials, PullSource, ServerExit, Theme, ThemeCommands,
};

/// One recorded call to the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    ListThemes,
    PullContent(PullSource),
    PushTheme(u64),
    Serve(u64),
}

/// How the mocked dev server ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerBehavior {
    /// Exits on its own with success
    Finish,
    /// Stopped by Ctrl+C
    Interrupt,
    /// Exits with a non-zero status
    Fail,
}

#[derive(Debug, Clone)]
struct MockBehavior {
    themes: Result<Vec<Theme>, String>,
    pull_failure: Option<String>,
    push_failure: Option<String>,
    server: ServerBehavior,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            themes: Ok(Vec::new()),
            pull_failure: None,
            push_failure: None,
            server: ServerBehavior::Interrupt,
        }
    }
}

/// Mock theme command that records every invocation
///
/// # Examples
///
/// ```rust
/// use theme_test_utils::{Invocation, MockThemeCommands, store_themes};
///
/// let mock = MockThemeCommands::new().with_themes(store_themes());
/// assert!(mock.calls().is_empty());
/// ```
#[derive(Default)]
pub struct MockThemeCommands {
    behavior: Mutex<MockBehavior>,
    calls: Mutex<Vec<Invocation>>,
}

impl MockThemeCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Themes returned by `list_themes`
    pub fn with_themes(self, themes: Vec<Theme>) -> Self {
        self.behavior.lock().unwrap().themes = Ok(themes);
        self
    }

    /// Make `list_themes` fail with `stderr`
    pub fn with_list_failure(self, stderr: &str) -> Self {
        self.behavior.lock().unwrap().themes = Err(stderr.to_string());
        self
    }

    /// Make `pull_content` fail with `stderr`
    pub fn with_pull_failure(self, stderr: &str) -> Self {
        self.behavior.lock().unwrap().pull_failure = Some(stderr.to_string());
        self
    }

    /// Make `push_theme` fail with `stderr`
    pub fn with_push_failure(self, stderr: &str) -> Self {
        self.behavior.lock().unwrap().push_failure = Some(stderr.to_string());
        self
    }

    pub fn with_server(self, server: ServerBehavior) -> Self {
        self.behavior.lock().unwrap().server = server;
        self
    }

    /// Every invocation so far, in order
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Invocations after the theme listing (pull, push, serve)
    pub fn side_effects(&self) -> Vec<Invocation> {
        self.calls()
            .into_iter()
            .filter(|call| *call != Invocation::ListThemes)
            .collect()
    }

    fn record(&self, invocation: Invocation) {
        self.calls.lock().unwrap().push(invocation);
    }

    fn failure(command: &str, stderr: &str) -> CommandError {
        CommandError::Failed {
            command: format!("mock theme {command}"),
            status: "exit status: 1".to_string(),
            stderr: stderr.to_string(),
        }
    }
}

#[async_trait]
impl ThemeCommands for MockThemeCommands {
    async fn list_themes(
        &self,
        _credentials: &EnvironmentCredentials,
    ) -> Result<Vec<Theme>, CommandError> {
        self.record(Invocation::ListThemes);
        let themes = self.behavior.lock().unwrap().themes.clone();
        themes.map_err(|stderr| Self::failure("list", &stderr))
    }

    async fn pull_content(
        &self,
        _credentials: &EnvironmentCredentials,
        source: PullSource,
    ) -> Result<(), CommandError> {
        self.record(Invocation::PullContent(source));
        match self.behavior.lock().unwrap().pull_failure.clone() {
            Some(stderr) => Err(Self::failure("pull", &stderr)),
            None => Ok(()),
        }
    }

    async fn push_theme(
        &self,
        _credentials: &EnvironmentCredentials,
        theme_id: u64,
    ) -> Result<(), CommandError> {
        self.record(Invocation::PushTheme(theme_id));
        match self.behavior.lock().unwrap().push_failure.clone() {
            Some(stderr) => Err(Self::failure("push", &stderr)),
            None => Ok(()),
        }
    }

    async fn serve(
        &self,
        _credentials: &EnvironmentCredentials,
        theme_id: u64,
    ) -> Result<ServerExit, CommandError> {
        self.record(Invocation::Serve(theme_id));
        let server = self.behavior.lock().unwrap().server;
        match server {
            ServerBehavior::Finish => Ok(ServerExit::Finished),
            ServerBehavior::Interrupt => Ok(ServerExit::Interrupted),
            ServerBehavior::Fail => Err(Self::failure("dev", "port already in use")),
        }
    }
}
