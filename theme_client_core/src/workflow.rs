//! Safety-gated theme workflow
//!
//! A sequential state machine:
//!
//! ```text
//! LoadConfig -> FetchThemes -> IdentifyLive -> PresentChoices
//!   -> SelectCandidate -> VerifyEligibility -> ConfirmProceed
//!   -> ChooseSyncSource -> PerformSync -> StartDevServer | PushTheme
//! ```
//!
//! Every external call and every prompt suspends the workflow; nothing
//! runs concurrently and nothing is retried. Fatal conditions come back as
//! [`Error`]; cancellations and a stopped dev server are ordinary
//! [`WorkflowOutcome`]s.

use crate::commands::{CONTENT_FILES, PullSource, ServerExit, ThemeCommands};
use crate::config::{self, EnvironmentCredentials};
use crate::directory;
use crate::error::{Error, PromptError, Result};
use crate::events::{WorkflowEvent, WorkflowObserver};
use crate::prompt::Prompter;
use crate::safety::{self, SafetyViolation};
use crate::theme::Theme;
use log::{debug, info, warn};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// What happens after a target theme has been verified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    /// Sync content, then run the dev server against the target
    Dev,
    /// Sync content, then push local files to the target
    Push,
}

/// How the content sync source is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Ask: live theme, selected theme or skip
    Ask,
    /// Always pull from the live theme without asking
    AlwaysLive,
}

/// Workflow options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowOptions {
    pub kind: WorkflowKind,
    pub sync_policy: SyncPolicy,
}

impl WorkflowOptions {
    /// `dev`: three-way sync choice, then the dev server
    pub fn dev() -> Self {
        Self {
            kind: WorkflowKind::Dev,
            sync_policy: SyncPolicy::Ask,
        }
    }

    /// `push`: content always refreshed from live before pushing
    pub fn push() -> Self {
        Self {
            kind: WorkflowKind::Push,
            sync_policy: SyncPolicy::AlwaysLive,
        }
    }
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self::dev()
    }
}

/// Why a workflow ended early without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Theme selection prompt was cancelled
    SelectionCancelled,
    /// The user answered "no" (or cancelled) at the confirmation
    Declined,
    /// Sync source prompt was cancelled
    SyncChoiceCancelled,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::SelectionCancelled => write!(f, "Theme selection cancelled"),
            CancelReason::Declined => write!(f, "Aborted by user"),
            CancelReason::SyncChoiceCancelled => write!(f, "Sync selection cancelled"),
        }
    }
}

/// Non-error end of a workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The dev server ran and stopped (interrupt or normal exit)
    ServerStopped { interrupted: bool },
    /// Local files were pushed to the verified theme
    Pushed { theme: Theme },
    Cancelled(CancelReason),
}

/// Sync source picked in the interactive step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncChoice {
    Live,
    Selected,
    Skip,
}

/// A candidate that passed the safety gate, with the live theme it was
/// checked against
///
/// Only [`Selection::verify`] builds one, so holding a `Selection` means
/// the gate ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    candidate: Theme,
    live: Theme,
}

impl Selection {
    pub fn verify(candidate: Theme, live: Theme) -> std::result::Result<Self, SafetyViolation> {
        safety::verify(&candidate, &live)?;
        Ok(Self { candidate, live })
    }

    pub fn candidate(&self) -> &Theme {
        &self.candidate
    }

    pub fn live(&self) -> &Theme {
        &self.live
    }
}

/// Workflow states; each step consumes one and yields the next
#[derive(Debug)]
enum Stage {
    FetchThemes,
    IdentifyLive(Vec<Theme>),
    PresentChoices { live: Theme, themes: Vec<Theme> },
    SelectCandidate { live: Theme, menu: Vec<Theme> },
    VerifyEligibility { live: Theme, candidate: Theme },
    ConfirmProceed(Selection),
    ChooseSyncSource(Selection),
    PerformSync(Selection, SyncChoice),
    StartDevServer(Selection),
    PushTheme(Selection),
    Finished(WorkflowOutcome),
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::FetchThemes => "FetchThemes",
            Stage::IdentifyLive(_) => "IdentifyLive",
            Stage::PresentChoices { .. } => "PresentChoices",
            Stage::SelectCandidate { .. } => "SelectCandidate",
            Stage::VerifyEligibility { .. } => "VerifyEligibility",
            Stage::ConfirmProceed(_) => "ConfirmProceed",
            Stage::ChooseSyncSource(_) => "ChooseSyncSource",
            Stage::PerformSync(..) => "PerformSync",
            Stage::StartDevServer(_) => "StartDevServer",
            Stage::PushTheme(_) => "PushTheme",
            Stage::Finished(_) => "Finished",
        }
    }
}

/// Theme workflow driver
pub struct ThemeWorkflow {
    commands: Arc<dyn ThemeCommands>,
    prompter: Arc<dyn Prompter>,
    observer: Arc<dyn WorkflowObserver>,
    project_dir: PathBuf,
    options: WorkflowOptions,
}

impl ThemeWorkflow {
    /// Create a workflow reading `shopify.theme.toml` from `project_dir`
    pub fn new(
        commands: Arc<dyn ThemeCommands>,
        prompter: Arc<dyn Prompter>,
        observer: Arc<dyn WorkflowObserver>,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            commands,
            prompter,
            observer,
            project_dir: project_dir.into(),
            options: WorkflowOptions::default(),
        }
    }

    pub fn with_options(mut self, options: WorkflowOptions) -> Self {
        self.options = options;
        self
    }

    fn emit(&self, event: WorkflowEvent) {
        self.observer.on_event(event);
    }

    /// Run the interactive workflow to completion
    pub async fn run(&self) -> Result<WorkflowOutcome> {
        debug!("Starting workflow with options: {:?}", self.options);
        let credentials = self.load_config()?;

        let mut stage = Stage::FetchThemes;
        loop {
            debug!("Workflow stage: {}", stage.name());
            stage = match stage {
                Stage::Finished(outcome) => {
                    info!("Workflow finished: {outcome:?}");
                    return Ok(outcome);
                }
                other => self.step(&credentials, other).await?,
            };
        }
    }

    /// Fetch and sort every theme for display, live first
    pub async fn list(&self) -> Result<Vec<Theme>> {
        let credentials = self.load_config()?;
        let themes = self.fetch(&credentials).await?;
        let sorted = directory::sort_for_display(&themes);

        self.emit(WorkflowEvent::ThemesListed {
            themes: sorted.clone(),
        });
        Ok(sorted)
    }

    fn load_config(&self) -> Result<EnvironmentCredentials> {
        let credentials = config::load_from_dir(&self.project_dir)?;
        self.emit(WorkflowEvent::ConfigLoaded {
            store: credentials.store.clone(),
            environment: credentials.environment.clone(),
        });
        Ok(credentials)
    }

    async fn fetch(&self, credentials: &EnvironmentCredentials) -> Result<Vec<Theme>> {
        self.emit(WorkflowEvent::FetchStarted);

        match self.commands.list_themes(credentials).await {
            Ok(themes) => {
                self.emit(WorkflowEvent::ThemesFetched {
                    count: themes.len(),
                });
                Ok(themes)
            }
            Err(error) => {
                self.emit(WorkflowEvent::FetchFailed {
                    reason: error.to_string(),
                });
                Err(Error::Fetch(error))
            }
        }
    }

    async fn step(&self, credentials: &EnvironmentCredentials, stage: Stage) -> Result<Stage> {
        let next = match stage {
            Stage::FetchThemes => Stage::IdentifyLive(self.fetch(credentials).await?),

            Stage::IdentifyLive(themes) => {
                let live = directory::identify_live(&themes)?.clone();
                self.emit(WorkflowEvent::LiveThemeIdentified {
                    theme: live.clone(),
                });
                Stage::PresentChoices { live, themes }
            }

            Stage::PresentChoices { live, themes } => {
                let menu = directory::development_themes(&themes);
                if menu.is_empty() {
                    return Err(Error::NoEligibleThemes);
                }
                Stage::SelectCandidate { live, menu }
            }

            Stage::SelectCandidate { live, menu } => {
                let labels: Vec<String> = menu.iter().map(Theme::label).collect();
                let prompt = match self.options.kind {
                    WorkflowKind::Dev => "Select a theme to develop",
                    WorkflowKind::Push => "Select a theme to push to",
                };

                match self.prompter.select(prompt, &labels, None)? {
                    Some(index) => {
                        let candidate = menu.get(index).cloned().ok_or_else(|| {
                            PromptError::new(format!("Selection {index} is out of range"))
                        })?;
                        Stage::VerifyEligibility { live, candidate }
                    }
                    None => self.cancel(CancelReason::SelectionCancelled),
                }
            }

            Stage::VerifyEligibility { live, candidate } => {
                self.emit(WorkflowEvent::SafetyCheck {
                    candidate: candidate.clone(),
                    live: live.clone(),
                });

                let selection = Selection::verify(candidate, live)?;
                self.emit(WorkflowEvent::SafetyPassed {
                    candidate: selection.candidate().clone(),
                });
                Stage::ConfirmProceed(selection)
            }

            Stage::ConfirmProceed(selection) => {
                let (prompt, default) = match self.options.kind {
                    WorkflowKind::Dev => ("Proceed with development?".to_string(), true),
                    WorkflowKind::Push => (
                        format!("Push local files to {}?", selection.candidate()),
                        false,
                    ),
                };

                match self.prompter.confirm(&prompt, default)? {
                    Some(true) => Stage::ChooseSyncSource(selection),
                    Some(false) | None => self.cancel(CancelReason::Declined),
                }
            }

            Stage::ChooseSyncSource(selection) => match self.options.sync_policy {
                SyncPolicy::AlwaysLive => Stage::PerformSync(selection, SyncChoice::Live),
                SyncPolicy::Ask => {
                    let items = vec![
                        format!("Pull from live theme ({})", selection.live().name),
                        format!("Pull from selected theme ({})", selection.candidate().name),
                        "Skip pull (use local content)".to_string(),
                    ];

                    match self
                        .prompter
                        .select("How would you like to sync content?", &items, Some(0))?
                    {
                        Some(0) => Stage::PerformSync(selection, SyncChoice::Live),
                        Some(1) => Stage::PerformSync(selection, SyncChoice::Selected),
                        Some(2) => Stage::PerformSync(selection, SyncChoice::Skip),
                        Some(index) => {
                            return Err(PromptError::new(format!(
                                "Selection {index} is out of range"
                            ))
                            .into());
                        }
                        None => self.cancel(CancelReason::SyncChoiceCancelled),
                    }
                }
            },

            Stage::PerformSync(selection, choice) => {
                self.sync(credentials, &selection, choice).await;
                match self.options.kind {
                    WorkflowKind::Dev => Stage::StartDevServer(selection),
                    WorkflowKind::Push => Stage::PushTheme(selection),
                }
            }

            Stage::StartDevServer(selection) => {
                let theme = selection.candidate();
                self.emit(WorkflowEvent::ServerStarting {
                    theme: theme.clone(),
                });

                let exit = self
                    .commands
                    .serve(credentials, theme.id)
                    .await
                    .map_err(Error::Server)?;

                self.emit(WorkflowEvent::ServerStopped);
                Stage::Finished(WorkflowOutcome::ServerStopped {
                    interrupted: exit == ServerExit::Interrupted,
                })
            }

            Stage::PushTheme(selection) => {
                let theme = selection.candidate().clone();
                self.emit(WorkflowEvent::PushStarting {
                    theme: theme.clone(),
                });

                self.commands
                    .push_theme(credentials, theme.id)
                    .await
                    .map_err(Error::Push)?;

                self.emit(WorkflowEvent::PushCompleted {
                    theme: theme.clone(),
                });
                Stage::Finished(WorkflowOutcome::Pushed { theme })
            }

            Stage::Finished(outcome) => Stage::Finished(outcome),
        };

        Ok(next)
    }

    fn cancel(&self, reason: CancelReason) -> Stage {
        self.emit(WorkflowEvent::Cancelled { reason });
        Stage::Finished(WorkflowOutcome::Cancelled(reason))
    }

    /// Content pull; failures are reported and swallowed
    async fn sync(
        &self,
        credentials: &EnvironmentCredentials,
        selection: &Selection,
        choice: SyncChoice,
    ) {
        let (source, pull) = match choice {
            SyncChoice::Skip => {
                self.emit(WorkflowEvent::SyncSkipped);
                return;
            }
            SyncChoice::Live => (selection.live().clone(), PullSource::Live),
            SyncChoice::Selected => (
                selection.candidate().clone(),
                PullSource::Theme(selection.candidate().id),
            ),
        };

        self.emit(WorkflowEvent::SyncStarted {
            source: source.clone(),
            from_live: pull == PullSource::Live,
            files: CONTENT_FILES,
        });

        match self.commands.pull_content(credentials, pull).await {
            Ok(()) => self.emit(WorkflowEvent::SyncCompleted { source }),
            Err(error) => {
                warn!("Content sync from {pull} failed: {error}");
                self.emit(WorkflowEvent::SyncFailed {
                    reason: error.to_string(),
                });
            }
        }
    }
}
