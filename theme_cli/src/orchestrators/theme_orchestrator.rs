//! Theme command orchestrator
//!
//! Wires the core workflow to the terminal: the Shopify CLI as the
//! command backend, dialoguer prompts and the event renderer.

use crate::config::AppConfig;
use crate::error::CliResult;
use crate::progress::{Banner, TerminalRenderer};
use crate::prompt::DialoguerPrompter;
use crate::terminal::{self, InterruptGuard};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use theme_client_core::{
    NullObserver, Prompter, ShopifyCli, Theme, ThemeCommands, ThemeWorkflow, WorkflowObserver,
    WorkflowOptions, WorkflowOutcome,
};

/// Orchestrator for the `dev`, `push` and `list` commands
pub struct ThemeOrchestrator {
    commands: Arc<dyn ThemeCommands>,
    prompter: Arc<dyn Prompter>,
    project_dir: PathBuf,
    show_spinner: bool,
    quiet: bool,
}

impl ThemeOrchestrator {
    /// Create an orchestrator for the project in `project_dir`
    pub fn new(config: &AppConfig, project_dir: PathBuf) -> Self {
        debug!("Creating theme orchestrator with settings: {config:?}");

        let colorful = config.color_enabled && terminal::supports_ansi();
        Self {
            commands: Arc::new(ShopifyCli::new(&config.shopify_bin)),
            prompter: Arc::new(DialoguerPrompter::new(config.menu_page_size, colorful)),
            project_dir,
            show_spinner: terminal::should_show_spinner(),
            quiet: false,
        }
    }

    /// Create an orchestrator around existing components; renders nothing
    pub fn with_components(
        commands: Arc<dyn ThemeCommands>,
        prompter: Arc<dyn Prompter>,
        project_dir: PathBuf,
    ) -> Self {
        Self {
            commands,
            prompter,
            project_dir,
            show_spinner: false,
            quiet: true,
        }
    }

    fn observer(&self, banner: Banner) -> Arc<dyn WorkflowObserver> {
        if self.quiet {
            Arc::new(NullObserver)
        } else {
            Arc::new(TerminalRenderer::stdout(banner, self.show_spinner))
        }
    }

    /// Absorb Ctrl+C so an open prompt reports it as a cancellation
    fn hold_interrupts(&self) -> Option<InterruptGuard> {
        if self.quiet {
            return None;
        }
        match InterruptGuard::install() {
            Ok(guard) => Some(guard),
            Err(e) => {
                warn!("Could not install interrupt handler: {e}");
                None
            }
        }
    }

    fn workflow(&self, banner: Banner, options: WorkflowOptions) -> ThemeWorkflow {
        ThemeWorkflow::new(
            self.commands.clone(),
            self.prompter.clone(),
            self.observer(banner),
            self.project_dir.clone(),
        )
        .with_options(options)
    }

    /// Select a development theme, sync content and run the dev server
    pub async fn dev(&self) -> CliResult<WorkflowOutcome> {
        let _interrupts = self.hold_interrupts();
        let outcome = self
            .workflow(Banner::Dev, WorkflowOptions::dev())
            .run()
            .await?;

        info!("dev finished: {outcome:?}");
        Ok(outcome)
    }

    /// Select a development theme, refresh content from live and push to it
    pub async fn push(&self) -> CliResult<WorkflowOutcome> {
        let _interrupts = self.hold_interrupts();
        let outcome = self
            .workflow(Banner::Push, WorkflowOptions::push())
            .run()
            .await?;

        info!("push finished: {outcome:?}");
        Ok(outcome)
    }

    /// List every theme of the store, live first
    pub async fn list(&self) -> CliResult<Vec<Theme>> {
        let themes = self
            .workflow(Banner::List, WorkflowOptions::default())
            .list()
            .await?;

        info!("Listed {} themes", themes.len());
        Ok(themes)
    }
}
