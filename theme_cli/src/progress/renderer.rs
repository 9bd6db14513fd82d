//! Terminal rendering of workflow events
//!
//! Converts [`WorkflowEvent`]s into the banner, status lines, spinner and
//! theme listing shown to the user.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;
use theme_client_core::{Theme, WorkflowEvent, WorkflowObserver};

const BOX_WIDTH: usize = 39;
const DIVIDER: &str = "  ─────────────────────────────────────────";

/// Which command the banner announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Dev,
    Push,
    List,
}

impl Banner {
    fn title(self) -> &'static str {
        match self {
            Banner::Dev => "SHOPIFY THEME DEV",
            Banner::Push => "SHOPIFY THEME PUSH",
            Banner::List => "SHOPIFY THEME LIST",
        }
    }

    fn subtitle(self) -> Option<&'static str> {
        match self {
            Banner::Dev => Some("Safe development workflow"),
            Banner::Push => Some("Safe push workflow"),
            Banner::List => None,
        }
    }

    fn frame(self, text: &str) -> ColoredString {
        match self {
            Banner::Dev => text.magenta().bold(),
            Banner::Push => text.blue().bold(),
            Banner::List => text.bright_black().bold(),
        }
    }
}

/// Workflow observer writing to the terminal
pub struct TerminalRenderer {
    banner: Banner,
    out: Mutex<Box<dyn Write + Send>>,
    spinner: Mutex<Option<ProgressBar>>,
    show_spinner: bool,
}

impl TerminalRenderer {
    /// Renderer writing to stdout
    pub fn stdout(banner: Banner, show_spinner: bool) -> Self {
        Self::with_writer(banner, Box::new(io::stdout()), show_spinner)
    }

    pub fn with_writer(banner: Banner, out: Box<dyn Write + Send>, show_spinner: bool) -> Self {
        Self {
            banner,
            out: Mutex::new(out),
            spinner: Mutex::new(None),
            show_spinner,
        }
    }

    fn write_lines(&self, lines: &[String]) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        for line in lines {
            // Nothing sensible to do when the terminal is gone
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }

    fn line(&self, text: impl Into<String>) {
        self.write_lines(&[text.into()]);
    }

    fn success(&self, message: &str) {
        self.line(format!("{}{message}", "  ✓ ".green()));
    }

    fn warning(&self, message: &str) {
        self.line(format!("{}{message}", "  ⚠ ".yellow()));
    }

    fn error(&self, message: &str) {
        self.line(format!("{}{message}", "  ✗ ".red()));
    }

    fn info(&self, message: &str) {
        self.line(format!("{}{message}", "  ℹ ".blue()));
    }

    fn section(&self, title: ColoredString) {
        self.write_lines(&[
            String::new(),
            DIVIDER.bright_black().to_string(),
            format!("  {title}"),
            DIVIDER.bright_black().to_string(),
            String::new(),
        ]);
    }

    fn banner_lines(&self, store: &str) -> Vec<String> {
        let border = "═".repeat(BOX_WIDTH);
        let framed = |text: ColoredString| {
            format!(
                "{}{}{}",
                self.banner.frame("  ║"),
                text,
                self.banner.frame("║")
            )
        };

        let mut lines = vec![
            String::new(),
            self.banner.frame(&format!("  ╔{border}╗")).to_string(),
            framed(format!("{:<BOX_WIDTH$}", format!("   {}", self.banner.title())).white().bold()),
        ];
        if let Some(subtitle) = self.banner.subtitle() {
            lines.push(framed(format!("{:<BOX_WIDTH$}", format!("   {subtitle}")).bright_black()));
        }
        lines.extend([
            self.banner.frame(&format!("  ╚{border}╝")).to_string(),
            String::new(),
            format!("  Store: {store}").bright_black().to_string(),
            String::new(),
        ]);
        lines
    }

    fn start_spinner(&self, message: &str) {
        if !self.show_spinner {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("  {spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner);
        }
    }

    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(spinner) = slot.take()
        {
            spinner.finish_and_clear();
        }
    }

    fn live_theme(&self, theme: &Theme) {
        self.write_lines(&[
            String::new(),
            DIVIDER.bright_black().to_string(),
            "  LIVE THEME (protected):".red().bold().to_string(),
            format!("    {}", theme.name).red().to_string(),
            format!("    ID: {}", theme.id).red().to_string(),
            DIVIDER.bright_black().to_string(),
            String::new(),
        ]);
    }

    fn safety_check(&self, candidate: &Theme, live: &Theme) {
        self.section("SAFETY VERIFICATION".yellow().bold());
        self.write_lines(&[
            format!("  Target theme: {}", candidate.name.cyan()),
            format!("  Target ID:    {}", candidate.id.to_string().cyan()),
            String::new(),
            format!("  Live theme:   {}", live.name.red()),
            format!("  Live ID:      {}", live.id.to_string().red()),
            String::new(),
        ]);
    }

    fn theme_listing(&self, themes: &[Theme]) {
        let mut lines = vec![String::new(), DIVIDER.bright_black().to_string()];

        for theme in themes {
            let (tag, name) = if theme.is_live() {
                (
                    " [LIVE] ".red().bold(),
                    theme.name.as_str().red().bold(),
                )
            } else {
                (
                    format!(" [{}] ", theme.role).bright_black(),
                    theme.name.as_str().white(),
                )
            };

            lines.push(format!("  {tag}{name}"));
            lines.push(format!(
                "           {}",
                format!("ID: {}", theme.id).bright_black()
            ));
            lines.push(String::new());
        }

        lines.push(DIVIDER.bright_black().to_string());
        lines.push(format!("  {} {} themes", "Total:".bright_black(), themes.len()));
        lines.push(format!(
            "  {} Live first, then newest to oldest",
            "Sorted:".bright_black()
        ));
        lines.push(String::new());

        self.write_lines(&lines);
    }
}

impl WorkflowObserver for TerminalRenderer {
    fn on_event(&self, event: WorkflowEvent) {
        match event {
            WorkflowEvent::ConfigLoaded { store, environment } => {
                log::debug!("Using environment '{environment}'");
                self.write_lines(&self.banner_lines(&store));
            }

            WorkflowEvent::FetchStarted => self.start_spinner("Fetching themes from store..."),

            WorkflowEvent::ThemesFetched { count } => {
                self.stop_spinner();
                self.success(&format!("Themes loaded ({count})"));
            }

            WorkflowEvent::FetchFailed { reason } => {
                self.stop_spinner();
                self.error("Failed to fetch themes");
                log::debug!("Fetch failure: {reason}");
            }

            WorkflowEvent::LiveThemeIdentified { theme } => self.live_theme(&theme),

            WorkflowEvent::ThemesListed { themes } => self.theme_listing(&themes),

            WorkflowEvent::SafetyCheck { candidate, live } => self.safety_check(&candidate, &live),

            WorkflowEvent::SafetyPassed { .. } => {
                self.success(&format!("Target is {} the live theme", "NOT".bold()));
                self.line("");
            }

            WorkflowEvent::SyncStarted {
                source,
                from_live,
                files,
            } => {
                let origin = if from_live { "LIVE" } else { "SELECTED" };
                self.section(format!("SYNCING CONTENT FROM {origin} THEME").blue().bold());
                self.info(&format!("Source: {}", source.name));
                self.info(&format!("Pulling: {}", files.join(", ")));
                self.line("");
            }

            WorkflowEvent::SyncCompleted { source } => {
                self.line("");
                self.success(&format!("Content synced from {}", source.name));
            }

            WorkflowEvent::SyncFailed { reason } => {
                self.line("");
                self.warning("Content sync had issues (may be partial)");
                self.warning(&reason);
            }

            WorkflowEvent::SyncSkipped => self.info("Skipping content sync, using local content"),

            WorkflowEvent::ServerStarting { theme } => {
                self.section("STARTING DEV SERVER".green().bold());
                self.info(&format!("Theme: {theme}"));
                self.info("Press Ctrl+C to stop");
                self.line("");
            }

            WorkflowEvent::ServerStopped => {
                self.line("");
                self.info("Dev server stopped");
            }

            WorkflowEvent::PushStarting { theme } => {
                self.section("PUSHING THEME".green().bold());
                self.info(&format!("Target: {theme}"));
                self.line("");
            }

            WorkflowEvent::PushCompleted { theme } => {
                self.line("");
                self.success(&format!("Pushed to {theme}"));
            }

            WorkflowEvent::Cancelled { reason } => {
                self.line("");
                self.info(&reason.to_string());
            }
        }
    }
}
