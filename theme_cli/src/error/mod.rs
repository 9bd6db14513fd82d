use colored::*;
use std::error::Error as StdError;
use std::fmt;
use theme_client_core::{CommandError, ConfigError, Error as CoreError};

/// Commands accepted on the command line
pub const KNOWN_COMMANDS: [&str; 4] = ["dev", "push", "list", "help"];

/// CLI-specific error type carrying what the user needs to recover
#[derive(Debug)]
pub struct CliError {
    /// The main error message
    message: String,

    /// Error category for the message prefix
    category: ErrorCategory,

    /// Additional context information
    context: Vec<(String, String)>,

    /// Suggestions for recovery
    pub suggestions: Vec<String>,

    /// Source error if any
    source: Option<Box<dyn StdError + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorCategory {
    General,
    Misuse,
    Safety,
}

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Completed, or cancelled by the user
    Success = 0,
    /// Any fatal condition
    Failure = 1,
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Extension trait for adding context to errors
pub trait ErrorContext {
    fn with_context(self, key: &str, value: &str) -> Self;
    fn with_suggestion(self, suggestion: &str) -> Self;
    fn with_source(self, source: Box<dyn StdError + Send + Sync>) -> Self;
}

impl CliError {
    fn new(message: &str, category: ErrorCategory) -> Self {
        Self {
            message: message.to_string(),
            category,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Create a general error
    pub fn general(message: &str) -> Self {
        Self::new(message, ErrorCategory::General)
    }

    /// Create a command misuse error
    pub fn misuse(message: &str) -> Self {
        let mut error = Self::new(message, ErrorCategory::Misuse);
        error
            .suggestions
            .push("Run 'theme-cli help' for usage information".to_string());
        error
    }

    /// Unknown command, with a "Did you mean" hint for near misses
    pub fn unknown_command(command: &str) -> Self {
        let mut error = Self::misuse(&format!("Unknown command: {command}"));

        if let Some(known) = closest_command(command) {
            error.suggestions.insert(0, format!("Did you mean '{known}'?"));
        }

        error
    }

    /// Create a safety gate error
    pub fn safety(message: &str) -> Self {
        Self::new(message, ErrorCategory::Safety)
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::Failure
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn prefix(&self) -> &'static str {
        match self.category {
            ErrorCategory::General => "Error",
            ErrorCategory::Misuse => "Usage Error",
            ErrorCategory::Safety => "Safety Error",
        }
    }

    /// Format the error for user display
    pub fn format_for_user(&self, debug: bool) -> String {
        let mut output = String::new();

        let prefix = match self.category {
            ErrorCategory::General => self.prefix().red(),
            ErrorCategory::Misuse => self.prefix().yellow(),
            ErrorCategory::Safety => self.prefix().red().bold(),
        };

        output.push_str(&format!("{}: {}\n", prefix, self.message));

        if !self.context.is_empty() {
            output.push_str("\nContext:\n");
            for (key, value) in &self.context {
                output.push_str(&format!("  {}: {}\n", key.bold(), value));
            }
        }

        // Error chain in debug mode
        if debug && let Some(source) = &self.source {
            output.push_str("\nCaused by:\n");
            let mut current: Option<&dyn StdError> = Some(source.as_ref());
            let mut level = 1;

            while let Some(err) = current {
                output.push_str(&format!("  {level}: {err}\n"));
                current = err.source();
                level += 1;
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.prefix(), self.message)?;

        for (key, value) in &self.context {
            write!(f, " ({key}: {value})")?;
        }

        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl ErrorContext for CliError {
    fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

/// Convert anyhow errors to CLI errors
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        Self::general(&format!("{error:#}"))
    }
}

const CONFIG_EXAMPLE: &str = "Expected format:\n      [environments.development]\n      store = \"your-store.myshopify.com\"\n      password = \"shptka_...\"";

fn command_suggestions(error: CliError, command: &CommandError) -> CliError {
    match command {
        CommandError::Spawn { program, .. } => error
            .with_context("program", program)
            .with_suggestion("Check that the Shopify CLI is installed (shopify theme commands)")
            .with_suggestion("Set THEME_CLI_SHOPIFY_BIN to use a different executable"),
        CommandError::Failed { .. } => error.with_suggestion(
            "Check the store and password in shopify.theme.toml",
        ),
        CommandError::Parse { .. } => {
            error.with_suggestion("Check that the installed Shopify CLI supports 'theme list --json'")
        }
    }
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        let message = error.to_string();

        let cli_error = match &error {
            CoreError::Config(config) => {
                let base = Self::general(&message);
                match config {
                    ConfigError::NotFound { .. } => base
                        .with_suggestion("Create shopify.theme.toml in the current directory")
                        .with_suggestion(CONFIG_EXAMPLE),
                    ConfigError::Invalid { .. } | ConfigError::Incomplete { .. } => {
                        base.with_suggestion(CONFIG_EXAMPLE)
                    }
                    ConfigError::Read { .. } => {
                        base.with_suggestion("Check file permissions of shopify.theme.toml")
                    }
                }
            }
            CoreError::Fetch(command) => command_suggestions(Self::general(&message), command),
            CoreError::NoLiveTheme { .. } => Self::general(&message)
                .with_suggestion("Check the store's themes in Shopify admin or run 'theme-cli list'"),
            CoreError::NoEligibleThemes => Self::general(&message).with_suggestion(
                "Create a new theme in Shopify admin or use: shopify theme duplicate --live",
            ),
            CoreError::Safety(_) => Self::safety(&message)
                .with_suggestion("This should never happen. Aborted for safety."),
            CoreError::Server(command) | CoreError::Push(command) => {
                command_suggestions(Self::general(&message), command)
                    .with_suggestion("Run with RUST_LOG=debug to see the command that was run")
            }
            CoreError::Prompt(_) => Self::general(&message)
                .with_suggestion("Run theme-cli from an interactive terminal"),
        };

        cli_error.with_source(Box::new(error))
    }
}

/// Closest known command within an edit distance of 2
fn closest_command(input: &str) -> Option<&'static str> {
    KNOWN_COMMANDS
        .iter()
        .map(|known| (levenshtein_distance(input, known), *known))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, known)| known)
}

/// Simple Levenshtein distance for command suggestions
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();
    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(len1 + 1) {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate().take(len2 + 1) {
        *cell = j;
    }

    for (i, c1) in s1_chars.iter().enumerate() {
        let i1 = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let j1 = j + 1;
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i1][j1] = std::cmp::min(
                std::cmp::min(matrix[i][j1] + 1, matrix[i1][j] + 1),
                matrix[i][j] + cost,
            );
        }
    }

    matrix[len1][len2]
}
