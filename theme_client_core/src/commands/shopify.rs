//! [`ThemeCommands`] backed by the Shopify CLI
//!
//! Invocations look like `shopify theme <sub> --store S --password P ...`.
//! Command lines are logged with the password replaced by `***`.

use super::{CONTENT_FILES, CommandError, PullSource, ServerExit, ThemeCommands};
use crate::config::EnvironmentCredentials;
use crate::theme::{Theme, parse_theme_list};
use async_trait::async_trait;
use log::{debug, warn};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Default executable name
pub const DEFAULT_PROGRAM: &str = "shopify";

/// Driver for the `shopify theme` commands
#[derive(Debug, Clone)]
pub struct ShopifyCli {
    program: PathBuf,
}

impl Default for ShopifyCli {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl ShopifyCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn base_args(subcommand: &str, credentials: &EnvironmentCredentials) -> Vec<String> {
        vec![
            "theme".to_string(),
            subcommand.to_string(),
            "--store".to_string(),
            credentials.store.clone(),
            "--password".to_string(),
            credentials.password.expose().to_string(),
        ]
    }

    /// Arguments for `theme list --json`
    pub fn list_args(credentials: &EnvironmentCredentials) -> Vec<String> {
        let mut args = Self::base_args("list", credentials);
        args.push("--json".to_string());
        args
    }

    /// Arguments for a non-destructive content pull
    pub fn pull_args(credentials: &EnvironmentCredentials, source: PullSource) -> Vec<String> {
        let mut args = Self::base_args("pull", credentials);
        args.push("--nodelete".to_string());

        match source {
            PullSource::Live => args.push("--live".to_string()),
            PullSource::Theme(id) => {
                args.push("--theme".to_string());
                args.push(id.to_string());
            }
        }

        for pattern in CONTENT_FILES {
            args.push("--only".to_string());
            args.push((*pattern).to_string());
        }

        args
    }

    /// Arguments for pushing to a theme by id; never `--live` or `--allow-live`
    pub fn push_args(credentials: &EnvironmentCredentials, theme_id: u64) -> Vec<String> {
        let mut args = Self::base_args("push", credentials);
        args.extend([
            "--theme".to_string(),
            theme_id.to_string(),
            "--nodelete".to_string(),
        ]);
        args
    }

    /// Arguments for `theme dev` against a theme id
    pub fn serve_args(credentials: &EnvironmentCredentials, theme_id: u64) -> Vec<String> {
        let mut args = Self::base_args("dev", credentials);
        args.extend(["--theme".to_string(), theme_id.to_string()]);
        args
    }

    /// Printable command line with the password masked
    pub fn describe(&self, args: &[String]) -> String {
        let mut parts = vec![self.program.display().to_string()];
        let mut mask_next = false;

        for arg in args {
            if mask_next {
                parts.push("***".to_string());
                mask_next = false;
            } else {
                mask_next = arg == "--password";
                parts.push(arg.clone());
            }
        }

        parts.join(" ")
    }

    fn short_name(&self, args: &[String]) -> String {
        let program = self.program.display();
        match args.get(1) {
            Some(sub) => format!("{program} theme {sub}"),
            None => program.to_string(),
        }
    }

    fn command(&self, args: &[String]) -> Command {
        debug!("Running: {}", self.describe(args));
        let mut command = Command::new(&self.program);
        command.args(args);
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> CommandError {
        CommandError::Spawn {
            program: self.program.display().to_string(),
            source,
        }
    }

    /// Run with inherited stdio and map a non-zero exit to an error
    async fn run_inherited(&self, args: Vec<String>) -> Result<(), CommandError> {
        let status = self
            .command(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Failed {
                command: self.short_name(&args),
                status: status.to_string(),
                stderr: String::new(),
            })
        }
    }
}

/// Outcome of waiting on the dev server child
enum Waited {
    Exited(std::io::Result<ExitStatus>),
    CtrlC,
    SignalUnavailable(std::io::Error),
}

#[async_trait]
impl ThemeCommands for ShopifyCli {
    async fn list_themes(
        &self,
        credentials: &EnvironmentCredentials,
    ) -> Result<Vec<Theme>, CommandError> {
        let args = Self::list_args(credentials);
        let output = self
            .command(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                command: self.short_name(&args),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let themes = parse_theme_list(stdout.trim()).map_err(|source| CommandError::Parse {
            command: self.short_name(&args),
            source,
        })?;

        debug!("Fetched {} themes", themes.len());
        Ok(themes)
    }

    async fn pull_content(
        &self,
        credentials: &EnvironmentCredentials,
        source: PullSource,
    ) -> Result<(), CommandError> {
        self.run_inherited(Self::pull_args(credentials, source))
            .await
    }

    async fn push_theme(
        &self,
        credentials: &EnvironmentCredentials,
        theme_id: u64,
    ) -> Result<(), CommandError> {
        self.run_inherited(Self::push_args(credentials, theme_id))
            .await
    }

    async fn serve(
        &self,
        credentials: &EnvironmentCredentials,
        theme_id: u64,
    ) -> Result<ServerExit, CommandError> {
        let args = Self::serve_args(credentials, theme_id);
        let mut child = self
            .command(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Ctrl+C reaches the whole foreground process group. Holding the
        // handler keeps this process alive until the child has exited.
        let waited = tokio::select! {
            status = child.wait() => Waited::Exited(status),
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => Waited::CtrlC,
                Err(e) => Waited::SignalUnavailable(e),
            },
        };

        let (status, interrupted) = match waited {
            Waited::Exited(status) => (status, false),
            Waited::CtrlC => (child.wait().await, true),
            Waited::SignalUnavailable(e) => {
                warn!("Could not install Ctrl+C handler: {e}");
                (child.wait().await, false)
            }
        };
        let status = status.map_err(|e| self.spawn_error(e))?;

        if interrupted || exited_by_interrupt(&status) {
            debug!("Dev server interrupted ({status})");
            return Ok(ServerExit::Interrupted);
        }

        if status.success() {
            Ok(ServerExit::Finished)
        } else {
            Err(CommandError::Failed {
                command: self.short_name(&args),
                status: status.to_string(),
                stderr: String::new(),
            })
        }
    }
}

/// Conventional exit code of a process ended by SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[cfg(unix)]
fn exited_by_interrupt(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(libc::SIGINT) || status.code() == Some(INTERRUPTED_EXIT_CODE)
}

#[cfg(not(unix))]
fn exited_by_interrupt(status: &ExitStatus) -> bool {
    // STATUS_CONTROL_C_EXIT
    const CONTROL_C_EXIT: i32 = 0xC000013A_u32 as i32;
    matches!(status.code(), Some(INTERRUPTED_EXIT_CODE) | Some(CONTROL_C_EXIT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessToken;

    fn credentials() -> EnvironmentCredentials {
        EnvironmentCredentials {
            store: "example.myshopify.com".to_string(),
            password: AccessToken::new("shptka_secret"),
            environment: "env1".to_string(),
        }
    }

    #[test]
    fn test_list_args() {
        assert_eq!(
            ShopifyCli::list_args(&credentials()),
            vec![
                "theme",
                "list",
                "--store",
                "example.myshopify.com",
                "--password",
                "shptka_secret",
                "--json"
            ]
        );
    }

    #[test]
    fn test_pull_args_from_live() {
        let args = ShopifyCli::pull_args(&credentials(), PullSource::Live);
        assert_eq!(&args[..2], &["theme", "pull"]);
        assert!(args.contains(&"--nodelete".to_string()));
        assert!(args.contains(&"--live".to_string()));
        assert!(!args.contains(&"--theme".to_string()));

        let only: Vec<&str> = args
            .windows(2)
            .filter(|w| w[0] == "--only")
            .map(|w| w[1].as_str())
            .collect();
        assert_eq!(only, CONTENT_FILES);
    }

    #[test]
    fn test_pull_args_from_theme() {
        let args = ShopifyCli::pull_args(&credentials(), PullSource::Theme(42));
        assert!(!args.contains(&"--live".to_string()));
        let pos = args.iter().position(|a| a == "--theme").unwrap();
        assert_eq!(args[pos + 1], "42");
        assert!(!args.iter().any(|a| a.contains("settings_schema")));
    }

    #[test]
    fn test_push_args_never_target_live() {
        let args = ShopifyCli::push_args(&credentials(), 7);
        assert!(!args.contains(&"--live".to_string()));
        assert!(!args.contains(&"--allow-live".to_string()));
        assert!(args.ends_with(&["--theme".to_string(), "7".to_string(), "--nodelete".to_string()]));
    }

    #[test]
    fn test_serve_args() {
        let args = ShopifyCli::serve_args(&credentials(), 99);
        assert_eq!(&args[..2], &["theme", "dev"]);
        assert!(args.ends_with(&["--theme".to_string(), "99".to_string()]));
    }

    #[test]
    fn test_describe_masks_password() {
        let cli = ShopifyCli::default();
        let line = cli.describe(&ShopifyCli::list_args(&credentials()));
        assert!(!line.contains("shptka_secret"));
        assert!(line.contains("--password ***"));
        assert!(line.starts_with("shopify theme list"));
    }
}
