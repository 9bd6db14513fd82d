//! Terminal detection and capability utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::{self, stderr, stdout};

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners may allocate a TTY without anyone at the keyboard
    if is_ci_environment() {
        return false;
    }

    if env::var("DEBIAN_FRONTEND").unwrap_or_default() == "noninteractive" {
        return false;
    }

    true
}

/// Check if the terminal supports ANSI escape codes for colors and spinners
pub fn supports_ansi() -> bool {
    if !is_interactive() {
        return false;
    }

    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    let term = env::var("TERM").unwrap_or_default();
    if term == "dumb" {
        return false;
    }

    // Windows 10+ consoles handle ANSI without TERM being set
    cfg!(windows) || !term.is_empty()
}

/// Check if stderr is connected to a terminal (spinners draw there)
pub fn stderr_is_terminal() -> bool {
    stderr().is_terminal()
}

fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CIRCLECI",
        "BUILDKITE",
        "DRONE",
        "TEAMCITY_VERSION",
        "TF_BUILD", // Azure DevOps
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}

/// Determine if the fetch spinner should be shown
pub fn should_show_spinner() -> bool {
    is_interactive() && stderr_is_terminal() && supports_ansi()
}

/// Enable or disable colored output for the whole process
pub fn configure_colors(color_enabled: bool) {
    let enabled = color_enabled && supports_ansi();
    colored::control::set_override(enabled);
    log::debug!("Colored output: {enabled}");
}

/// Keeps Ctrl+C from terminating the process while held
///
/// Prompt reads see the keypress as an interrupted read instead. The
/// handler stays registered with the OS for the rest of the process
/// once installed; dropping the guard only stops listening.
pub struct InterruptGuard {
    #[cfg(unix)]
    signal: tokio::signal::unix::Signal,
    #[cfg(windows)]
    signal: tokio::signal::windows::CtrlC,
}

impl InterruptGuard {
    /// Register the handler; must be called inside a tokio runtime
    pub fn install() -> io::Result<Self> {
        #[cfg(unix)]
        let signal = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
        #[cfg(windows)]
        let signal = tokio::signal::windows::ctrl_c()?;

        log::debug!("Interrupt handler installed");
        Ok(Self { signal })
    }

    /// Wait for the next Ctrl+C received while the guard is held
    pub async fn recv(&mut self) -> Option<()> {
        self.signal.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirected_stdout_disables_ansi() {
        if !stdout().is_terminal() {
            assert!(!is_interactive());
            assert!(!supports_ansi());
            assert!(!should_show_spinner());
        }
    }

    #[test]
    fn test_ci_is_never_interactive() {
        if is_ci_environment() {
            assert!(!is_interactive());
        }
    }

    #[test]
    fn test_spinner_requires_ansi() {
        if !supports_ansi() {
            assert!(!should_show_spinner());
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_interrupt_guard_absorbs_sigint() {
        let mut guard = InterruptGuard::install().unwrap();

        unsafe {
            libc::raise(libc::SIGINT);
        }

        let received = tokio::time::timeout(std::time::Duration::from_secs(5), guard.recv())
            .await
            .unwrap();
        assert_eq!(received, Some(()));
    }
}
