//! Store credentials loaded from `shopify.theme.toml`
//!
//! The file lives in the theme root (the working directory) and has the
//! shape written by the Shopify CLI:
//!
//! ```toml
//! [environments.env1]
//! store = "your-store.myshopify.com"
//! password = "shptka_xxxxx"
//! ```
//!
//! Only the first `[environments.*]` table is used.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "shopify.theme.toml";

/// Credentials-file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("No environment found in {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },

    #[error("Missing {missing} in environment '{environment}' of shopify.theme.toml")]
    Incomplete {
        environment: String,
        missing: &'static str,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Theme access token
///
/// Never printed: `Debug` is redacted and the buffer is wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, only for handing to the external command
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Credentials for one named environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentCredentials {
    /// Store domain, e.g. `example.myshopify.com`
    pub store: String,
    pub password: AccessToken,
    /// Name of the `[environments.<name>]` table the values came from
    pub environment: String,
}

#[derive(Deserialize)]
struct ThemeToml {
    #[serde(default)]
    environments: toml::Table,
}

#[derive(Deserialize)]
struct EnvironmentSection {
    store: Option<String>,
    password: Option<String>,
}

/// Load credentials from `shopify.theme.toml` in the current directory
pub fn load() -> Result<EnvironmentCredentials, ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::Read {
        path: PathBuf::from("."),
        source,
    })?;
    load_from_dir(&cwd)
}

/// Load credentials from `shopify.theme.toml` inside `dir`
pub fn load_from_dir(dir: &Path) -> Result<EnvironmentCredentials, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Err(ConfigError::NotFound { path });
    }

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    parse(&content).map_err(|error| match error {
        ConfigError::Invalid { reason, .. } => ConfigError::Invalid { path, reason },
        other => other,
    })
}

/// Parse the content of a credentials file
///
/// Errors carry the bare file name as path; [`load_from_dir`] replaces it
/// with the full path.
pub fn parse(content: &str) -> Result<EnvironmentCredentials, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        path: PathBuf::from(CONFIG_FILE_NAME),
        reason,
    };

    let file: ThemeToml = toml::from_str(content).map_err(|e| invalid(e.message().to_string()))?;

    let (environment, section) = file
        .environments
        .into_iter()
        .next()
        .ok_or_else(|| invalid("no [environments.<name>] section".to_string()))?;

    let section: EnvironmentSection = section
        .try_into()
        .map_err(|e: toml::de::Error| invalid(format!("environment '{environment}': {}", e.message())))?;

    let store = non_empty(section.store).ok_or_else(|| ConfigError::Incomplete {
        environment: environment.clone(),
        missing: "store",
    })?;
    let password = non_empty(section.password).ok_or_else(|| ConfigError::Incomplete {
        environment: environment.clone(),
        missing: "password",
    })?;

    log::debug!("Loaded environment '{environment}' for store {store}");

    Ok(EnvironmentCredentials {
        store,
        password: AccessToken::new(password),
        environment,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
