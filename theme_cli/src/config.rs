//! Application settings
//!
//! Store credentials live in `shopify.theme.toml` and are handled by the
//! core library. This module only covers how the CLI itself behaves.

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use theme_client_core::commands::shopify::DEFAULT_PROGRAM;

/// Prefix of environment variables overriding settings
pub const ENV_PREFIX: &str = "THEME_CLI_";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Shopify CLI executable
    pub shopify_bin: PathBuf,

    /// Rows shown at once in the theme menu
    pub menu_page_size: usize,

    pub color_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shopify_bin: PathBuf::from(DEFAULT_PROGRAM),
            menu_page_size: 10,
            color_enabled: true,
        }
    }
}

/// Loads [`AppConfig`] from defaults, the user config file and the environment
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a ConfigManager with the platform config directory
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("theme-cli/config.toml");
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("theme-cli")
            .join("config.toml")
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config: AppConfig = figment.extract().with_context(|| {
            format!(
                "Failed to load settings from {}",
                self.config_path.display()
            )
        })?;

        if config.menu_page_size == 0 {
            anyhow::bail!("menu_page_size must be at least 1");
        }

        Ok(config)
    }
}
