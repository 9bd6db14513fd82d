//! Theme sets and project directories

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use theme_client_core::{CONFIG_FILE_NAME, Theme, ThemeRole};

/// Builder for the theme list a store reports
#[derive(Debug, Default)]
pub struct ThemeSetBuilder {
    themes: Vec<Theme>,
}

impl ThemeSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the live theme
    pub fn live(self, id: u64, name: &str) -> Self {
        self.theme(id, name, ThemeRole::Live)
    }

    pub fn unpublished(self, id: u64, name: &str) -> Self {
        self.theme(id, name, ThemeRole::Unpublished)
    }

    pub fn development(self, id: u64, name: &str) -> Self {
        self.theme(id, name, ThemeRole::Development)
    }

    /// Add a theme with any role
    pub fn theme(mut self, id: u64, name: &str, role: impl Into<ThemeRole>) -> Self {
        self.themes.push(Theme::new(id, name, role));
        self
    }

    pub fn build(self) -> Vec<Theme> {
        self.themes
    }
}

/// One live theme and two development candidates, in listing order
pub fn store_themes() -> Vec<Theme> {
    ThemeSetBuilder::new()
        .live(1, "Live")
        .unpublished(5, "New")
        .development(3, "Old")
        .build()
}

/// Temporary project directory, optionally holding `shopify.theme.toml`
pub struct ProjectDir {
    dir: TempDir,
}

impl ProjectDir {
    /// Directory without a configuration file
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Directory with a single `[environments.development]` entry
    pub fn with_credentials(store: &str, password: &str) -> Self {
        Self::with_content(&format!(
            "[environments.development]\nstore = \"{store}\"\npassword = \"{password}\"\n"
        ))
    }

    /// Directory with a configuration file holding `content`
    pub fn with_content(content: &str) -> Self {
        let project = Self::empty();
        fs::write(project.path().join(CONFIG_FILE_NAME), content)
            .expect("Failed to write config file");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
