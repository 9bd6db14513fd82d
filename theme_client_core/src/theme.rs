//! Theme data model
//!
//! Themes are remote entities owned by the store. This crate only ever
//! reads them from the output of the external theme-listing command.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a theme plays in the store
///
/// Exactly one theme per store carries [`ThemeRole::Live`]. Roles this
/// crate does not know about are kept verbatim in [`ThemeRole::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThemeRole {
    /// Serving production storefront traffic
    Live,
    /// Unpublished theme
    Unpublished,
    /// Development theme (usually created by `theme dev`)
    Development,
    /// Demo theme from the theme store
    Demo,
    /// Any other role string reported by the platform
    Other(String),
}

impl ThemeRole {
    pub fn as_str(&self) -> &str {
        match self {
            ThemeRole::Live => "live",
            ThemeRole::Unpublished => "unpublished",
            ThemeRole::Development => "development",
            ThemeRole::Demo => "demo",
            ThemeRole::Other(role) => role,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, ThemeRole::Live)
    }
}

impl From<String> for ThemeRole {
    fn from(role: String) -> Self {
        match role.as_str() {
            "live" => ThemeRole::Live,
            "unpublished" => ThemeRole::Unpublished,
            "development" => ThemeRole::Development,
            "demo" => ThemeRole::Demo,
            _ => ThemeRole::Other(role),
        }
    }
}

impl From<&str> for ThemeRole {
    fn from(role: &str) -> Self {
        ThemeRole::from(role.to_string())
    }
}

impl From<ThemeRole> for String {
    fn from(role: ThemeRole) -> Self {
        match role {
            ThemeRole::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ThemeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A storefront theme as reported by `theme list --json`
///
/// Extra fields in the listing output are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Identifier assigned by the platform; higher means newer
    pub id: u64,
    /// Display name, not guaranteed unique
    pub name: String,
    pub role: ThemeRole,
}

impl Theme {
    pub fn new(id: u64, name: impl Into<String>, role: impl Into<ThemeRole>) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.role.is_live()
    }

    /// Label used for menu entries: `Name (ID: 123)`
    pub fn label(&self) -> String {
        format!("{} (ID: {})", self.name, self.id)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Parse the JSON array printed by the theme-listing command
pub fn parse_theme_list(json: &str) -> serde_json::Result<Vec<Theme>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_output() {
        let json = r#"[
            {"id": 1, "name": "Live", "role": "live", "processing": false},
            {"id": 5, "name": "New", "role": "unpublished"},
            {"id": 3, "name": "Old", "role": "development"}
        ]"#;

        let themes = parse_theme_list(json).unwrap();
        assert_eq!(themes.len(), 3);
        assert_eq!(themes[0], Theme::new(1, "Live", "live"));
        assert!(themes[0].is_live());
        assert_eq!(themes[1].role, ThemeRole::Unpublished);
        assert_eq!(themes[2].role, ThemeRole::Development);
    }

    #[test]
    fn test_unknown_role_is_preserved() {
        let themes = parse_theme_list(r#"[{"id": 9, "name": "X", "role": "locked"}]"#).unwrap();
        assert_eq!(themes[0].role, ThemeRole::Other("locked".to_string()));
        assert_eq!(themes[0].role.to_string(), "locked");
        assert!(!themes[0].is_live());
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(parse_theme_list(r#"[{"id": 1, "name": "No role"}]"#).is_err());
        assert!(parse_theme_list("not json").is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(Theme::new(42, "Dawn", "unpublished").label(), "Dawn (ID: 42)");
    }
}
