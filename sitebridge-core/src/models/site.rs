//! Site configuration types.
//!
//! - [`ConnectorKind`] - Built-in connector families
//! - [`SiteConfig`] - A remote target, owned and persisted by the caller
//! - [`ConfigValue`] - Adapter-specific configuration values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Connector Kind
// ============================================================================

/// Built-in connector families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    /// WordPress install running the companion plugin.
    WordPress,
    /// Any REST API with configurable endpoints.
    Api,
    /// Static site stored in a GitHub or GitLab repository.
    Git,
}

impl ConnectorKind {
    /// Returns the type string stored in site records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WordPress => "wordpress",
            Self::Api => "api",
            Self::Git => "git",
        }
    }

    /// Returns all built-in kinds, in catalog order.
    pub fn all() -> &'static [ConnectorKind] {
        &[Self::WordPress, Self::Api, Self::Git]
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownConnector {
                kind: s.to_string(),
                available: Self::all().iter().map(|k| k.as_str().to_string()).collect(),
            })
    }
}

// ============================================================================
// Config Value
// ============================================================================

/// A value in a site's adapter-specific configuration map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A single string.
    Text(String),
    /// A list of strings.
    List(Vec<String>),
}

impl ConfigValue {
    /// Returns the string value, if this is a [`ConfigValue::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

// ============================================================================
// Site Config
// ============================================================================

/// A remote site as handed to the connectors.
///
/// The connectors only read this value. Keys in `config` are interpreted by
/// the adapter selected through `site_type`, never globally.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Display name of the site.
    pub name: String,
    /// Connector type string (`wordpress`, `api`, `git`, or a custom type).
    #[serde(rename = "type")]
    pub site_type: String,
    /// Base URL (site URL, API root, or repository URL).
    pub base_url: String,
    /// Secret used to authenticate against the remote.
    #[serde(default, skip_serializing)]
    pub api_token: String,
    /// Adapter-specific configuration.
    #[serde(default)]
    pub config: BTreeMap<String, ConfigValue>,
}

impl SiteConfig {
    /// Creates a site with an empty configuration map.
    pub fn new(
        name: impl Into<String>,
        site_type: impl Into<String>,
        base_url: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            site_type: site_type.into(),
            base_url: base_url.into(),
            api_token: api_token.into(),
            config: BTreeMap::new(),
        }
    }

    /// Adds a configuration entry.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Returns the built-in kind, if `site_type` names one.
    pub fn kind(&self) -> Option<ConnectorKind> {
        self.site_type.parse().ok()
    }

    /// Base URL without trailing slashes.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns a non-empty string configuration value.
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config
            .get(key)
            .and_then(ConfigValue::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Returns a string configuration value or `default`.
    pub fn config_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.config_str(key).unwrap_or(default)
    }

    /// Returns a list configuration value. A single string becomes a
    /// one-element list.
    pub fn config_list(&self, key: &str) -> Vec<String> {
        match self.config.get(key) {
            Some(ConfigValue::List(items)) => items.clone(),
            Some(ConfigValue::Text(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
            _ => Vec::new(),
        }
    }
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("name", &self.name)
            .field("site_type", &self.site_type)
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}
