//! Capability and configuration-schema types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Feature
// ============================================================================

/// A named capability a connector may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Create content remotely.
    Publish,
    /// Aggregate statistics.
    Stats,
    /// Category taxonomy.
    Categories,
    /// Tag taxonomy.
    Tags,
    /// Media / featured images.
    Media,
    /// Scheduled publication.
    Schedule,
    /// Draft status.
    Draft,
    /// Custom fields.
    CustomFields,
}

impl Feature {
    /// Returns the wire name of this feature.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Stats => "stats",
            Self::Categories => "categories",
            Self::Tags => "tags",
            Self::Media => "media",
            Self::Schedule => "schedule",
            Self::Draft => "draft",
            Self::CustomFields => "custom_fields",
        }
    }

    /// Returns every feature.
    pub fn all() -> &'static [Feature] {
        &[
            Self::Publish,
            Self::Stats,
            Self::Categories,
            Self::Tags,
            Self::Media,
            Self::Schedule,
            Self::Draft,
            Self::CustomFields,
        ]
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFeature(s.to_string()))
    }
}

// ============================================================================
// Config Fields
// ============================================================================

/// Input kind of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// A URL.
    Url,
    /// A secret.
    Password,
    /// Free text.
    Text,
    /// One of a fixed set of options.
    Select,
}

/// One choice of a [`FieldKind::Select`] field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Stored value.
    pub value: String,
    /// Display label.
    pub label: String,
}

/// A configuration field a connector expects, for building forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    /// Key in the site record (`url`, `apiToken`) or its config map.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Input kind.
    pub kind: FieldKind,
    /// Whether the field must be filled in.
    pub required: bool,
    /// Example value.
    pub placeholder: Option<String>,
    /// Help text.
    pub help: Option<String>,
    /// Choices for select fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl ConfigField {
    /// Creates an optional field.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            placeholder: None,
            help: None,
            options: Vec::new(),
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Adds a select option.
    #[must_use]
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(FieldOption {
            value: value.into(),
            label: label.into(),
        });
        self
    }
}
