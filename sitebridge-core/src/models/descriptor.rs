//! Static connector metadata used to build catalogs and configuration forms.

use serde::{Deserialize, Serialize};

use super::capability::{ConfigField, Feature};

// ============================================================================
// Connector Descriptor
// ============================================================================

/// Presentation metadata for one connector type.
///
/// Descriptors have no runtime behavior: they are read by catalogs and
/// configuration UIs, never by the connectors themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorDescriptor {
    /// Type key matched against `SiteConfig::site_type`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name.
    pub display_name: String,
    /// One-line description.
    pub description: String,
    /// Icon identifier.
    pub icon: String,
    /// Configuration fields, in display order.
    pub configuration_fields: Vec<ConfigField>,
    /// Declared capabilities.
    pub features: Vec<Feature>,
}

impl ConnectorDescriptor {
    /// Creates a new descriptor builder.
    pub fn builder(kind: impl Into<String>) -> ConnectorDescriptorBuilder {
        ConnectorDescriptorBuilder::new(kind)
    }

    /// Whether the descriptor declares `feature`.
    pub fn supports(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// Looks up a configuration field by name.
    pub fn field(&self, name: &str) -> Option<&ConfigField> {
        self.configuration_fields.iter().find(|f| f.name == name)
    }

    /// Names of the required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.configuration_fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ConnectorDescriptor`].
#[derive(Debug, Clone)]
pub struct ConnectorDescriptorBuilder {
    kind: String,
    display_name: Option<String>,
    description: String,
    icon: String,
    fields: Vec<ConfigField>,
    features: Vec<Feature>,
}

impl ConnectorDescriptorBuilder {
    /// Creates a new builder for the given type key.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            display_name: None,
            description: String::new(),
            icon: String::new(),
            fields: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the icon.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Appends a configuration field.
    #[must_use]
    pub fn field(mut self, field: ConfigField) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the declared features.
    #[must_use]
    pub fn features(mut self, features: &[Feature]) -> Self {
        self.features = features.to_vec();
        self
    }

    /// Builds the descriptor. The display name defaults to the type key.
    pub fn build(self) -> ConnectorDescriptor {
        ConnectorDescriptor {
            display_name: self.display_name.unwrap_or_else(|| self.kind.clone()),
            kind: self.kind,
            description: self.description,
            icon: self.icon,
            configuration_fields: self.fields,
            features: self.features,
        }
    }
}
