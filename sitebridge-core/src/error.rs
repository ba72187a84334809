//! Core error types for Sitebridge.

use thiserror::Error;

/// Core error type for configuration and validation problems.
///
/// None of these involve the network: they are raised before any request
/// is built.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No connector is registered for the requested site type.
    #[error("Unknown connector type: {kind}. Available types: {}", available.join(", "))]
    UnknownConnector {
        /// The type string that failed to resolve.
        kind: String,
        /// Registered type strings.
        available: Vec<String>,
    },

    /// Invalid site configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The article failed validation.
    #[error("Invalid article: {}", .0.join(" "))]
    InvalidArticle(Vec<String>),

    /// Unknown feature name.
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_connector_lists_available_types() {
        let err = CoreError::UnknownConnector {
            kind: "ghost".to_string(),
            available: vec!["wordpress".to_string(), "api".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown connector type: ghost. Available types: wordpress, api"
        );
    }

    #[test]
    fn test_invalid_article_joins_messages() {
        let err = CoreError::InvalidArticle(vec![
            "Le titre est requis.".to_string(),
            "Le contenu est requis.".to_string(),
        ]);
        assert!(err.to_string().contains("Le titre est requis. Le contenu est requis."));
    }
}
