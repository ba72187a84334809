//! WordPress connector descriptor.

use sitebridge_core::{ConfigField, ConnectorDescriptor, ConnectorKind, Feature, FieldKind};

/// Capabilities of the WordPress connector.
pub const WORDPRESS_FEATURES: &[Feature] = &[
    Feature::Publish,
    Feature::Stats,
    Feature::Categories,
    Feature::Tags,
    Feature::Media,
    Feature::Schedule,
    Feature::Draft,
];

/// Catalog entry for WordPress sites.
pub fn wordpress_descriptor() -> ConnectorDescriptor {
    ConnectorDescriptor::builder(ConnectorKind::WordPress.as_str())
        .display_name("WordPress")
        .description(
            "Connectez vos sites WordPress via le plugin WPilot. Publiez des articles, \
             gerez les categories et suivez les statistiques.",
        )
        .icon("wordpress")
        .field(
            ConfigField::new("url", "URL du site", FieldKind::Url)
                .required()
                .placeholder("https://monsite.com")
                .help("L'URL de votre site WordPress (sans slash final)"),
        )
        .field(
            ConfigField::new("apiToken", "Token API", FieldKind::Password)
                .required()
                .placeholder("Votre token API")
                .help("Token genere par le plugin WPilot sur votre site WordPress"),
        )
        .features(WORDPRESS_FEATURES)
        .build()
}
