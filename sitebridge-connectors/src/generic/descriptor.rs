//! Generic REST API connector descriptor.

use sitebridge_core::{ConfigField, ConnectorDescriptor, ConnectorKind, Feature, FieldKind};

/// Capabilities of the generic REST API connector.
pub const GENERIC_FEATURES: &[Feature] = &[Feature::Publish, Feature::Stats];

/// Catalog entry for user-configured REST APIs.
pub fn generic_descriptor() -> ConnectorDescriptor {
    ConnectorDescriptor::builder(ConnectorKind::Api.as_str())
        .display_name("API REST")
        .description(
            "Connectez n'importe quel CMS ou application via une API REST. \
             Configurez vos endpoints personnalises.",
        )
        .icon("api")
        .field(
            ConfigField::new("url", "URL de base de l'API", FieldKind::Url)
                .required()
                .placeholder("https://api.monsite.com/v1")
                .help("L'URL de base de votre API REST"),
        )
        .field(
            ConfigField::new("apiToken", "Token d'authentification", FieldKind::Password)
                .required()
                .placeholder("Bearer token ou API key")
                .help("Token d'authentification pour l'API"),
        )
        .field(
            ConfigField::new("authType", "Type d'authentification", FieldKind::Select)
                .required()
                .option("bearer", "Bearer Token")
                .option("api_key", "API Key (header)")
                .option("basic", "Basic Auth")
                .help("Methode d'authentification utilisee par l'API"),
        )
        .field(
            ConfigField::new("publishEndpoint", "Endpoint de publication", FieldKind::Text)
                .placeholder("/posts")
                .help("Chemin relatif pour publier du contenu (POST)"),
        )
        .field(
            ConfigField::new("postsEndpoint", "Endpoint des articles", FieldKind::Text)
                .placeholder("/posts")
                .help("Chemin relatif pour lister les articles (GET)"),
        )
        .field(
            ConfigField::new("statsEndpoint", "Endpoint de statistiques", FieldKind::Text)
                .placeholder("/stats")
                .help("Chemin relatif pour recuperer les statistiques (GET)"),
        )
        .features(GENERIC_FEATURES)
        .build()
}
