//! Git connector descriptor.

use sitebridge_core::{ConfigField, ConnectorDescriptor, ConnectorKind, Feature, FieldKind};

/// Capabilities of the Git connector.
pub const GIT_FEATURES: &[Feature] = &[
    Feature::Publish,
    Feature::Categories,
    Feature::Tags,
    Feature::Draft,
];

/// Catalog entry for static sites stored in a Git repository.
pub fn git_descriptor() -> ConnectorDescriptor {
    ConnectorDescriptor::builder(ConnectorKind::Git.as_str())
        .display_name("Git / Sites Statiques")
        .description(
            "Publiez sur des sites statiques (Hugo, Jekyll, Gatsby, Astro) via Git. \
             Les articles sont crees en Markdown et commites automatiquement.",
        )
        .icon("git")
        .field(
            ConfigField::new("url", "URL du repository", FieldKind::Url)
                .required()
                .placeholder("https://github.com/user/repo")
                .help("URL du repository Git (GitHub, GitLab, Bitbucket)"),
        )
        .field(
            ConfigField::new("apiToken", "Token d'acces", FieldKind::Password)
                .required()
                .placeholder("ghp_xxxxxxxxxxxx")
                .help("Personal Access Token avec droits d'ecriture sur le repo"),
        )
        .field(
            ConfigField::new("provider", "Provider Git", FieldKind::Select)
                .required()
                .option("github", "GitHub")
                .option("gitlab", "GitLab")
                .option("bitbucket", "Bitbucket")
                .help("Plateforme hebergeant votre repository"),
        )
        .field(
            ConfigField::new("branch", "Branche", FieldKind::Text)
                .placeholder("main")
                .help("Branche sur laquelle publier (defaut: main)"),
        )
        .field(
            ConfigField::new("contentPath", "Chemin du contenu", FieldKind::Text)
                .placeholder("content/posts")
                .help("Dossier ou creer les fichiers markdown"),
        )
        .field(
            ConfigField::new("siteGenerator", "Generateur de site", FieldKind::Select)
                .option("hugo", "Hugo")
                .option("jekyll", "Jekyll")
                .option("gatsby", "Gatsby")
                .option("astro", "Astro")
                .option("eleventy", "Eleventy (11ty)")
                .option("nextjs", "Next.js")
                .option("other", "Autre")
                .help("Type de generateur pour adapter le format du frontmatter"),
        )
        .field(
            ConfigField::new("siteUrl", "URL du site publie", FieldKind::Url)
                .placeholder("https://monblog.com")
                .help("URL du site une fois deploye (pour les liens)"),
        )
        .field(
            ConfigField::new("pagesPath", "Chemin des pages", FieldKind::Text)
                .placeholder("content/pages")
                .help("Dossier contenant les pages statiques (optionnel)"),
        )
        .features(GIT_FEATURES)
        .build()
}
