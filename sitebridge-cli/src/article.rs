//! Article loading from Markdown files.

use std::path::Path;

use anyhow::{Context, Result};
use sitebridge_connectors::git::MarkdownFile;
use sitebridge_core::{ArticleInput, ArticleStatus};

/// Reads an article from a Markdown file with an optional frontmatter block.
///
/// The title falls back to the file stem. Without an explicit `status`
/// field, drafts are detected from `draft`/`published` and everything else
/// is published.
pub fn load_article(path: &Path) -> Result<ArticleInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read article {}", path.display()))?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(article_from_markdown(&text, &stem))
}

/// Builds an article from Markdown source.
pub fn article_from_markdown(text: &str, fallback_title: &str) -> ArticleInput {
    let file = MarkdownFile::parse(text);

    let status = file
        .get(&["status"])
        .and_then(parse_status)
        .unwrap_or(if file.is_draft() {
            ArticleStatus::Draft
        } else {
            ArticleStatus::Publish
        });

    let mut article = ArticleInput::new(
        file.get(&["title"]).unwrap_or(fallback_title),
        file.body.trim_start(),
    )
    .with_status(status)
    .with_categories(file.list("categories"))
    .with_tags(file.list("tags"));

    if let Some(excerpt) = file.get(&["excerpt", "description"]) {
        article = article.with_excerpt(excerpt);
    }
    if let Some(image) = file.get(&["image", "cover", "featured_image"]) {
        article = article.with_featured_image(image);
    }
    article
}

/// Parses a status name.
pub fn parse_status(value: &str) -> Option<ArticleStatus> {
    match value.trim().to_ascii_lowercase().as_str() {
        "draft" => Some(ArticleStatus::Draft),
        "publish" | "published" => Some(ArticleStatus::Publish),
        "pending" => Some(ArticleStatus::Pending),
        "private" => Some(ArticleStatus::Private),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_from_frontmatter() {
        let text = "---\ntitle: \"Bonjour\"\ntags: [rust, web]\ncategories: news\ndescription: Court\nimage: /img.png\n---\n\nCorps du texte\n";
        let article = article_from_markdown(text, "fallback");

        assert_eq!(article.title, "Bonjour");
        assert_eq!(article.content, "Corps du texte\n");
        assert_eq!(article.status, ArticleStatus::Publish);
        assert_eq!(article.tags, vec!["rust", "web"]);
        assert_eq!(article.categories, vec!["news"]);
        assert_eq!(article.excerpt.as_deref(), Some("Court"));
        assert_eq!(article.featured_image_url.as_deref(), Some("/img.png"));
    }

    #[test]
    fn test_draft_and_explicit_status() {
        let draft = article_from_markdown("---\ntitle: T\ndraft: true\n---\nBody", "x");
        assert_eq!(draft.status, ArticleStatus::Draft);

        let pending = article_from_markdown("---\ntitle: T\ndraft: true\nstatus: pending\n---\nBody", "x");
        assert_eq!(pending.status, ArticleStatus::Pending);
    }

    #[test]
    fn test_plain_markdown_uses_fallback_title() {
        let article = article_from_markdown("Just a body", "my-note");
        assert_eq!(article.title, "my-note");
        assert_eq!(article.content, "Just a body");
        assert!(article.validate().is_ok());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("Published"), Some(ArticleStatus::Publish));
        assert_eq!(parse_status("private"), Some(ArticleStatus::Private));
        assert_eq!(parse_status("scheduled"), None);
    }
}
