//! Publishing types.
//!
//! - [`ArticleInput`] - An immutable article handed to a publish call
//! - [`ArticleStatus`] - Remote publication status
//! - [`PublishResult`] - Outcome of one publish call

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Maximum title length, in characters.
pub const MAX_TITLE_CHARS: usize = 500;

// ============================================================================
// Article Status
// ============================================================================

/// Publication status requested for an article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Not visible to readers.
    #[default]
    Draft,
    /// Published immediately.
    Publish,
    /// Awaiting review.
    Pending,
    /// Visible to authorized users only.
    Private,
}

impl ArticleStatus {
    /// Returns the wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Publish => "publish",
            Self::Pending => "pending",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Article Input
// ============================================================================

/// An article to publish.
///
/// Categories and tags are names; they may not exist remotely yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    /// Article title.
    pub title: String,
    /// Raw markup or text.
    pub content: String,
    /// Requested status.
    #[serde(default)]
    pub status: ArticleStatus,
    /// Category names, in order.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Tag names, in order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional summary.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Optional featured image URL.
    #[serde(default)]
    pub featured_image_url: Option<String>,
}

impl ArticleInput {
    /// Creates a draft article with no taxonomy.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            status: ArticleStatus::Draft,
            categories: Vec::new(),
            tags: Vec::new(),
            excerpt: None,
            featured_image_url: None,
        }
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: ArticleStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the categories.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the excerpt.
    #[must_use]
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Sets the featured image URL.
    #[must_use]
    pub fn with_featured_image(mut self, url: impl Into<String>) -> Self {
        self.featured_image_url = Some(url.into());
        self
    }

    /// Returns true if the article is a draft.
    pub fn is_draft(&self) -> bool {
        self.status == ArticleStatus::Draft
    }

    /// Checks title and content constraints, reporting every violation.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Le titre de l'article est requis.".to_string());
        }
        if self.title.chars().count() > MAX_TITLE_CHARS {
            errors.push(format!(
                "Le titre ne peut pas depasser {MAX_TITLE_CHARS} caracteres."
            ));
        }
        if self.content.trim().is_empty() {
            errors.push("Le contenu de l'article est requis.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidArticle(errors))
        }
    }
}

// ============================================================================
// Publish Result
// ============================================================================

/// Identifier assigned by the remote: a database id or an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    /// Numeric id (WordPress post id, most REST APIs).
    Number(i64),
    /// Opaque id (commit SHA, file path, document id).
    Text(String),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Outcome of a publish call. Not persisted by the connectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    /// Whether the remote item was created.
    pub success: bool,
    /// Remote identifier, when known.
    pub remote_id: Option<RemoteId>,
    /// Public URL, when known.
    pub url: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl PublishResult {
    /// A successful publication.
    pub fn published(
        remote_id: Option<RemoteId>,
        url: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            remote_id,
            url,
            message: message.into(),
        }
    }

    /// A failed publication.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            remote_id: None,
            url: None,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        let article = ArticleInput::new("Hello", "<p>Body</p>");
        assert!(article.validate().is_ok());
        assert!(article.is_draft());
    }

    #[test]
    fn test_validate_reports_all_errors() {
        let article = ArticleInput::new("   ", "");
        match article.validate() {
            Err(CoreError::InvalidArticle(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_validate_title_length_counts_chars() {
        let exact = ArticleInput::new("é".repeat(MAX_TITLE_CHARS), "body");
        assert!(exact.validate().is_ok());

        let long = ArticleInput::new("a".repeat(MAX_TITLE_CHARS + 1), "body");
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_remote_id_untagged() {
        let n: RemoteId = serde_json::from_str("123").unwrap();
        assert_eq!(n, RemoteId::Number(123));
        let s: RemoteId = serde_json::from_str(r#""abc123""#).unwrap();
        assert_eq!(s.to_string(), "abc123");
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&ArticleStatus::Publish).unwrap(), r#""publish""#);
        assert_eq!(ArticleStatus::default(), ArticleStatus::Draft);
    }
}
