//! Wire types and request builders for the WordPress companion plugin.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitebridge_core::{ArticleInput, ListFilters, RemoteId, SiteConfig};
use sitebridge_fetch::HttpRequest;

use crate::connector::join_url;
use crate::fields::lenient_count;

// ============================================================================
// Constants
// ============================================================================

/// REST namespace registered by the plugin.
pub const API_NAMESPACE: &str = "ma-plateforme/v1";

/// Status sent when the caller does not filter by status.
const ANY_STATUS: &str = "any";

/// Builds `<baseUrl>/wp-json/ma-plateforme/v1/<path>`.
pub fn endpoint(site: &SiteConfig, path: &str) -> String {
    join_url(
        &format!("{}/wp-json/{API_NAMESPACE}", site.trimmed_base_url()),
        path,
    )
}

/// Authenticated GET against a plugin endpoint.
pub(crate) fn get(site: &SiteConfig, path: &str) -> HttpRequest {
    HttpRequest::get(endpoint(site, path)).bearer(&site.api_token)
}

/// Authenticated listing request with pagination, status and search.
pub(crate) fn list(site: &SiteConfig, path: &str, filters: &ListFilters) -> HttpRequest {
    let filters = filters.normalized();
    let mut request = get(site, path)
        .query("page", filters.page)
        .query("per_page", filters.per_page)
        .query("status", filters.status.as_deref().unwrap_or(ANY_STATUS));
    if let Some(search) = &filters.search {
        request = request.query("search", search);
    }
    request
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /publish`.
#[derive(Debug, Serialize)]
pub struct PublishRequest<'a> {
    /// Title.
    pub title: &'a str,
    /// Content (HTML or Markdown, stored as-is).
    pub content: &'a str,
    /// Category names; the plugin creates missing ones.
    pub categories: &'a [String],
    /// Tag names.
    pub tags: &'a [String],
    /// `draft`, `publish`, `pending` or `private`.
    pub status: &'a str,
    /// Excerpt.
    pub excerpt: Option<&'a str>,
    /// Featured image URL, sideloaded by the plugin.
    pub featured_image: Option<&'a str>,
}

impl<'a> From<&'a ArticleInput> for PublishRequest<'a> {
    fn from(article: &'a ArticleInput) -> Self {
        Self {
            title: &article.title,
            content: &article.content,
            categories: &article.categories,
            tags: &article.tags,
            status: article.status.as_str(),
            excerpt: article.excerpt.as_deref(),
            featured_image: article.featured_image_url.as_deref(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Response of `POST /publish`.
#[derive(Debug, Deserialize)]
pub struct PublishResponse {
    /// Created post id.
    #[serde(default)]
    pub post_id: Option<RemoteId>,
    /// Public permalink.
    #[serde(default)]
    pub post_url: Option<String>,
    /// Admin edit link.
    #[serde(default)]
    pub edit_url: Option<String>,
    /// Final status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Response of `GET /stats`.
#[derive(Debug, Default, Deserialize)]
pub struct StatsResponse {
    /// Published posts.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_posts: u64,
    /// Categories.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_categories: u64,
    /// Tags.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_tags: u64,
    /// Published pages.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_pages: u64,
    /// Approved comments.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_comments: u64,
    /// Registered users.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_users: u64,
    /// Blog name.
    #[serde(default)]
    pub site_title: Option<String>,
    /// Blog tagline.
    #[serde(default)]
    pub site_description: Option<String>,
    /// WordPress core version.
    #[serde(default)]
    pub wordpress_version: Option<String>,
}

/// Response of `GET /posts`.
///
/// The total page count is named `pages` here but `pages_count` on
/// `GET /pages` (see [`PagesResponse`]). The plugin ships this asymmetry;
/// both names are kept for wire compatibility.
#[derive(Debug, Default, Deserialize)]
pub struct PostsResponse {
    /// Raw post objects.
    #[serde(default)]
    pub posts: Vec<Value>,
    /// Total matching posts.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: u64,
    /// Total page count.
    #[serde(default, deserialize_with = "lenient_count")]
    pub pages: u64,
}

/// Response of `GET /pages`. Total page count is `pages_count`.
#[derive(Debug, Default, Deserialize)]
pub struct PagesResponse {
    /// Raw page objects.
    #[serde(default)]
    pub pages: Vec<Value>,
    /// Total matching pages.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: u64,
    /// Total page count.
    #[serde(default, deserialize_with = "lenient_count")]
    pub pages_count: u64,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// `ok` when the plugin is active.
    #[serde(default)]
    pub status: String,
    /// Plugin version.
    #[serde(default, alias = "plugin_version")]
    pub plugin_version: Option<String>,
    /// WordPress core version.
    #[serde(default, alias = "wordpress_version")]
    pub wordpress_version: Option<String>,
    /// PHP version of the host.
    #[serde(default, alias = "php_version")]
    pub php_version: Option<String>,
    /// Server time, ISO 8601.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    /// Whether the plugin reported itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
