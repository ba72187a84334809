//! The contract every site connector implements.

use async_trait::async_trait;
use sitebridge_core::{
    ArticleInput, ContentList, ContentPage, Feature, ListFilters, PublishResult, SiteConfig,
    StatsSnapshot,
};
use sitebridge_fetch::ConnectorError;
use tracing::warn;

// ============================================================================
// Site Connector
// ============================================================================

/// Uniform operations on one remote provider family.
///
/// Connectors hold no per-site state: the same instance serves every site of
/// its type, so all methods take the [`SiteConfig`] explicitly.
///
/// Failure conventions:
///
/// - [`test_connection`](Self::test_connection) never fails; errors become `false`.
/// - [`fetch_stats`](Self::fetch_stats) never fails; errors become
///   [`StatsSnapshot::degraded`].
/// - [`fetch_post`](Self::fetch_post) and [`fetch_page`](Self::fetch_page)
///   return `Ok(None)` for a missing item and `Err` when the site is
///   unreachable or rejects the credentials.
/// - An invalid article is reported as an unsuccessful [`PublishResult`]
///   without any request being made.
#[async_trait]
pub trait SiteConnector: Send + Sync {
    /// Type key this connector is registered under.
    fn connector_type(&self) -> &str;

    /// Declared capabilities. Fixed per connector type.
    fn features(&self) -> &'static [Feature];

    /// Whether this connector type declares `feature`.
    fn supports(&self, feature: Feature) -> bool {
        self.features().contains(&feature)
    }

    /// Best-effort reachability and credentials probe.
    async fn test_connection(&self, site: &SiteConfig) -> bool;

    /// Creates a content item on the remote.
    async fn publish(
        &self,
        site: &SiteConfig,
        article: &ArticleInput,
    ) -> Result<PublishResult, ConnectorError>;

    /// Aggregate counts, degraded to zeros on failure.
    async fn fetch_stats(&self, site: &SiteConfig) -> StatsSnapshot;

    /// One page of posts.
    async fn fetch_posts(
        &self,
        site: &SiteConfig,
        filters: &ListFilters,
    ) -> Result<ContentList, ConnectorError>;

    /// A single post, `None` when it does not exist.
    async fn fetch_post(
        &self,
        site: &SiteConfig,
        id: &str,
    ) -> Result<Option<ContentPage>, ConnectorError>;

    /// One page of pages. Connectors without a page concept return an
    /// empty listing.
    async fn fetch_pages(
        &self,
        site: &SiteConfig,
        filters: &ListFilters,
    ) -> Result<ContentList, ConnectorError>;

    /// A single page, `None` when it does not exist.
    async fn fetch_page(
        &self,
        _site: &SiteConfig,
        _id: &str,
    ) -> Result<Option<ContentPage>, ConnectorError> {
        Ok(None)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Returns the unsuccessful result to report for an invalid article.
pub(crate) fn rejected_article(site: &SiteConfig, article: &ArticleInput) -> Option<PublishResult> {
    match article.validate() {
        Ok(()) => None,
        Err(e) => {
            warn!(site = %site.name, error = %e, "Refusing to publish invalid article");
            Some(PublishResult::failed(e.to_string()))
        }
    }
}

/// Joins a base URL and a relative endpoint with exactly one slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
