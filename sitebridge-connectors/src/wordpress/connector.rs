//! WordPress connector over the companion plugin's REST API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sitebridge_core::{
    ArticleInput, ContentKind, ContentList, ContentPage, Feature, ListFilters, PublishResult,
    SiteConfig, StatsSnapshot, Term,
};
use sitebridge_fetch::{ConnectorError, HttpRequest, RequestExecutor};
use tracing::{debug, error, info, instrument, warn};

use super::api::{self, HealthStatus, PagesResponse, PostsResponse, PublishRequest, PublishResponse, StatsResponse};
use super::descriptor::WORDPRESS_FEATURES;
use super::parser;
use crate::connector::{SiteConnector, rejected_article};

/// Connector for WordPress sites running the companion plugin.
///
/// Every call sends `Authorization: Bearer <apiToken>`.
#[derive(Debug, Clone)]
pub struct WordPressConnector {
    executor: RequestExecutor,
}

impl WordPressConnector {
    /// Creates a connector sharing the given executor.
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    async fn get_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ConnectorError> {
        let url = request.url.clone();
        let value = self.executor.send_json(request).await?;
        decode(value, &url)
    }

    /// Fetches stats, surfacing failures instead of degrading.
    ///
    /// A rejected token yields [`sitebridge_fetch::ErrorKind::InvalidToken`].
    #[instrument(skip(self, site), fields(site = %site.name))]
    pub async fn try_fetch_stats(&self, site: &SiteConfig) -> Result<StatsSnapshot, ConnectorError> {
        let response: StatsResponse = self.get_json(api::get(site, "stats")).await?;
        Ok(parser::parse_stats(response))
    }

    /// Calls the plugin's liveness probe.
    #[instrument(skip(self, site), fields(site = %site.name))]
    pub async fn health(&self, site: &SiteConfig) -> Result<HealthStatus, ConnectorError> {
        self.get_json(api::get(site, "health")).await
    }

    /// Lists categories, empty on failure.
    pub async fn fetch_categories(&self, site: &SiteConfig) -> Vec<Term> {
        self.fetch_terms(site, "categories").await
    }

    /// Lists tags, empty on failure.
    pub async fn fetch_tags(&self, site: &SiteConfig) -> Vec<Term> {
        self.fetch_terms(site, "tags").await
    }

    #[instrument(skip(self, site), fields(site = %site.name))]
    async fn fetch_terms(&self, site: &SiteConfig, taxonomy: &str) -> Vec<Term> {
        match self.executor.send_json(api::get(site, taxonomy)).await {
            Ok(value) => parser::parse_terms(&value),
            Err(e) => {
                warn!(taxonomy, error = %e, "Failed to fetch terms");
                Vec::new()
            }
        }
    }

    async fn fetch_single(
        &self,
        site: &SiteConfig,
        collection: &str,
        id: &str,
        kind: ContentKind,
    ) -> Result<Option<ContentPage>, ConnectorError> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(None);
        }

        match self.executor.send_json(api::get(site, &format!("{collection}/{id}"))).await {
            Ok(value) => Ok(parser::parse_content(&value, kind)),
            Err(e) if e.is_not_found() => {
                debug!(collection, id, "Item not found");
                Ok(None)
            }
            Err(e) => {
                error!(site = %site.name, collection, id, error = %e, "Failed to fetch item");
                Err(e)
            }
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value, url: &str) -> Result<T, ConnectorError> {
    serde_json::from_value(value).map_err(|e| {
        ConnectorError::invalid_response(format!("Unexpected payload from {url}: {e}")).with_source(e)
    })
}

#[async_trait]
impl SiteConnector for WordPressConnector {
    fn connector_type(&self) -> &str {
        "wordpress"
    }

    fn features(&self) -> &'static [Feature] {
        WORDPRESS_FEATURES
    }

    async fn test_connection(&self, site: &SiteConfig) -> bool {
        match self.try_fetch_stats(site).await {
            Ok(_) => true,
            Err(e) => {
                warn!(site = %site.name, error = %e, "WordPress connection test failed");
                false
            }
        }
    }

    #[instrument(skip(self, site, article), fields(site = %site.name, title = %article.title))]
    async fn publish(
        &self,
        site: &SiteConfig,
        article: &ArticleInput,
    ) -> Result<PublishResult, ConnectorError> {
        if let Some(rejected) = rejected_article(site, article) {
            return Ok(rejected);
        }

        info!("Publishing article to WordPress");
        let request = HttpRequest::post(api::endpoint(site, "publish"))
            .bearer(&site.api_token)
            .json(serde_json::to_value(PublishRequest::from(article)).map_err(|e| {
                ConnectorError::configuration(format!("Cannot encode article: {e}"))
            })?);

        let response: PublishResponse = match self.get_json(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Failed to publish to WordPress");
                return Err(e);
            }
        };

        debug!(status = ?response.status, edit_url = ?response.edit_url, "Article created");
        Ok(PublishResult::published(
            response.post_id,
            response.post_url,
            "Article publie avec succes",
        ))
    }

    async fn fetch_stats(&self, site: &SiteConfig) -> StatsSnapshot {
        self.try_fetch_stats(site).await.unwrap_or_else(|e| {
            error!(site = %site.name, error = %e, "Failed to fetch WordPress stats");
            StatsSnapshot::degraded(&site.name)
        })
    }

    #[instrument(skip(self, site), fields(site = %site.name))]
    async fn fetch_posts(
        &self,
        site: &SiteConfig,
        filters: &ListFilters,
    ) -> Result<ContentList, ConnectorError> {
        let response: PostsResponse = self.get_json(api::list(site, "posts", filters)).await?;
        Ok(parser::parse_posts(response))
    }

    async fn fetch_post(
        &self,
        site: &SiteConfig,
        id: &str,
    ) -> Result<Option<ContentPage>, ConnectorError> {
        self.fetch_single(site, "posts", id, ContentKind::Post).await
    }

    #[instrument(skip(self, site), fields(site = %site.name))]
    async fn fetch_pages(
        &self,
        site: &SiteConfig,
        filters: &ListFilters,
    ) -> Result<ContentList, ConnectorError> {
        let response: PagesResponse = self.get_json(api::list(site, "pages", filters)).await?;
        Ok(parser::parse_pages(response))
    }

    async fn fetch_page(
        &self,
        site: &SiteConfig,
        id: &str,
    ) -> Result<Option<ContentPage>, ConnectorError> {
        self.fetch_single(site, "pages", id, ContentKind::Page).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;
    use sitebridge_core::{ArticleStatus, RemoteId};
    use sitebridge_fetch::testing::ScriptedTransport;
    use sitebridge_fetch::{ErrorKind, Method, RetryPolicy, TransportError};

    use super::*;

    fn site() -> SiteConfig {
        SiteConfig::new("Mon Blog", "wordpress", "https://blog.example", "secret-token")
    }

    fn connector(transport: &Arc<ScriptedTransport>) -> WordPressConnector {
        WordPressConnector::new(
            RequestExecutor::new(transport.clone())
                .with_policy(RetryPolicy::default().with_base_delay(Duration::ZERO)),
        )
    }

    fn article() -> ArticleInput {
        ArticleInput::new("Hello", "<p>World</p>")
            .with_status(ArticleStatus::Publish)
            .with_tags(["rust"])
    }

    #[tokio::test]
    async fn test_publish_retries_server_error() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(500, "oops")
                .respond_json(201, json!({"success": true, "post_id": 321, "post_url": "https://blog.example/hello/"})),
        );
        let result = connector(&transport).publish(&site(), &article()).await.unwrap();

        assert!(result.success);
        assert_eq!(result.remote_id, Some(RemoteId::Number(321)));
        assert_eq!(result.url.as_deref(), Some("https://blog.example/hello/"));
        assert_eq!(transport.call_count(), 2);

        let sent = &transport.requests()[1];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "https://blog.example/wp-json/ma-plateforme/v1/publish");
        assert_eq!(sent.header_value("Authorization"), Some("Bearer secret-token"));
        assert_eq!(sent.body.as_ref().unwrap()["tags"], json!(["rust"]));
    }

    #[tokio::test]
    async fn test_publish_surfaces_auth_failure() {
        let transport = Arc::new(ScriptedTransport::new().respond(403, r#"{"message":"no"}"#));
        let err = connector(&transport).publish(&site(), &article()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessForbidden);
    }

    #[tokio::test]
    async fn test_publish_invalid_article_makes_no_call() {
        let transport = Arc::new(ScriptedTransport::new());
        let result = connector(&transport)
            .publish(&site(), &ArticleInput::new("", "body"))
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_try_fetch_stats_invalid_token() {
        let transport = Arc::new(ScriptedTransport::new().respond(401, r#"{"message":"bad token"}"#));
        let err = connector(&transport).try_fetch_stats(&site()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidToken);
        assert!(err.user_message().contains("invalide"));
        assert!(!err.is_retryable());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_stats_degrades() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .fail(TransportError::connect("refused"))
                .fail(TransportError::connect("refused")),
        );
        let stats = connector(&transport).fetch_stats(&site()).await;

        assert!(stats.is_empty());
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.site_title.as_deref(), Some("Mon Blog"));
    }

    #[tokio::test]
    async fn test_fetch_stats_maps_payload() {
        let transport = Arc::new(ScriptedTransport::new().respond_json(200, json!({
            "total_posts": 12,
            "total_categories": 4,
            "total_tags": 9,
            "total_pages": 3,
            "total_comments": 27,
            "total_users": 2,
            "site_title": "Blog",
            "site_description": "Tagline",
            "wordpress_version": "6.4.2",
            "plugin_version": "1.0.0"
        })));
        let stats = connector(&transport).fetch_stats(&site()).await;

        assert_eq!(stats.total_posts, 12);
        assert_eq!(stats.total_comments, 27);
        assert_eq!(stats.site_description.as_deref(), Some("Tagline"));
        assert_eq!(stats.platform_version.as_deref(), Some("6.4.2"));
    }

    #[tokio::test]
    async fn test_test_connection() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond_json(200, json!({"total_posts": 1}))
                .respond(401, ""),
        );
        let wp = connector(&transport);
        assert!(wp.test_connection(&site()).await);
        assert!(!wp.test_connection(&site()).await);
    }

    #[tokio::test]
    async fn test_fetch_posts_sends_filters() {
        let transport = Arc::new(ScriptedTransport::new().respond_json(200, json!({
            "posts": [{"id": 1, "title": "One"}, {"id": 2, "title": "Two"}],
            "total": 12,
            "pages": 6
        })));
        let list = connector(&transport)
            .fetch_posts(&site(), &ListFilters::page(2).with_per_page(2).with_search("rust"))
            .await
            .unwrap();

        assert_eq!(list.items.len(), 2);
        assert_eq!(list.total, 12);
        assert_eq!(list.page_count, 6);

        let sent = &transport.requests()[0];
        assert_eq!(sent.query_value("page"), Some("2"));
        assert_eq!(sent.query_value("per_page"), Some("2"));
        assert_eq!(sent.query_value("search"), Some("rust"));
        assert_eq!(sent.query_value("status"), Some("any"));
    }

    #[tokio::test]
    async fn test_fetch_pages_reads_pages_count() {
        let transport = Arc::new(ScriptedTransport::new().respond_json(200, json!({
            "pages": [{"id": 9, "title": "About", "type": "page"}],
            "total": 1,
            "pages_count": 1
        })));
        let list = connector(&transport)
            .fetch_pages(&site(), &ListFilters::default())
            .await
            .unwrap();

        assert_eq!(list.page_count, 1);
        assert_eq!(list.items[0].kind, ContentKind::Page);
        assert!(transport.requests()[0].url.ends_with("/pages"));
    }

    #[tokio::test]
    async fn test_fetch_post_not_found_is_none() {
        let transport = Arc::new(ScriptedTransport::new().respond(404, r#"{"code":"not_found"}"#));
        let post = connector(&transport).fetch_post(&site(), "999").await.unwrap();
        assert!(post.is_none());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_post_unreachable_is_error() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .fail(TransportError::timeout("slow"))
                .fail(TransportError::timeout("slow")),
        );
        let err = connector(&transport).fetch_post(&site(), "1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_fetch_page_found() {
        let transport = Arc::new(ScriptedTransport::new().respond_json(200, json!({"id": 5, "title": "Contact"})));
        let page = connector(&transport).fetch_page(&site(), "5").await.unwrap().unwrap();
        assert_eq!(page.title, "Contact");
        assert!(transport.requests()[0].url.ends_with("/pages/5"));
    }

    #[tokio::test]
    async fn test_terms_degrade_to_empty() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond_json(200, json!([{"id": 1, "name": "News", "slug": "news", "count": 3}]))
                .respond(403, ""),
        );
        let wp = connector(&transport);
        assert_eq!(wp.fetch_categories(&site()).await.len(), 1);
        assert!(wp.fetch_tags(&site()).await.is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let transport = Arc::new(ScriptedTransport::new().respond_json(200, json!({
            "status": "ok", "plugin_version": "1.0.0", "wordpress_version": "6.5"
        })));
        let health = connector(&transport).health(&site()).await.unwrap();
        assert!(health.is_ok());
        assert_eq!(health.wordpress_version.as_deref(), Some("6.5"));
    }

    #[test]
    fn test_supports_is_static() {
        let transport = Arc::new(ScriptedTransport::new());
        let wp = connector(&transport);
        assert!(wp.supports(Feature::Media));
        assert!(wp.supports(Feature::Schedule));
        assert!(!wp.supports(Feature::CustomFields));
        assert_eq!(transport.call_count(), 0);
    }
}
