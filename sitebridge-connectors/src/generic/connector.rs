//! Connector for arbitrary REST APIs with configurable endpoints.

use async_trait::async_trait;
use serde_json::json;
use sitebridge_core::{
    ArticleInput, ContentList, ContentPage, Feature, ListFilters, PublishResult, SiteConfig,
    StatsSnapshot,
};
use sitebridge_fetch::{ConnectorError, HttpRequest, RequestExecutor};
use tracing::{debug, error, info, instrument, warn};

use super::auth::AuthScheme;
use super::descriptor::GENERIC_FEATURES;
use super::parser;
use crate::connector::{SiteConnector, join_url, rejected_article};

const DEFAULT_PUBLISH_ENDPOINT: &str = "/posts";
const DEFAULT_POSTS_ENDPOINT: &str = "/posts";
const DEFAULT_STATS_ENDPOINT: &str = "/stats";
const DEFAULT_HEALTH_ENDPOINT: &str = "/health";

// ============================================================================
// Configuration
// ============================================================================

/// Typed view of a generic site's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericApiConfig {
    /// Header layout for the token.
    pub auth: AuthScheme,
    /// Relative path for `POST` publish calls.
    pub publish_endpoint: String,
    /// Relative path for listings and single items.
    pub posts_endpoint: String,
    /// Relative path for stats, when configured.
    pub stats_endpoint: Option<String>,
}

impl GenericApiConfig {
    /// Reads the configuration, applying defaults.
    pub fn from_site(site: &SiteConfig) -> Self {
        Self {
            auth: AuthScheme::from_config(site.config_str("authType")),
            publish_endpoint: site.config_or("publishEndpoint", DEFAULT_PUBLISH_ENDPOINT).to_string(),
            posts_endpoint: site.config_or("postsEndpoint", DEFAULT_POSTS_ENDPOINT).to_string(),
            stats_endpoint: site.config_str("statsEndpoint").map(String::from),
        }
    }

    /// Endpoint probed by connection tests: stats, else `/health`.
    pub fn probe_endpoint(&self) -> &str {
        self.stats_endpoint.as_deref().unwrap_or(DEFAULT_HEALTH_ENDPOINT)
    }

    /// Endpoint read for stats.
    pub fn stats_endpoint(&self) -> &str {
        self.stats_endpoint.as_deref().unwrap_or(DEFAULT_STATS_ENDPOINT)
    }
}

// ============================================================================
// Connector
// ============================================================================

/// Connector for user-configured REST APIs.
///
/// Search and status filters are not part of the generic protocol and are
/// ignored. There is no page concept: page listings are always empty.
#[derive(Debug, Clone)]
pub struct GenericApiConnector {
    executor: RequestExecutor,
}

impl GenericApiConnector {
    /// Creates a connector sharing the given executor.
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    fn request(site: &SiteConfig, config: &GenericApiConfig, request: HttpRequest) -> HttpRequest {
        config.auth.apply(request, &site.api_token)
    }

    fn get(site: &SiteConfig, config: &GenericApiConfig, path: &str) -> HttpRequest {
        Self::request(site, config, HttpRequest::get(join_url(&site.base_url, path)))
    }

    /// Fetches stats, surfacing failures instead of degrading.
    #[instrument(skip(self, site), fields(site = %site.name))]
    pub async fn try_fetch_stats(&self, site: &SiteConfig) -> Result<StatsSnapshot, ConnectorError> {
        let config = GenericApiConfig::from_site(site);
        let value = self
            .executor
            .send_json(Self::get(site, &config, config.stats_endpoint()))
            .await?;
        Ok(parser::parse_stats(&value, &site.name))
    }
}

#[async_trait]
impl SiteConnector for GenericApiConnector {
    fn connector_type(&self) -> &str {
        "api"
    }

    fn features(&self) -> &'static [Feature] {
        GENERIC_FEATURES
    }

    async fn test_connection(&self, site: &SiteConfig) -> bool {
        let config = GenericApiConfig::from_site(site);
        match self
            .executor
            .send_json(Self::get(site, &config, config.probe_endpoint()))
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(site = %site.name, error = %e, "Generic API connection test failed");
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

        let config = GenericApiConfig::from_site(site);
        let url = join_url(&site.base_url, &config.publish_endpoint);
        info!(url = %url, "Publishing article via generic API");

        let payload = json!({
            "title": article.title,
            "content": article.content,
            "excerpt": article.excerpt,
            "status": article.status.as_str(),
            "categories": article.categories,
            "tags": article.tags,
        });
        let request = Self::request(site, &config, HttpRequest::post(url).json(payload));

        match self.executor.send_json(request).await {
            Ok(value) => Ok(parser::parse_publish(&value)),
            Err(e) => {
                error!(error = %e, "Failed to publish via generic API");
                Err(e)
            }
        }
    }

    async fn fetch_stats(&self, site: &SiteConfig) -> StatsSnapshot {
        self.try_fetch_stats(site).await.unwrap_or_else(|e| {
            error!(site = %site.name, error = %e, "Failed to fetch stats via generic API");
            StatsSnapshot::degraded(&site.name)
        })
    }

    #[instrument(skip(self, site), fields(site = %site.name))]
    async fn fetch_posts(
        &self,
        site: &SiteConfig,
        filters: &ListFilters,
    ) -> Result<ContentList, ConnectorError> {
        let config = GenericApiConfig::from_site(site);
        let filters = filters.normalized();
        if filters.search.is_some() || filters.status.is_some() {
            debug!("Generic API ignores search and status filters");
        }

        let request = Self::get(site, &config, &config.posts_endpoint)
            .query("page", filters.page)
            .query("per_page", filters.per_page);
        let value = self.executor.send_json(request).await?;
        Ok(parser::parse_list(&value, &filters))
    }

    async fn fetch_post(
        &self,
        site: &SiteConfig,
        id: &str,
    ) -> Result<Option<ContentPage>, ConnectorError> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(None);
        }

        let config = GenericApiConfig::from_site(site);
        let path = join_url(&config.posts_endpoint, id);
        match self.executor.send_json(Self::get(site, &config, &path)).await {
            Ok(value) => Ok(Some(parser::parse_single(&value, id))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                error!(site = %site.name, id, error = %e, "Failed to fetch post via generic API");
                Err(e)
            }
        }
    }

    async fn fetch_pages(
        &self,
        _site: &SiteConfig,
        _filters: &ListFilters,
    ) -> Result<ContentList, ConnectorError> {
        Ok(ContentList::empty())
    }
}

// ============================================================================
// Tests
// ============================================================================
