//! Connector for static sites stored in a GitHub or GitLab repository.

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local};
use sitebridge_core::{
    ArticleInput, ContentKind, ContentList, ContentPage, Feature, ListFilters, PublishResult,
    SiteConfig, StatsSnapshot,
};
use sitebridge_fetch::{ConnectorError, RequestExecutor};
use tracing::{debug, error, info, instrument, warn};

use super::config::GitConfig;
use super::descriptor::GIT_FEATURES;
use super::error::GitError;
use super::frontmatter::{self, MarkdownFile};
use super::provider::RepoClient;
use super::slug::slugify;
use crate::connector::{SiteConnector, rejected_article};

/// Source of the timestamp written into new files.
pub type Clock = fn() -> DateTime<FixedOffset>;

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Connector that commits Markdown files through the hosting provider's
/// content API.
///
/// Publishing is a single file creation and is not transactional: a request
/// that fails after the remote accepted it may leave a commit behind.
///
/// Read paths never fail: errors are logged and yield empty results. Every
/// listing fetches and parses each file in the content directory, one
/// request at a time.
#[derive(Debug, Clone)]
pub struct GitConnector {
    executor: RequestExecutor,
    clock: Clock,
}

impl GitConnector {
    /// Creates a connector sharing the given executor.
    pub fn new(executor: RequestExecutor) -> Self {
        Self {
            executor,
            clock: local_now,
        }
    }

    /// Replaces the clock used for frontmatter dates and Jekyll file names.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Fetches stats, surfacing failures instead of degrading.
    ///
    /// Only posts are counted: one per Markdown file in the content path.
    #[instrument(skip(self, site), fields(site = %site.name))]
    pub async fn try_fetch_stats(&self, site: &SiteConfig) -> Result<StatsSnapshot, GitError> {
        let config = GitConfig::from_site(site);
        let client = RepoClient::new(&self.executor, site, &config)?;
        let repo_name = client.repo_name().await?;

        let total_posts = match client.list_markdown(&config.content_path).await {
            Ok(entries) => entries.len() as u64,
            Err(e) => {
                warn!(path = %config.content_path, error = %e, "Failed to list content directory");
                0
            }
        };

        Ok(StatsSnapshot {
            total_posts,
            site_title: Some(repo_name.unwrap_or_else(|| site.name.clone())),
            ..StatsSnapshot::new()
        })
    }

    async fn try_publish(
        &self,
        site: &SiteConfig,
        article: &ArticleInput,
    ) -> Result<PublishResult, GitError> {
        let config = GitConfig::from_site(site);
        let client = RepoClient::new(&self.executor, site, &config)?;
        let now = (self.clock)();

        let slug = match slugify(&article.title) {
            s if s.is_empty() => format!("post-{}", now.format("%Y%m%d%H%M%S")),
            s => s,
        };
        let file_name = frontmatter::file_name(&slug, config.generator, now);
        let path = GitConfig::file_path(&config.content_path, &file_name);
        let document = frontmatter::render_document(article, config.generator, now);

        info!(provider = %config.provider, path = %path, "Committing article");
        let remote_id = client
            .create_file(&path, &document, &format!("Add: {}", article.title))
            .await?;

        Ok(PublishResult::published(
            remote_id,
            config.post_url(&slug),
            "Article commite avec succes",
        ))
    }

    async fn list_directory(
        &self,
        site: &SiteConfig,
        dir: &str,
        filters: &ListFilters,
        kind: ContentKind,
    ) -> Result<ContentList, GitError> {
        let config = GitConfig::from_site(site);
        let client = RepoClient::new(&self.executor, site, &config)?;
        let entries = client.list_markdown(dir).await?;
        debug!(dir, files = entries.len(), "Reading Markdown files");

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            match client.read_file(&entry.path).await {
                Ok(Some(raw)) => {
                    items.push(MarkdownFile::parse(&raw).into_content_page(&entry.name, &config, kind));
                }
                Ok(None) => warn!(file = %entry.name, "File disappeared while listing"),
                Err(e) => warn!(file = %entry.name, error = %e, "Failed to fetch file content"),
            }
        }

        items.sort_by_cached_key(|item| Reverse(frontmatter::date_sort_key(item.date.as_deref())));
        Ok(ContentList::paginate(items, filters))
    }

    async fn read_item(
        &self,
        site: &SiteConfig,
        dir: &str,
        id: &str,
        kind: ContentKind,
    ) -> Result<Option<ContentPage>, GitError> {
        let config = GitConfig::from_site(site);
        let client = RepoClient::new(&self.executor, site, &config)?;
        let raw = client.read_file(&GitConfig::file_path(dir, id)).await?;
        Ok(raw.map(|raw| MarkdownFile::parse(&raw).into_content_page(id, &config, kind)))
    }

    async fn listing_or_empty(
        &self,
        site: &SiteConfig,
        dir: &str,
        filters: &ListFilters,
        kind: ContentKind,
    ) -> ContentList {
        self.list_directory(site, dir, filters, kind)
            .await
            .unwrap_or_else(|e| {
                error!(site = %site.name, dir, error = %e, "Failed to list content from Git");
                ContentList::empty()
            })
    }

    async fn item_or_none(
        &self,
        site: &SiteConfig,
        dir: &str,
        id: &str,
        kind: ContentKind,
    ) -> Option<ContentPage> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        self.read_item(site, dir, id, kind).await.unwrap_or_else(|e| {
            error!(site = %site.name, id, error = %e, "Failed to fetch item from Git");
            None
        })
    }
}

#[async_trait]
impl SiteConnector for GitConnector {
    fn connector_type(&self) -> &str {
        "git"
    }

    fn features(&self) -> &'static [Feature] {
        GIT_FEATURES
    }

    async fn test_connection(&self, site: &SiteConfig) -> bool {
        let config = GitConfig::from_site(site);
        let result = match RepoClient::new(&self.executor, site, &config) {
            Ok(client) => client.repo_name().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(_) => true,
            Err(e) => {
                warn!(site = %site.name, error = %e, "Git connection test failed");
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

        Ok(self.try_publish(site, article).await.unwrap_or_else(|e| {
            error!(error = %e, "Failed to publish via Git");
            PublishResult::failed(e.to_string())
        }))
    }

    async fn fetch_stats(&self, site: &SiteConfig) -> StatsSnapshot {
        self.try_fetch_stats(site).await.unwrap_or_else(|e| {
            error!(site = %site.name, error = %e, "Failed to fetch Git stats");
            StatsSnapshot::degraded(&site.name)
        })
    }

    #[instrument(skip(self, site), fields(site = %site.name))]
    async fn fetch_posts(
        &self,
        site: &SiteConfig,
        filters: &ListFilters,
    ) -> Result<ContentList, ConnectorError> {
        let dir = GitConfig::from_site(site).content_path;
        Ok(self.listing_or_empty(site, &dir, filters, ContentKind::Post).await)
    }

    async fn fetch_post(
        &self,
        site: &SiteConfig,
        id: &str,
    ) -> Result<Option<ContentPage>, ConnectorError> {
        let dir = GitConfig::from_site(site).content_path;
        Ok(self.item_or_none(site, &dir, id, ContentKind::Post).await)
    }

    #[instrument(skip(self, site), fields(site = %site.name))]
    async fn fetch_pages(
        &self,
        site: &SiteConfig,
        filters: &ListFilters,
    ) -> Result<ContentList, ConnectorError> {
        match GitConfig::from_site(site).pages_path {
            Some(dir) => Ok(self.listing_or_empty(site, &dir, filters, ContentKind::Page).await),
            None => Ok(ContentList::empty()),
        }
    }

    async fn fetch_page(
        &self,
        site: &SiteConfig,
        id: &str,
    ) -> Result<Option<ContentPage>, ConnectorError> {
        match GitConfig::from_site(site).pages_path {
            Some(dir) => Ok(self.item_or_none(site, &dir, id, ContentKind::Page).await),
            None => Ok(None),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
