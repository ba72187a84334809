//! Reading types.
//!
//! These are the normalized shapes every connector maps its remote payloads
//! onto, whatever the provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size for listings.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Largest page size any connector requests.
pub const MAX_PER_PAGE: u32 = 100;

// ============================================================================
// Stats Snapshot
// ============================================================================

/// Aggregate statistics for a site.
///
/// Counts are unsigned; a failed fetch yields zeros rather than a missing
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Number of posts.
    pub total_posts: u64,
    /// Number of categories.
    pub total_categories: u64,
    /// Number of tags.
    pub total_tags: u64,
    /// Number of pages.
    #[serde(default)]
    pub total_pages: u64,
    /// Number of comments.
    #[serde(default)]
    pub total_comments: u64,
    /// Number of users.
    #[serde(default)]
    pub total_users: u64,
    /// Site title.
    pub site_title: Option<String>,
    /// Site tagline.
    #[serde(default)]
    pub site_description: Option<String>,
    /// CMS or platform version.
    pub platform_version: Option<String>,
    /// When the snapshot was taken.
    pub fetched_at: DateTime<Utc>,
}

impl StatsSnapshot {
    /// Creates an all-zero snapshot stamped now.
    pub fn new() -> Self {
        Self {
            total_posts: 0,
            total_categories: 0,
            total_tags: 0,
            total_pages: 0,
            total_comments: 0,
            total_users: 0,
            site_title: None,
            site_description: None,
            platform_version: None,
            fetched_at: Utc::now(),
        }
    }

    /// Zeroed snapshot carrying only the configured site name.
    ///
    /// This is what connectors return when a stats fetch fails.
    pub fn degraded(site_name: impl Into<String>) -> Self {
        Self {
            site_title: Some(site_name.into()),
            ..Self::new()
        }
    }

    /// Returns true if posts, categories and tags are all zero.
    pub fn is_empty(&self) -> bool {
        self.total_posts == 0 && self.total_categories == 0 && self.total_tags == 0
    }
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Content
// ============================================================================

/// Whether a content item is a post or a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Blog post / article.
    #[default]
    Post,
    /// Static page.
    Page,
}

/// A post or page, normalized across providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPage {
    /// Provider-specific id: a database id or a file name.
    pub id: String,
    /// Title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Summary.
    pub excerpt: String,
    /// Body.
    pub content: String,
    /// Remote status (`publish`, `draft`, ...).
    pub status: String,
    /// Public URL, empty when unknown.
    pub url: String,
    /// Creation date as reported by the remote.
    pub date: Option<String>,
    /// Last modification date as reported by the remote.
    pub modified_date: Option<String>,
    /// Category names.
    pub categories: Vec<String>,
    /// Tag names.
    pub tags: Vec<String>,
    /// Featured image URL.
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Author display name.
    #[serde(default)]
    pub author: Option<String>,
    /// Post or page.
    #[serde(rename = "type")]
    pub kind: ContentKind,
}

/// One page of listing results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentList {
    /// Items on this page.
    pub items: Vec<ContentPage>,
    /// Total number of items across all pages.
    pub total: u64,
    /// Number of pages.
    pub page_count: u64,
}

impl ContentList {
    /// An empty listing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Paginates a full in-memory listing.
    pub fn paginate(all: Vec<ContentPage>, filters: &ListFilters) -> Self {
        let filters = filters.normalized();
        let total = all.len() as u64;
        let per_page = u64::from(filters.per_page);
        let page_count = total.div_ceil(per_page);
        let items = all
            .into_iter()
            .skip(filters.offset())
            .take(filters.per_page as usize)
            .collect();

        Self {
            items,
            total,
            page_count,
        }
    }
}

/// A taxonomy term (category or tag) as listed by a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Remote term id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
    /// Number of items using this term.
    #[serde(default)]
    pub count: u64,
}

// ============================================================================
// List Filters
// ============================================================================

/// Filters for post/page listings. Pages are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilters {
    /// Page number, starting at 1.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Status filter; `None` means any status.
    pub status: Option<String>,
    /// Substring search, ignored by connectors that cannot search.
    pub search: Option<String>,
}

impl ListFilters {
    /// Filters for the given page with the default page size.
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets the status filter.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the search string.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Clamps `page` to at least 1 and `per_page` to `1..=MAX_PER_PAGE`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
            status: self.status.clone().filter(|s| !s.trim().is_empty()),
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
        }
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.per_page as usize
    }
}

impl Default for ListFilters {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            status: None,
            search: None,
        }
    }
}
