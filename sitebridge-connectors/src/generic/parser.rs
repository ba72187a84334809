//! Normalization of unknown REST payloads through fallback field chains.
//!
//! The remote shape is only known at configuration time, so every field is
//! read through a literal fallback chain.

use serde_json::Value;
use sitebridge_core::{ContentKind, ContentList, ContentPage, ListFilters, PublishResult, StatsSnapshot};

use crate::fields::{first_array, first_count, first_names, first_remote_id, first_str, lookup};

// Item fields.
const ID: &[&str] = &["id", "_id"];
const TITLE: &[&str] = &["title", "name"];
const SLUG: &[&str] = &["slug"];
const EXCERPT: &[&str] = &["excerpt", "description", "summary"];
const CONTENT: &[&str] = &["content", "body"];
const STATUS: &[&str] = &["status"];
const URL: &[&str] = &["url", "link"];
const DATE: &[&str] = &["date", "created_at", "createdAt"];
const MODIFIED: &[&str] = &["modified", "updated_at", "updatedAt"];
const CATEGORIES: &[&str] = &["categories"];
const TAGS: &[&str] = &["tags"];
const IMAGE: &[&str] = &["featured_image", "image", "cover"];
const AUTHOR: &[&str] = &["author.name", "author"];

// Listing envelope.
const LIST_WRAPPERS: &[&str] = &["data", "posts", "items"];
const TOTAL: &[&str] = &["total", "meta.total"];
const PAGES: &[&str] = &["pages", "meta.pages"];

// Publish response.
const PUBLISHED_ID: &[&str] = &["id", "data.id"];
const PUBLISHED_URL: &[&str] = &["url", "data.url"];

// Stats.
const STAT_POSTS: &[&str] = &["posts", "total_posts", "count"];
const STAT_CATEGORIES: &[&str] = &["categories", "total_categories"];
const STAT_TAGS: &[&str] = &["tags", "total_tags"];
const STAT_TITLE: &[&str] = &["title", "site_title"];
const STAT_VERSION: &[&str] = &["version"];

/// Normalizes one item. `fallback_id` is used when the item carries no id.
pub fn parse_item(value: &Value, fallback_id: &str) -> ContentPage {
    ContentPage {
        id: first_str(value, ID).unwrap_or_else(|| fallback_id.to_string()),
        title: first_str(value, TITLE).unwrap_or_default(),
        slug: first_str(value, SLUG).unwrap_or_default(),
        excerpt: first_str(value, EXCERPT).unwrap_or_default(),
        content: first_str(value, CONTENT).unwrap_or_default(),
        status: first_str(value, STATUS).unwrap_or_else(|| "publish".to_string()),
        url: first_str(value, URL).unwrap_or_default(),
        date: first_str(value, DATE),
        modified_date: first_str(value, MODIFIED),
        categories: first_names(value, CATEGORIES),
        tags: first_names(value, TAGS),
        featured_image: first_str(value, IMAGE),
        author: first_str(value, AUTHOR),
        kind: ContentKind::Post,
    }
}

/// Normalizes a single-item response, unwrapping a `data` envelope.
pub fn parse_single(value: &Value, requested_id: &str) -> ContentPage {
    let item = lookup(value, "data").filter(|v| v.is_object()).unwrap_or(value);
    parse_item(item, requested_id)
}

/// Normalizes a listing response.
///
/// Items are read from `data`, `posts` or `items`, else the payload itself
/// when it is an array. Items without an id get a placeholder derived from
/// their position.
pub fn parse_list(value: &Value, filters: &ListFilters) -> ContentList {
    let raw: &[Value] = first_array(value, LIST_WRAPPERS)
        .or_else(|| value.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    let offset = filters.normalized().offset();
    let items: Vec<ContentPage> = raw
        .iter()
        .enumerate()
        .map(|(i, item)| parse_item(item, &format!("item-{}", offset + i + 1)))
        .collect();

    ContentList {
        total: first_count(value, TOTAL).unwrap_or(items.len() as u64),
        page_count: first_count(value, PAGES).unwrap_or(1),
        items,
    }
}

/// Builds the result of a successful publish call.
pub fn parse_publish(value: &Value) -> PublishResult {
    PublishResult::published(
        first_remote_id(value, PUBLISHED_ID),
        first_str(value, PUBLISHED_URL),
        "Contenu publie avec succes",
    )
}

/// Normalizes a stats response. Missing title falls back to the site name.
pub fn parse_stats(value: &Value, site_name: &str) -> StatsSnapshot {
    StatsSnapshot {
        total_posts: first_count(value, STAT_POSTS).unwrap_or(0),
        total_categories: first_count(value, STAT_CATEGORIES).unwrap_or(0),
        total_tags: first_count(value, STAT_TAGS).unwrap_or(0),
        site_title: Some(first_str(value, STAT_TITLE).unwrap_or_else(|| site_name.to_string())),
        platform_version: first_str(value, STAT_VERSION),
        ..StatsSnapshot::new()
    }
}
