//! Maps plugin payloads onto the shared content and stats models.

use serde_json::Value;
use sitebridge_core::{ContentKind, ContentList, ContentPage, StatsSnapshot, Term};

use super::api::{PagesResponse, PostsResponse, StatsResponse};
use crate::fields::{first_count, first_names, first_str};

// Fallback chains, first present key wins.
const ID: &[&str] = &["id", "ID"];
const TITLE: &[&str] = &["title", "post_title"];
const SLUG: &[&str] = &["slug", "post_name"];
const EXCERPT: &[&str] = &["excerpt", "post_excerpt"];
const CONTENT: &[&str] = &["content", "post_content"];
const STATUS: &[&str] = &["status", "post_status"];
const URL: &[&str] = &["url", "link", "permalink"];
const DATE: &[&str] = &["date", "post_date"];
const MODIFIED: &[&str] = &["modified", "modified_date", "post_modified"];
const FEATURED_IMAGE: &[&str] = &["featured_image", "featured_image_url"];
const AUTHOR: &[&str] = &["author.name", "author_name", "author"];

/// Converts a `/stats` payload.
pub fn parse_stats(response: StatsResponse) -> StatsSnapshot {
    StatsSnapshot {
        total_posts: response.total_posts,
        total_categories: response.total_categories,
        total_tags: response.total_tags,
        total_pages: response.total_pages,
        total_comments: response.total_comments,
        total_users: response.total_users,
        site_title: response.site_title,
        site_description: response.site_description,
        platform_version: response.wordpress_version,
        ..StatsSnapshot::new()
    }
}

/// Converts one post or page object. Returns `None` for objects without an id.
pub fn parse_content(value: &Value, kind: ContentKind) -> Option<ContentPage> {
    let id = first_str(value, ID)?;

    Some(ContentPage {
        id,
        title: first_str(value, TITLE).unwrap_or_default(),
        slug: first_str(value, SLUG).unwrap_or_default(),
        excerpt: first_str(value, EXCERPT).unwrap_or_default(),
        content: first_str(value, CONTENT).unwrap_or_default(),
        status: first_str(value, STATUS).unwrap_or_else(|| "publish".to_string()),
        url: first_str(value, URL).unwrap_or_default(),
        date: first_str(value, DATE),
        modified_date: first_str(value, MODIFIED),
        categories: first_names(value, &["categories"]),
        tags: first_names(value, &["tags"]),
        featured_image: first_str(value, FEATURED_IMAGE),
        author: first_str(value, AUTHOR),
        kind,
    })
}

/// Converts a `/posts` listing.
pub fn parse_posts(response: PostsResponse) -> ContentList {
    ContentList {
        items: parse_items(&response.posts, ContentKind::Post),
        total: response.total,
        page_count: response.pages,
    }
}

/// Converts a `/pages` listing.
pub fn parse_pages(response: PagesResponse) -> ContentList {
    ContentList {
        items: parse_items(&response.pages, ContentKind::Page),
        total: response.total,
        page_count: response.pages_count,
    }
}

fn parse_items(items: &[Value], kind: ContentKind) -> Vec<ContentPage> {
    items
        .iter()
        .filter_map(|item| parse_content(item, kind))
        .collect()
}

/// Converts a `/categories` or `/tags` payload, skipping malformed entries.
pub fn parse_terms(value: &Value) -> Vec<Term> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    Some(Term {
                        id: first_count(item, &["id", "term_id"])?,
                        name: first_str(item, &["name"])?,
                        slug: first_str(item, &["slug"]).unwrap_or_default(),
                        count: first_count(item, &["count"]).unwrap_or(0),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
