//! Text output formatting with optional colors.

use sitebridge_connectors::SiteOutcome;
use sitebridge_core::{
    ConnectorDescriptor, ContentList, ContentPage, FieldKind, SiteConfig, StatsSnapshot,
};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Longest title shown in listings before truncation.
const TITLE_WIDTH: usize = 50;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    // ------------------------------------------------------------------------
    // Connectors
    // ------------------------------------------------------------------------

    /// Header line for the connector catalog.
    pub fn format_connectors_header(&self) -> String {
        self.bold(&format!("{:<24} {:<10} {}", "Connector", "Type", "Features"))
    }

    /// One catalog line.
    pub fn format_connector_line(&self, descriptor: &ConnectorDescriptor) -> String {
        let features: Vec<&str> = descriptor.features.iter().map(|f| f.as_str()).collect();
        format!(
            "{:<24} {:<10} {}",
            descriptor.display_name,
            self.cyan(&descriptor.kind),
            features.join(", ")
        )
    }

    /// Configuration fields of a connector, one per line.
    pub fn format_connector_fields(&self, descriptor: &ConnectorDescriptor) -> String {
        descriptor
            .configuration_fields
            .iter()
            .map(|field| {
                let kind = match field.kind {
                    FieldKind::Url => "url",
                    FieldKind::Password => "secret",
                    FieldKind::Text => "text",
                    FieldKind::Select => "select",
                };
                let mut line = format!("  {:<18} {:<7} {}", field.name, kind, field.label);
                if field.required {
                    line.push_str(&self.yellow(" (required)"));
                }
                if !field.options.is_empty() {
                    let values: Vec<&str> = field.options.iter().map(|o| o.value.as_str()).collect();
                    line.push_str(&self.dim(&format!(" [{}]", values.join("|"))));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ------------------------------------------------------------------------
    // Sites
    // ------------------------------------------------------------------------

    /// One configured site.
    pub fn format_site_line(&self, site: &SiteConfig) -> String {
        format!(
            "{:<24} {:<10} {}",
            self.bold(&site.name),
            site.site_type,
            self.dim(site.trimmed_base_url())
        )
    }

    /// Result of a connection check.
    pub fn format_check(&self, site: &SiteConfig, reachable: bool) -> String {
        let status = if reachable {
            self.green("✓ Connected")
        } else {
            self.red("✗ Unreachable")
        };
        format!("{:<24} {:<10} {}", site.name, site.site_type, status)
    }

    // ------------------------------------------------------------------------
    // Stats
    // ------------------------------------------------------------------------

    /// Stats block for one site.
    pub fn format_stats(&self, site: &SiteConfig, stats: &StatsSnapshot) -> String {
        let title = stats.site_title.as_deref().unwrap_or(&site.name);
        let mut lines = vec![format!("{} ({})", self.bold(title), site.site_type)];

        if let Some(description) = &stats.site_description {
            lines.push(self.dim(description));
        }
        if stats.is_empty() {
            lines.push(self.yellow("No content reported"));
        }

        lines.push(format!("Posts:      {}", stats.total_posts));
        lines.push(format!("Categories: {}", stats.total_categories));
        lines.push(format!("Tags:       {}", stats.total_tags));
        for (label, count) in [
            ("Pages:     ", stats.total_pages),
            ("Comments:  ", stats.total_comments),
            ("Users:     ", stats.total_users),
        ] {
            if count > 0 {
                lines.push(format!("{label} {count}"));
            }
        }
        if let Some(version) = &stats.platform_version {
            lines.push(format!("Version:    {}", self.cyan(version)));
        }

        lines.join("\n")
    }

    // ------------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------------

    /// Listing table with a pagination footer.
    pub fn format_content_list(&self, list: &ContentList, page: u32) -> String {
        if list.items.is_empty() {
            return self.dim("No content found");
        }

        let mut lines = vec![self.bold(&format!(
            "{:<24} {:<9} {:<12} {}",
            "Id", "Status", "Date", "Title"
        ))];
        for item in &list.items {
            lines.push(format!(
                "{:<24} {:<9} {:<12} {}",
                truncate(&item.id, 24),
                self.status(&item.status),
                item.date.as_deref().map_or("", |d| d.get(..10).unwrap_or(d)),
                truncate(&item.title, TITLE_WIDTH)
            ));
        }
        lines.push(self.dim(&format!(
            "Page {page}/{} ({} total)",
            list.page_count.max(1),
            list.total
        )));

        lines.join("\n")
    }

    /// Detail view of one item.
    pub fn format_content_page(&self, page: &ContentPage) -> String {
        let mut lines = vec![
            self.bold(&page.title),
            format!("Id:         {}", page.id),
            format!("Slug:       {}", page.slug),
            format!("Status:     {}", self.status(&page.status)),
        ];

        if !page.url.is_empty() {
            lines.push(format!("URL:        {}", self.cyan(&page.url)));
        }
        if let Some(date) = &page.date {
            lines.push(format!("Date:       {date}"));
        }
        if let Some(modified) = &page.modified_date {
            lines.push(format!("Modified:   {modified}"));
        }
        if let Some(author) = &page.author {
            lines.push(format!("Author:     {author}"));
        }
        if !page.categories.is_empty() {
            lines.push(format!("Categories: {}", page.categories.join(", ")));
        }
        if !page.tags.is_empty() {
            lines.push(format!("Tags:       {}", page.tags.join(", ")));
        }
        if !page.excerpt.is_empty() {
            lines.push(String::new());
            lines.push(self.dim(page.excerpt.trim()));
        }
        if !page.content.is_empty() {
            lines.push(String::new());
            lines.push(page.content.trim_end().to_string());
        }

        lines.join("\n")
    }

    // ------------------------------------------------------------------------
    // Publish
    // ------------------------------------------------------------------------

    /// Outcome of publishing to one site.
    pub fn format_outcome(&self, outcome: &SiteOutcome) -> String {
        let mark = if outcome.is_success() {
            self.green("✓")
        } else {
            self.red("✗")
        };
        let mut line = format!("{mark} {:<22} {}", outcome.site_name, outcome.message());

        if let Ok(result) = &outcome.result {
            if let Some(url) = &result.url {
                line.push_str(&format!("\n  {}", self.cyan(url)));
            }
            if let Some(id) = &result.remote_id {
                line.push_str(&format!("\n  {}", self.dim(&format!("id: {id}"))));
            }
        }
        line
    }

    // ------------------------------------------------------------------------
    // Color helpers
    // ------------------------------------------------------------------------

    fn status(&self, status: &str) -> String {
        let padded = format!("{status:<9}");
        match status {
            "publish" => self.green(&padded),
            "draft" | "pending" => self.yellow(&padded),
            _ => padded,
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Cuts `text` to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
