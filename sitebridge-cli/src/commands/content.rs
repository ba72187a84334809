//! Posts, pages and show commands - read content from one site.

use anyhow::{Result, bail};
use clap::Args;
use sitebridge_core::{ContentList, ListFilters};
use tracing::info;

use super::configured_sites;
use crate::config::find_site;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ContentScope, ExitCode, OutputFormat};

/// Arguments for the posts and pages commands.
#[derive(Args)]
pub struct ListArgs {
    /// Site name.
    pub site: String,

    /// Page number, starting at 1.
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Items per page (1 to 100).
    #[arg(long, default_value = "20")]
    pub per_page: u32,

    /// Status filter (publish, draft, ...).
    #[arg(long)]
    pub status: Option<String>,

    /// Search string.
    #[arg(long)]
    pub search: Option<String>,
}

impl ListArgs {
    /// Listing filters, normalized.
    pub fn filters(&self) -> ListFilters {
        let mut filters = ListFilters::page(self.page).with_per_page(self.per_page);
        if let Some(status) = &self.status {
            filters = filters.with_status(status);
        }
        if let Some(search) = &self.search {
            filters = filters.with_search(search);
        }
        filters.normalized()
    }
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Site name.
    pub site: String,

    /// Post or page id (a file name for Git sites).
    pub id: String,

    /// Look the id up among static pages instead of posts.
    #[arg(long)]
    pub page: bool,
}

/// Runs the posts or pages command.
pub async fn run_list(args: &ListArgs, scope: ContentScope, cli: &Cli) -> Result<ExitCode> {
    let sites = configured_sites(cli)?;
    let site = find_site(&sites, &args.site)?;
    let connector = cli.factory()?.resolve(site)?;
    let filters = args.filters();

    info!(site = %site.name, ?scope, page = filters.page, "Listing content");

    let list: ContentList = match scope {
        ContentScope::Posts => connector.fetch_posts(site, &filters).await?,
        ContentScope::Pages => connector.fetch_pages(site, &filters).await?,
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_content_list(&list, filters.page));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&list)?);
        }
    }

    Ok(ExitCode::Success)
}

/// Runs the show command.
pub async fn run_show(args: &ShowArgs, cli: &Cli) -> Result<ExitCode> {
    let sites = configured_sites(cli)?;
    let site = find_site(&sites, &args.site)?;
    let connector = cli.factory()?.resolve(site)?;

    let item = if args.page {
        connector.fetch_page(site, &args.id).await?
    } else {
        connector.fetch_post(site, &args.id).await?
    };

    let Some(item) = item else {
        bail!("No item {} on {}", args.id, site.name);
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_content_page(&item));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&item)?);
        }
    }

    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(page: u32, per_page: u32) -> ListArgs {
        ListArgs {
            site: "Blog".to_string(),
            page,
            per_page,
            status: Some("  ".to_string()),
            search: Some("rust".to_string()),
        }
    }

    #[test]
    fn test_filters_are_normalized() {
        let filters = args(0, 500).filters();
        assert_eq!(filters.page, 1);
        assert_eq!(filters.per_page, 100);
        assert_eq!(filters.status, None);
        assert_eq!(filters.search.as_deref(), Some("rust"));
    }
}
