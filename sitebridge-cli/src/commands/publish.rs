//! Publish command - send a Markdown file to one or more sites.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use sitebridge_connectors::{SiteOutcome, publish_to_many};
use sitebridge_core::SiteConfig;
use tracing::info;

use super::configured_sites;
use crate::article::{load_article, parse_status};
use crate::config::select_sites;
use crate::output::{JsonFormatter, PublishOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the publish command.
#[derive(Args)]
pub struct PublishArgs {
    /// Markdown file to publish.
    pub file: PathBuf,

    /// Target sites: "all" or names. Repeat or separate with commas.
    #[arg(long, short, required = true)]
    pub site: Vec<String>,

    /// Override the status from the frontmatter (draft, publish, pending, private).
    #[arg(long)]
    pub status: Option<String>,

    /// Validate the article and show the targets without publishing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Runs the publish command.
///
/// Sites are published to one after the other. A failure on one site does
/// not stop the others; the exit code reports whether any failed.
pub async fn run(args: &PublishArgs, cli: &Cli) -> Result<ExitCode> {
    let mut article = load_article(&args.file)?;
    if let Some(status) = &args.status {
        let Some(status) = parse_status(status) else {
            bail!("Unknown status: {status}. Use: draft, publish, pending, private");
        };
        article = article.with_status(status);
    }
    article.validate()?;

    let sites = configured_sites(cli)?;
    let targets: Vec<SiteConfig> = select_sites(&sites, &args.site.join(","))?
        .into_iter()
        .cloned()
        .collect();

    if args.dry_run {
        for site in &targets {
            println!("Would publish \"{}\" ({}) to {}", article.title, article.status, site.name);
        }
        return Ok(ExitCode::Success);
    }

    info!(title = %article.title, targets = targets.len(), "Publishing article");
    let outcomes = publish_to_many(&cli.factory()?, &targets, &article).await;
    print_outcomes(&outcomes, cli)?;

    if outcomes.iter().all(SiteOutcome::is_success) {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::SiteFailed)
    }
}

fn print_outcomes(outcomes: &[SiteOutcome], cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            for outcome in outcomes {
                println!("{}", formatter.format_outcome(outcome));
            }
        }
        OutputFormat::Json => {
            let output: Vec<PublishOutput> = outcomes.iter().map(PublishOutput::from).collect();
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }
    Ok(())
}
