// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Sitebridge CLI - publish to and inspect remote sites from the command line.
//!
//! # Examples
//!
//! ```bash
//! # List connector types and their configuration fields
//! sitebridge connectors
//!
//! # List the sites declared in the sites file
//! sitebridge sites
//!
//! # Probe every configured site
//! sitebridge check
//!
//! # Stats for one site, as JSON
//! sitebridge stats "Mon Blog" --format json --pretty
//!
//! # Second page of posts
//! sitebridge posts "Mon Blog" --page 2 --per-page 10
//!
//! # Publish a Markdown file to two sites
//! sitebridge publish article.md --site "Mon Blog" --site Docs
//! ```

mod article;
mod commands;
mod config;
mod output;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sitebridge_connectors::ConnectorFactory;
use sitebridge_fetch::{HttpClient, RequestExecutor, RetryPolicy};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{check, connectors, content, publish, sites, stats};

// ============================================================================
// CLI Definition
// ============================================================================

/// Sitebridge CLI - one interface for WordPress, REST and Git-backed sites.
#[derive(Parser)]
#[command(name = "sitebridge")]
#[command(about = "Publish to and read from WordPress, REST and Git-backed sites")]
#[command(long_about = r#"
Sitebridge talks to remote sites through a common connector interface.

Supported site types:
  • WordPress with the companion plugin (wordpress)
  • Generic REST API (api)
  • Git repository for a static site generator (git)

Sites are read from a YAML or JSON file given by --sites, $SITEBRIDGE_SITES,
or the default path shown by `sitebridge sites --path`.

Examples:
  sitebridge connectors              # Connector catalog
  sitebridge check                   # Probe every site
  sitebridge stats "Mon Blog"        # Stats for one site
  sitebridge publish post.md --site all
"#)]
#[command(version)]
#[command(author = "Sitebridge Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Sites file (YAML, or JSON by extension).
    #[arg(long, global = true, env = "SITEBRIDGE_SITES")]
    pub sites: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List available connector types.
    #[command(visible_alias = "c")]
    Connectors(connectors::ConnectorsArgs),

    /// List configured sites.
    Sites(sites::SitesArgs),

    /// Check that sites are reachable with their credentials.
    Check(check::CheckArgs),

    /// Show aggregate statistics for sites.
    #[command(visible_alias = "s")]
    Stats(stats::StatsArgs),

    /// List posts of a site.
    Posts(content::ListArgs),

    /// List static pages of a site.
    Pages(content::ListArgs),

    /// Show one post or page.
    Show(content::ShowArgs),

    /// Publish a Markdown file.
    #[command(visible_alias = "p")]
    Publish(publish::PublishArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// At least one site failed.
    SiteFailed = 2,
}

impl Cli {
    /// Builds the connector factory over a real HTTP client.
    pub fn factory(&self) -> Result<ConnectorFactory> {
        let timeout = Duration::from_secs(self.timeout);
        let client = HttpClient::with_timeout(timeout).context("Cannot create HTTP client")?;
        let executor = RequestExecutor::new(Arc::new(client))
            .with_policy(RetryPolicy::default().with_timeout(timeout));
        Ok(ConnectorFactory::new(executor))
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let default = if verbose {
        "sitebridge=debug,info"
    } else {
        "sitebridge=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Connectors(args) => connectors::run(args, &cli),
        Commands::Sites(args) => sites::run(args, &cli),
        Commands::Check(args) => check::run(args, &cli).await,
        Commands::Stats(args) => stats::run(args, &cli).await,
        Commands::Posts(args) => content::run_list(args, ContentScope::Posts, &cli).await,
        Commands::Pages(args) => content::run_list(args, ContentScope::Pages, &cli).await,
        Commands::Show(args) => content::run_show(args, &cli).await,
        Commands::Publish(args) => publish::run(args, &cli).await,
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    }
}

/// Which listing a content command reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentScope {
    /// Blog posts.
    Posts,
    /// Static pages.
    Pages,
}
