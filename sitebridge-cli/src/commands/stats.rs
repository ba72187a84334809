//! Stats command - aggregate counts per site.

use anyhow::Result;
use clap::Args;
use futures::future::join_all;
use sitebridge_core::{Feature, StatsSnapshot};
use tracing::{debug, info};

use super::configured_sites;
use crate::config::select_sites;
use crate::output::{JsonFormatter, StatsOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the stats command.
#[derive(Args)]
pub struct StatsArgs {
    /// Sites to query: "all" or comma-separated names.
    #[arg(default_value = "all")]
    pub site: String,
}

/// Runs the stats command.
///
/// Connectors degrade failed fetches to zeroed snapshots, so this command
/// only fails on configuration errors.
pub async fn run(args: &StatsArgs, cli: &Cli) -> Result<ExitCode> {
    let sites = configured_sites(cli)?;
    let selected = select_sites(&sites, &args.site)?;
    let factory = cli.factory()?;

    info!(count = selected.len(), "Fetching stats");

    let mut connectors = Vec::with_capacity(selected.len());
    for site in &selected {
        let connector = factory.resolve(site)?;
        if !connector.supports(Feature::Stats) {
            debug!(site = %site.name, "Connector does not declare stats support");
        }
        connectors.push(connector);
    }

    let snapshots: Vec<StatsSnapshot> = join_all(
        selected
            .iter()
            .zip(&connectors)
            .map(|(site, connector)| connector.fetch_stats(site)),
    )
    .await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            let blocks: Vec<String> = selected
                .iter()
                .zip(&snapshots)
                .map(|(site, stats)| formatter.format_stats(site, stats))
                .collect();
            println!("{}", blocks.join("\n\n"));
        }
        OutputFormat::Json => {
            let output: Vec<StatsOutput<'_>> = selected
                .iter()
                .zip(&snapshots)
                .map(|(site, stats)| StatsOutput {
                    site: &site.name,
                    stats,
                })
                .collect();
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(ExitCode::Success)
}
