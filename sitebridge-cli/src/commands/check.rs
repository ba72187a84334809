//! Check command - probe sites with their credentials.

use anyhow::Result;
use clap::Args;
use futures::future::join_all;
use tracing::{debug, info};

use super::configured_sites;
use crate::config::select_sites;
use crate::output::{CheckOutput, JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Sites to check: "all" or comma-separated names.
    #[arg(default_value = "all")]
    pub site: String,
}

/// Runs the check command.
///
/// Sites are probed concurrently. Unknown connector types count as
/// unreachable.
pub async fn run(args: &CheckArgs, cli: &Cli) -> Result<ExitCode> {
    let sites = configured_sites(cli)?;
    let selected = select_sites(&sites, &args.site)?;
    let factory = cli.factory()?;

    info!(count = selected.len(), "Checking sites");

    let probes = selected.iter().map(|site| {
        let factory = &factory;
        async move {
            match factory.resolve(site) {
                Ok(connector) => connector.test_connection(site).await,
                Err(e) => {
                    debug!(site = %site.name, error = %e, "Cannot resolve connector");
                    false
                }
            }
        }
    });
    let results = join_all(probes).await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            for (site, reachable) in selected.iter().zip(&results) {
                println!("{}", formatter.format_check(site, *reachable));
            }
        }
        OutputFormat::Json => {
            let output: Vec<CheckOutput> = selected
                .iter()
                .zip(&results)
                .map(|(site, reachable)| CheckOutput {
                    site: site.name.clone(),
                    site_type: site.site_type.clone(),
                    reachable: *reachable,
                })
                .collect();
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    if results.iter().all(|reachable| *reachable) {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::SiteFailed)
    }
}
