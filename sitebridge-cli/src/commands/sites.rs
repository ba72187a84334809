//! Sites command - list configured sites.

use anyhow::Result;
use clap::Args;

use super::configured_sites;
use crate::config::{default_config_dir, sites_path};
use crate::output::{JsonFormatter, SiteOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the sites command.
#[derive(Args)]
pub struct SitesArgs {
    /// Only print the sites file path.
    #[arg(long)]
    pub path: bool,
}

/// Runs the sites command.
pub fn run(args: &SitesArgs, cli: &Cli) -> Result<ExitCode> {
    let path = sites_path(cli.sites.as_deref());

    if args.path {
        match cli.format {
            OutputFormat::Text => {
                println!("Config dir: {}", default_config_dir().display());
                println!("Sites file: {}", path.display());
            }
            OutputFormat::Json => {
                let paths = serde_json::json!({
                    "config_dir": default_config_dir().display().to_string(),
                    "sites_file": path.display().to_string(),
                });
                println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
            }
        }
        return Ok(ExitCode::Success);
    }

    let sites = configured_sites(cli)?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            for site in &sites {
                println!("{}", formatter.format_site_line(site));
            }
            if sites.is_empty() {
                println!("No sites in {}", path.display());
            }
        }
        OutputFormat::Json => {
            let output: Vec<SiteOutput<'_>> = sites.iter().map(SiteOutput::from).collect();
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(ExitCode::Success)
}
