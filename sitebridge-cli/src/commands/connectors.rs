//! Connectors command - list available connector types.

use anyhow::Result;
use clap::Args;
use sitebridge_connectors::builtin_descriptors;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the connectors command.
#[derive(Args)]
pub struct ConnectorsArgs {
    /// Show configuration fields of each connector.
    #[arg(long)]
    pub fields: bool,
}

/// Runs the connectors command.
pub fn run(args: &ConnectorsArgs, cli: &Cli) -> Result<ExitCode> {
    info!("Listing connectors");

    let descriptors = builtin_descriptors();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_connectors_header());
            println!("{}", "─".repeat(70));

            for descriptor in descriptors {
                println!("{}", formatter.format_connector_line(descriptor));
                if args.fields || cli.verbose {
                    println!("{}", formatter.format_connector_fields(descriptor));
                }
            }

            println!();
            println!("Total: {} connectors", descriptors.len());
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(descriptors)?);
        }
    }

    Ok(ExitCode::Success)
}
