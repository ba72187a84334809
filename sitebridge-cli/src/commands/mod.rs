//! CLI command implementations.

pub mod check;
pub mod connectors;
pub mod content;
pub mod publish;
pub mod sites;
pub mod stats;

use anyhow::Result;
use sitebridge_core::SiteConfig;

use crate::Cli;
use crate::config::{load_sites, sites_path};

/// Loads the sites file selected on the command line.
pub fn configured_sites(cli: &Cli) -> Result<Vec<SiteConfig>> {
    load_sites(&sites_path(cli.sites.as_deref()))
}
