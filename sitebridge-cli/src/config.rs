//! Sites file loading and site selection.
//!
//! The sites file is either a bare list of sites or a mapping with a
//! `sites` key. Files ending in `.json` are read as JSON, anything else as
//! YAML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use sitebridge_core::SiteConfig;
use tracing::debug;

/// Default sites file name inside the config directory.
const SITES_FILE: &str = "sites.yaml";

#[derive(Deserialize)]
#[serde(untagged)]
enum SitesDocument {
    Wrapped { sites: Vec<SiteConfig> },
    List(Vec<SiteConfig>),
}

/// Returns the default config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sitebridge")
}

/// Returns the sites file to read: `explicit`, else the default path.
pub fn sites_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| default_config_dir().join(SITES_FILE), Path::to_path_buf)
}

/// Loads every site declared in `path`.
pub fn load_sites(path: &Path) -> Result<Vec<SiteConfig>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read sites file {}", path.display()))?;
    let json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let sites = parse_sites(&text, json)
        .with_context(|| format!("Invalid sites file {}", path.display()))?;
    debug!(path = %path.display(), count = sites.len(), "Loaded sites");
    Ok(sites)
}

/// Parses a sites document.
pub fn parse_sites(text: &str, json: bool) -> Result<Vec<SiteConfig>> {
    let document: SitesDocument = if json {
        serde_json::from_str(text)?
    } else {
        serde_yaml::from_str(text)?
    };

    let sites = match document {
        SitesDocument::Wrapped { sites } | SitesDocument::List(sites) => sites,
    };
    for (i, site) in sites.iter().enumerate() {
        if site.name.trim().is_empty() {
            bail!("Site #{} has no name", i + 1);
        }
    }
    Ok(sites)
}

/// Selects sites by name.
///
/// `selection` is `all` or a comma-separated list of names, matched without
/// regard to case. Unknown names fail with the list of known names.
pub fn select_sites<'a>(sites: &'a [SiteConfig], selection: &str) -> Result<Vec<&'a SiteConfig>> {
    if selection.trim().eq_ignore_ascii_case("all") {
        return Ok(sites.iter().collect());
    }

    let mut selected = Vec::new();
    for name in selection.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        selected.push(find_site(sites, name)?);
    }
    if selected.is_empty() {
        bail!("No site selected");
    }
    Ok(selected)
}

/// Finds one site by name.
pub fn find_site<'a>(sites: &'a [SiteConfig], name: &str) -> Result<&'a SiteConfig> {
    sites
        .iter()
        .find(|site| site.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            let known: Vec<&str> = sites.iter().map(|s| s.name.as_str()).collect();
            anyhow::anyhow!("Unknown site: {name}. Known sites: {}", known.join(", "))
        })
}
