//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use sitebridge_connectors::SiteOutcome;
use sitebridge_core::{RemoteId, SiteConfig, StatsSnapshot};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a connection check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutput {
    pub site: String,
    #[serde(rename = "type")]
    pub site_type: String,
    pub reachable: bool,
}

/// JSON output for one site's stats.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOutput<'a> {
    pub site: &'a str,
    #[serde(flatten)]
    pub stats: &'a StatsSnapshot,
}

/// JSON output for one publish outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOutput {
    pub site: String,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<RemoteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&SiteOutcome> for PublishOutput {
    fn from(outcome: &SiteOutcome) -> Self {
        let (remote_id, url, error) = match &outcome.result {
            Ok(result) => (result.remote_id.clone(), result.url.clone(), None),
            Err(e) => (None, None, Some(e.kind().as_str().to_string())),
        };
        Self {
            site: outcome.site_name.clone(),
            success: outcome.is_success(),
            message: outcome.message(),
            remote_id,
            url,
            error,
        }
    }
}

/// JSON output for a configured site. The token is never printed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteOutput<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub site_type: &'a str,
    pub base_url: &'a str,
    pub has_token: bool,
}

impl<'a> From<&'a SiteConfig> for SiteOutput<'a> {
    fn from(site: &'a SiteConfig) -> Self {
        Self {
            name: &site.name,
            site_type: &site.site_type,
            base_url: &site.base_url,
            has_token: !site.api_token.is_empty(),
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Serializes any value.
    pub fn format<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let output = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(output)
    }
}
