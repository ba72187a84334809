//! Publishing one article to several sites.

use sitebridge_core::{ArticleInput, PublishResult, SiteConfig};
use sitebridge_fetch::ConnectorError;
use tracing::{info, warn};

use crate::registry::ConnectorFactory;

/// Outcome of publishing to one site.
#[derive(Debug)]
pub struct SiteOutcome {
    /// Display name of the site.
    pub site_name: String,
    /// Publish result, or the error that prevented it.
    pub result: Result<PublishResult, ConnectorError>,
}

impl SiteOutcome {
    /// True when the remote item was created.
    pub fn is_success(&self) -> bool {
        self.result.as_ref().is_ok_and(|r| r.success)
    }

    /// Message to show for this site.
    pub fn message(&self) -> String {
        match &self.result {
            Ok(result) => result.message.clone(),
            Err(e) => e.user_message().to_string(),
        }
    }
}

/// Publishes `article` to each site in turn.
///
/// Sites are processed sequentially in the given order. A failure on one
/// site, including an unknown connector type, does not stop the others.
pub async fn publish_to_many(
    factory: &ConnectorFactory,
    sites: &[SiteConfig],
    article: &ArticleInput,
) -> Vec<SiteOutcome> {
    let mut outcomes = Vec::with_capacity(sites.len());

    for site in sites {
        let result = match factory.resolve(site) {
            Ok(connector) => connector.publish(site, article).await,
            Err(e) => Err(ConnectorError::from(e)),
        };

        match &result {
            Ok(r) if r.success => info!(site = %site.name, "Published"),
            Ok(r) => warn!(site = %site.name, message = %r.message, "Publish rejected"),
            Err(e) => warn!(site = %site.name, error = %e, "Publish failed"),
        }

        outcomes.push(SiteOutcome {
            site_name: site.name.clone(),
            result,
        });
    }

    outcomes
}
