//! Runs requests under a [`RetryPolicy`] and classifies failures.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::ConnectorError;
use crate::request::{HttpRequest, HttpResponse};
use crate::retry::RetryPolicy;
use crate::transport::Transport;

/// Shared request runner used by every connector.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RequestExecutor {
    /// Creates an executor with the default policy.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Sends a request and decodes the body as JSON.
    ///
    /// An empty or `null` body decodes to an empty object.
    pub async fn send_json(&self, request: HttpRequest) -> Result<Value, ConnectorError> {
        let url = request.url.clone();
        let response = self.send(request).await?;
        decode_json(&response.body, &url)
    }

    /// Sends a request and returns the body as text.
    pub async fn send_text(&self, request: HttpRequest) -> Result<String, ConnectorError> {
        Ok(self.send(request).await?.body)
    }

    async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, ConnectorError> {
        if request.header_value("Accept").is_none() {
            request = request.header("Accept", "application/json");
        }
        if request.timeout.is_none() {
            request.timeout = Some(self.policy.timeout);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!(
                method = %request.method,
                url = %request.url,
                attempt,
                "Sending request"
            );

            let failure = match self.transport.execute(request.clone()).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => {
                    let err = ConnectorError::from_status(response.status, &response.body, &request.url);
                    warn!(
                        status = response.status,
                        kind = %err.kind(),
                        url = %request.url,
                        "Remote returned an error status"
                    );
                    err
                }
                Err(transport_err) => {
                    let err = ConnectorError::from_transport(transport_err, &request.url);
                    error!(kind = %err.kind(), url = %request.url, error = %err, "Request failed");
                    err
                }
            };

            if !self.policy.should_retry(&failure, attempt) {
                return Err(failure);
            }

            let delay = self.policy.delay_for_attempt(attempt);
            warn!(
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying request"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

fn decode_json(body: &str, url: &str) -> Result<Value, ConnectorError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Null) => Ok(Value::Object(serde_json::Map::new())),
        Ok(value) => Ok(value),
        Err(e) => Err(
            ConnectorError::invalid_response(format!("Invalid JSON response from {url}: {e}"))
                .with_source(e),
        ),
    }
}

// ============================================================================
// Tests
// ============================================================================
