//! reqwest-backed [`Transport`] with tracing and a domain allowlist.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, instrument};
use url::Url;

use crate::error::TransportError;
use crate::request::{HttpRequest, HttpResponse, Method};
use crate::transport::Transport;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for Sitebridge.
const USER_AGENT: &str = concat!("sitebridge/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and an optional domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom default timeout.
    ///
    /// Requests carrying their own timeout override this value.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                TransportError::other(format!(
                    "Failed to create HTTP client: {e}. This usually indicates a broken TLS configuration."
                ))
            })?;

        Ok(Self {
            inner: client,
            allowed_domains: None,
        })
    }

    /// Restricts requests to the given domains and their subdomains.
    #[must_use]
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &Url) -> Result<(), TransportError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let host = url
            .host_str()
            .ok_or_else(|| TransportError::other("No host in URL"))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(TransportError::other(format!("Domain not allowed: {host}")))
        }
    }

    /// Returns the inner reqwest client for advanced operations.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl HttpClient {
    /// Builds the outgoing request. `Accept` defaults to JSON unless the
    /// request already names one.
    fn build_request(&self, request: &HttpRequest) -> Result<reqwest::RequestBuilder, TransportError> {
        let url = request
            .resolved_url()
            .map_err(|e| TransportError::other(format!("Invalid URL: {e}")))?;
        self.is_domain_allowed(&url)?;

        let mut builder = self.inner.request(reqwest_method(request.method), url);
        if request.header_value("Accept").is_none() {
            builder = builder.header(header::ACCEPT, "application/json");
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder)
    }
}

#[async_trait]
impl Transport for HttpClient {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self.build_request(&request)?.send().await?;
        let status = response.status().as_u16();
        debug!(status, "Response received");

        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Tests
// ============================================================================
