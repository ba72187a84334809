//! The HTTP seam connectors talk through.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{HttpRequest, HttpResponse};

/// Sends one HTTP request and reads the full response.
///
/// Implementations must be safe to share between concurrent calls. Non-2xx
/// statuses are responses, not errors: classification is the executor's job.
/// An error means no response was read (timeout, DNS, refused connection).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the request once, without retrying.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
