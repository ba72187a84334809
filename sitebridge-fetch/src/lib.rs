// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Sitebridge Fetch
//!
//! Outbound HTTP plumbing shared by every Sitebridge connector.
//!
//! ## Transport
//!
//! - [`transport::Transport`] - The HTTP seam connectors talk through
//! - [`client::HttpClient`] - reqwest-backed transport with a domain allowlist
//! - [`request::HttpRequest`] / [`request::HttpResponse`] - Plain request/response values
//!
//! ## Retry
//!
//! - [`retry::RetryPolicy`] - Attempts, backoff and per-attempt timeout
//! - [`executor::RequestExecutor`] - Runs a request under the policy and
//!   classifies failures into [`error::ConnectorError`]
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sitebridge_fetch::{HttpClient, HttpRequest, RequestExecutor};
//!
//! let executor = RequestExecutor::new(Arc::new(HttpClient::new()?));
//! let stats = executor
//!     .send_json(HttpRequest::get("https://example.com/wp-json/ma-plateforme/v1/stats").bearer(token))
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod executor;
pub mod request;
pub mod retry;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::HttpClient;
pub use error::{ConnectorError, ErrorKind, TransportError, TransportErrorKind};
pub use executor::RequestExecutor;
pub use request::{HttpRequest, HttpResponse, Method};
pub use retry::RetryPolicy;
pub use transport::Transport;
