//! Generic REST API connector.
//!
//! Endpoints and the authentication header are configured per site; response
//! payloads are normalized through fallback chains.

mod auth;
mod connector;
mod descriptor;
pub(crate) mod parser;

pub use auth::AuthScheme;
pub use connector::{GenericApiConfig, GenericApiConnector};
pub use descriptor::{GENERIC_FEATURES, generic_descriptor};
