//! WordPress connector.
//!
//! Talks to the companion plugin mounted at `/wp-json/ma-plateforme/v1/`
//! using a Bearer token generated by the plugin.

pub mod api;
mod connector;
mod descriptor;
pub(crate) mod parser;

pub use api::HealthStatus;
pub use connector::WordPressConnector;
pub use descriptor::{WORDPRESS_FEATURES, wordpress_descriptor};
