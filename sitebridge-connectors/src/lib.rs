// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Sitebridge Connectors
//!
//! Site connectors for publishing to and reading from remote sites.
//!
//! Every connector implements [`SiteConnector`] and shares one
//! [`sitebridge_fetch::RequestExecutor`], so retry and error classification
//! behave the same whatever the provider. Each connector module includes:
//!
//! - **Descriptor**: Catalog entry (display name, configuration fields, features)
//! - **Connector**: The [`SiteConnector`] implementation
//! - **Parser**: Normalization of remote payloads into core types
//!
//! ## Built-in Connectors
//!
//! | Type | Connector | Publish | Stats | Posts | Pages |
//! |------|-----------|---------|-------|-------|-------|
//! | `wordpress` | [`WordPressConnector`] | plugin API | plugin API | paginated remotely | paginated remotely |
//! | `api` | [`GenericApiConnector`] | configurable endpoint | configurable endpoint | paginated remotely | always empty |
//! | `git` | [`GitConnector`] | Markdown commit | file count | paginated locally | optional directory |
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use sitebridge_connectors::ConnectorFactory;
//! use sitebridge_fetch::{HttpClient, RequestExecutor};
//!
//! let factory = ConnectorFactory::new(RequestExecutor::new(Arc::new(HttpClient::new()?)));
//! let connector = factory.resolve(&site)?;
//! let stats = connector.fetch_stats(&site).await;
//! ```

pub mod batch;
pub mod connector;
pub mod registry;

mod fields;

// Connector modules (alphabetical)
pub mod generic;
pub mod git;
pub mod wordpress;

pub use batch::{SiteOutcome, publish_to_many};
pub use connector::SiteConnector;
pub use registry::{ConnectorConstructor, ConnectorFactory, builtin_descriptors};

pub use generic::{GenericApiConnector, generic_descriptor};
pub use git::{GitConnector, git_descriptor};
pub use wordpress::{WordPressConnector, wordpress_descriptor};
