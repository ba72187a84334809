// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Sitebridge Core
//!
//! Core types and models shared by every Sitebridge crate.
//!
//! This crate only holds data: nothing here performs I/O. The connectors
//! crate turns these values into HTTP calls and normalizes the answers
//! back into them.
//!
//! ## Key Types
//!
//! ### Sites
//! - [`SiteConfig`] - A remote target as handed over by the caller
//! - [`ConfigValue`] - One entry of the adapter-specific configuration map
//! - [`ConnectorKind`] - The built-in connector families
//!
//! ### Publishing
//! - [`ArticleInput`] - An article to publish
//! - [`ArticleStatus`] - Draft / publish / pending / private
//! - [`PublishResult`] - Outcome of one publish call
//!
//! ### Reading
//! - [`StatsSnapshot`] - Aggregate counts for a site
//! - [`ContentPage`] - A normalized post or page
//! - [`ContentList`] - One page of listing results
//! - [`ListFilters`] - Pagination, status and search filters
//!
//! ### Capabilities
//! - [`Feature`] - Named capabilities a connector declares
//! - [`ConfigField`] - One configuration field shown to users
//! - [`ConnectorDescriptor`] - Catalog entry for a connector type

pub mod error;
pub mod models;

pub use error::CoreError;

pub use models::{
    // Sites
    ConfigValue,
    ConnectorKind,
    SiteConfig,
    // Publishing
    ArticleInput,
    ArticleStatus,
    PublishResult,
    RemoteId,
    MAX_TITLE_CHARS,
    // Reading
    ContentKind,
    ContentList,
    ContentPage,
    ListFilters,
    StatsSnapshot,
    Term,
    DEFAULT_PER_PAGE,
    MAX_PER_PAGE,
    // Capabilities
    ConfigField,
    ConnectorDescriptor,
    ConnectorDescriptorBuilder,
    Feature,
    FieldKind,
    FieldOption,
};
