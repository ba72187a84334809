//! Domain models for Sitebridge.
//!
//! ## Submodules
//!
//! - [`site`] - Site configuration (SiteConfig, ConnectorKind)
//! - [`article`] - Publishing types (ArticleInput, PublishResult)
//! - [`content`] - Reading types (ContentPage, ContentList, ListFilters, StatsSnapshot)
//! - [`capability`] - Features and configuration fields
//! - [`descriptor`] - Static connector metadata

mod article;
mod capability;
mod content;
mod descriptor;
mod site;

pub use article::{ArticleInput, ArticleStatus, PublishResult, RemoteId, MAX_TITLE_CHARS};
pub use capability::{ConfigField, Feature, FieldKind, FieldOption};
pub use content::{
    ContentKind, ContentList, ContentPage, ListFilters, StatsSnapshot, Term, DEFAULT_PER_PAGE,
    MAX_PER_PAGE,
};
pub use descriptor::{ConnectorDescriptor, ConnectorDescriptorBuilder};
pub use site::{ConfigValue, ConnectorKind, SiteConfig};
