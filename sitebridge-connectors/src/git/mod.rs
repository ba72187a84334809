//! Git-backed static site connector.
//!
//! Articles become Markdown files with a generator-specific frontmatter
//! block, committed through the GitHub or GitLab content API. Reading walks
//! the content directory and parses every file back.
//!
//! # Module layout
//!
//! - `config` - Typed view of the site's configuration map
//! - `slug` - Title to file-name slug
//! - `frontmatter` - Rendering and flat parsing of Markdown files
//! - `provider` - GitHub / GitLab content API calls
//! - `connector` - The [`crate::SiteConnector`] implementation

mod config;
mod connector;
mod descriptor;
mod error;
mod frontmatter;
mod provider;
mod slug;

pub use config::{GitConfig, GitProvider, SiteGenerator};
pub use connector::{Clock, GitConnector};
pub use descriptor::{GIT_FEATURES, git_descriptor};
pub use error::GitError;
pub use frontmatter::{MarkdownFile, date_sort_key, file_name, render_document};
pub use provider::{RepoEntry, repo_path};
pub use slug::slugify;
