//! Git adapter errors.

use sitebridge_fetch::ConnectorError;
use thiserror::Error;

/// Failure inside a Git hosting API call sequence.
#[derive(Debug, Error)]
pub enum GitError {
    /// The configured provider has no API support.
    #[error("Provider non supporte: {0}")]
    UnsupportedProvider(String),

    /// The repository URL does not contain an `owner/name` path.
    #[error("Invalid repository URL: {0}")]
    InvalidRepository(String),

    /// A file body could not be decoded.
    #[error("Cannot decode {path}: {reason}")]
    Decode {
        /// Repository path of the file.
        path: String,
        /// Decoder message.
        reason: String,
    },

    /// The hosting API call failed.
    #[error(transparent)]
    Remote(#[from] ConnectorError),
}

impl GitError {
    /// True when the hosting API answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote(e) if e.is_not_found())
    }
}

impl From<GitError> for ConnectorError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::Remote(e) => e,
            GitError::Decode { .. } => ConnectorError::invalid_response(err.to_string()),
            GitError::UnsupportedProvider(_) | GitError::InvalidRepository(_) => {
                ConnectorError::configuration(err.to_string())
            }
        }
    }
}
