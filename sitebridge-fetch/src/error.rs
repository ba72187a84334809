//! Error taxonomy for outbound calls.
//!
//! Errors are classified by cause, not by connector. Every
//! [`ConnectorError`] carries two messages: the internal diagnostic (URL,
//! status, body excerpt) returned by `Display`, and a fixed user-facing
//! message per [`ErrorKind`] returned by [`ConnectorError::user_message`].

use std::fmt;

use sitebridge_core::CoreError;
use thiserror::Error;

/// Longest body excerpt kept in diagnostic messages.
const MAX_BODY_EXCERPT: usize = 300;

// ============================================================================
// Error Kind
// ============================================================================

/// Cause of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The remote did not answer in time.
    Timeout,
    /// DNS failure or connection refused.
    ConnectionError,
    /// HTTP 401.
    InvalidToken,
    /// HTTP 403.
    AccessForbidden,
    /// HTTP 404.
    EndpointNotFound,
    /// HTTP 5xx.
    ServerError,
    /// Malformed or non-JSON body where JSON was expected.
    InvalidResponse,
    /// Any other HTTP or transport failure.
    HttpError,
    /// Site configuration cannot be turned into a request.
    Configuration,
    /// Fallback.
    UnknownError,
}

impl ErrorKind {
    /// Whether the executor may retry a call that failed this way.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::ConnectionError | Self::ServerError
        )
    }

    /// Message suitable for end users.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Timeout => "Le site ne repond pas. Verifiez que le site est accessible.",
            Self::ConnectionError => "Impossible de se connecter au site. Verifiez l'URL.",
            Self::InvalidToken => "Le token API est invalide ou expire. Verifiez la configuration.",
            Self::AccessForbidden => "Acces refuse. Verifiez les permissions du token.",
            Self::EndpointNotFound => {
                "L'endpoint API n'existe pas. Verifiez que le plugin ou l'API est active."
            }
            Self::ServerError => "Erreur serveur sur le site distant. Contactez l'administrateur du site.",
            Self::InvalidResponse => "Reponse invalide du site. Le plugin est-il installe ?",
            Self::HttpError => "Erreur de communication avec le site.",
            Self::Configuration => "La configuration du site est invalide.",
            Self::UnknownError => "Une erreur inconnue est survenue.",
        }
    }

    /// Short identifier used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ConnectionError => "connection_error",
            Self::InvalidToken => "invalid_token",
            Self::AccessForbidden => "access_forbidden",
            Self::EndpointNotFound => "endpoint_not_found",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::HttpError => "http_error",
            Self::Configuration => "configuration",
            Self::UnknownError => "unknown_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Connector Error
// ============================================================================

/// A classified failure of a remote call.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ConnectorError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ConnectorError {
    /// Creates an error with a diagnostic message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Attaches the HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// A malformed body.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }

    /// A configuration problem detected before any request.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Classifies an HTTP error response.
    pub fn from_status(status: u16, body: &str, url: &str) -> Self {
        let detail = error_detail(body);
        let (kind, message) = match status {
            401 => (
                ErrorKind::InvalidToken,
                format!("Invalid API token for {url}: {detail}"),
            ),
            403 => (
                ErrorKind::AccessForbidden,
                format!("Access forbidden for {url}: {detail}"),
            ),
            404 => (ErrorKind::EndpointNotFound, format!("Endpoint not found: {url}")),
            s if s >= 500 => (
                ErrorKind::ServerError,
                format!("Server error ({s}) from {url}: {detail}"),
            ),
            s => (ErrorKind::HttpError, format!("HTTP error {s} from {url}: {detail}")),
        };
        Self::new(kind, message).with_status(status)
    }

    /// Classifies a transport failure.
    pub fn from_transport(err: TransportError, url: &str) -> Self {
        let (kind, message) = match err.kind {
            TransportErrorKind::Timeout => (
                ErrorKind::Timeout,
                format!("Connection timeout to {url}: {}", err.message),
            ),
            TransportErrorKind::Connect => (
                ErrorKind::ConnectionError,
                format!("Cannot connect to {url}: {}", err.message),
            ),
            TransportErrorKind::Other => (
                ErrorKind::HttpError,
                format!("HTTP error for {url}: {}", err.message),
            ),
        };
        Self::new(kind, message).with_source(err)
    }

    /// Cause of the failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status, when the remote answered.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Internal diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message suitable for end users.
    pub fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }

    /// Whether retrying could change the outcome.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// True for HTTP 404.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::EndpointNotFound
    }
}

impl From<CoreError> for ConnectorError {
    fn from(err: CoreError) -> Self {
        Self::configuration(err.to_string()).with_source(err)
    }
}

/// Extracts a readable message from an error body: JSON `message`, then
/// JSON `error`, then the raw body.
fn error_detail(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "No error message provided".to_string();
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["message", "error"] {
            if let Some(text) = json.get(key).and_then(serde_json::Value::as_str) {
                return text.to_string();
            }
        }
    }

    trimmed.chars().take(MAX_BODY_EXCERPT).collect()
}

// ============================================================================
// Transport Error
// ============================================================================

/// Low-level failure category reported by a [`crate::Transport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Request timed out.
    Timeout,
    /// DNS resolution failed or connection refused.
    Connect,
    /// Anything else (TLS, invalid URL, body read).
    Other,
}

/// Error returned by a [`crate::Transport`] when no HTTP response was read.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Failure category.
    pub kind: TransportErrorKind,
    /// Description from the underlying client.
    pub message: String,
}

impl TransportError {
    /// Creates a transport error.
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A timeout.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    /// A connection failure.
    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    /// Any other failure.
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, message)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/wp-json/ma-plateforme/v1/stats";

    #[test]
    fn test_status_classification() {
        assert_eq!(ConnectorError::from_status(401, "", URL).kind(), ErrorKind::InvalidToken);
        assert_eq!(ConnectorError::from_status(403, "", URL).kind(), ErrorKind::AccessForbidden);
        assert_eq!(ConnectorError::from_status(404, "", URL).kind(), ErrorKind::EndpointNotFound);
        assert_eq!(ConnectorError::from_status(500, "", URL).kind(), ErrorKind::ServerError);
        assert_eq!(ConnectorError::from_status(503, "", URL).kind(), ErrorKind::ServerError);
        assert_eq!(ConnectorError::from_status(422, "", URL).kind(), ErrorKind::HttpError);
    }

    #[test]
    fn test_invalid_token_messages() {
        let err = ConnectorError::from_status(401, r#"{"message":"bad token"}"#, URL);
        assert!(err.to_string().contains("bad token"));
        assert!(err.to_string().contains(URL));
        assert!(err.user_message().contains("invalide"));
        assert!(!err.is_retryable());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_error_detail_fallbacks() {
        assert_eq!(error_detail(r#"{"error":"nope"}"#), "nope");
        assert_eq!(error_detail("Internal Server Error"), "Internal Server Error");
        assert_eq!(error_detail("   "), "No error message provided");
        assert_eq!(error_detail(&"x".repeat(1000)).len(), MAX_BODY_EXCERPT);
    }

    #[test]
    fn test_retryable_kinds() {
        let retryable: Vec<_> = [
            ErrorKind::Timeout,
            ErrorKind::ConnectionError,
            ErrorKind::InvalidToken,
            ErrorKind::AccessForbidden,
            ErrorKind::EndpointNotFound,
            ErrorKind::ServerError,
            ErrorKind::InvalidResponse,
            ErrorKind::HttpError,
            ErrorKind::Configuration,
            ErrorKind::UnknownError,
        ]
        .into_iter()
        .filter(ErrorKind::is_retryable)
        .collect();

        assert_eq!(
            retryable,
            vec![ErrorKind::Timeout, ErrorKind::ConnectionError, ErrorKind::ServerError]
        );
    }

    #[test]
    fn test_transport_classification_keeps_source() {
        use std::error::Error as _;

        let err = ConnectorError::from_transport(TransportError::connect("connection refused"), URL);
        assert_eq!(err.kind(), ErrorKind::ConnectionError);
        assert!(err.is_retryable());
        assert!(err.source().is_some());

        let err = ConnectorError::from_transport(TransportError::timeout("deadline"), URL);
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[test]
    fn test_core_error_is_configuration() {
        let err: ConnectorError = CoreError::InvalidConfig("missing url".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(!err.is_retryable());
    }
}
