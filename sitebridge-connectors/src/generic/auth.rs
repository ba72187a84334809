//! Authentication schemes for user-configured REST APIs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sitebridge_fetch::HttpRequest;

/// Header layout used to send the site token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`.
    #[default]
    Bearer,
    /// `X-API-Key: <token>`.
    ApiKey,
    /// `Authorization: Basic base64(<token>)`; the token is `user:password`.
    Basic,
}

impl AuthScheme {
    /// Parses the `authType` config value. Unknown values fall back to Bearer.
    pub fn from_config(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("api_key") => Self::ApiKey,
            Some("basic") => Self::Basic,
            _ => Self::Bearer,
        }
    }

    /// Adds the credentials header to `request`.
    pub fn apply(self, request: HttpRequest, token: &str) -> HttpRequest {
        match self {
            Self::Bearer => request.bearer(token),
            Self::ApiKey => request.header("X-API-Key", token),
            Self::Basic => request.header("Authorization", format!("Basic {}", STANDARD.encode(token))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req() -> HttpRequest {
        HttpRequest::get("https://api.example/v1/posts")
    }

    #[test]
    fn test_from_config() {
        assert_eq!(AuthScheme::from_config(None), AuthScheme::Bearer);
        assert_eq!(AuthScheme::from_config(Some("api_key")), AuthScheme::ApiKey);
        assert_eq!(AuthScheme::from_config(Some("BASIC")), AuthScheme::Basic);
        assert_eq!(AuthScheme::from_config(Some("oauth2")), AuthScheme::Bearer);
    }

    #[test]
    fn test_headers() {
        let bearer = AuthScheme::Bearer.apply(req(), "tok");
        assert_eq!(bearer.header_value("Authorization"), Some("Bearer tok"));

        let key = AuthScheme::ApiKey.apply(req(), "tok");
        assert_eq!(key.header_value("X-API-Key"), Some("tok"));
        assert!(key.header_value("Authorization").is_none());

        let basic = AuthScheme::Basic.apply(req(), "user:pass");
        assert_eq!(basic.header_value("Authorization"), Some("Basic dXNlcjpwYXNz"));
    }
}
