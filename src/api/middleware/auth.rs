//! Extraction of the `auth` credential.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, Uri, request::Parts},
};

/// Name of both the query parameter and the header carrying the secret.
pub const AUTH_PARAM: &str = "auth";

/// Values supplied for `auth` on a request.
///
/// # Sources
///
/// ```text
/// GET /.list?auth=<secret>
/// auth: <secret>
/// ```
///
/// Extraction never fails; whether the values are acceptable is decided by
/// [`crate::application::services::AuthService::authorize`], which is only
/// consulted for gated operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthKey {
    pub query: Option<String>,
    pub header: Option<String>,
}

impl AuthKey {
    /// Reads the first `auth` query parameter and the `auth` header.
    pub fn from_parts(uri: &Uri, headers: &HeaderMap) -> Self {
        let query = uri.query().and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == AUTH_PARAM)
                .map(|(_, value)| value.into_owned())
        });

        let header = headers
            .get(AUTH_PARAM)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self { query, header }
    }

    /// Supplied values in check order: query parameter, then header.
    pub fn candidates(&self) -> Vec<&str> {
        self.query
            .as_deref()
            .into_iter()
            .chain(self.header.as_deref())
            .collect()
    }
}

impl<S> FromRequestParts<S> for AuthKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(&parts.uri, &parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_reads_query_parameter() {
        let uri: Uri = "/.list?json&auth=s3cret".parse().unwrap();
        let key = AuthKey::from_parts(&uri, &HeaderMap::new());

        assert_eq!(key.query.as_deref(), Some("s3cret"));
        assert!(key.header.is_none());
        assert_eq!(key.candidates(), vec!["s3cret"]);
    }

    #[test]
    fn test_query_parameter_is_percent_decoded() {
        let uri: Uri = "/.list?auth=a%20b%2Bc".parse().unwrap();
        let key = AuthKey::from_parts(&uri, &HeaderMap::new());

        assert_eq!(key.query.as_deref(), Some("a b+c"));
    }

    #[test]
    fn test_reads_header() {
        let uri: Uri = "/.list".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_PARAM, HeaderValue::from_static("s3cret"));

        let key = AuthKey::from_parts(&uri, &headers);

        assert!(key.query.is_none());
        assert_eq!(key.candidates(), vec!["s3cret"]);
    }

    #[test]
    fn test_both_sources_in_order() {
        let uri: Uri = "/?auth=from-query".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_PARAM, HeaderValue::from_static("from-header"));

        let key = AuthKey::from_parts(&uri, &headers);

        assert_eq!(key.candidates(), vec!["from-query", "from-header"]);
    }

    #[test]
    fn test_absent_everywhere() {
        let uri: Uri = "/code".parse().unwrap();
        let key = AuthKey::from_parts(&uri, &HeaderMap::new());

        assert_eq!(key, AuthKey::default());
        assert!(key.candidates().is_empty());
    }
}
