//! Access Token Extraction
//!
//! Clients carry the access token either in a cookie or as a Bearer
//! header. Extraction is an ordered list of sources, tried in priority
//! order, rather than conditionals scattered across handlers.

use axum::http::{HeaderMap, header};

use platform::cookie::extract_cookie;

/// Cookie name kept for clients predating the camelCase rename
pub const LEGACY_ACCESS_COOKIE: &str = "access_token";

/// Where an access token may be carried, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource<'a> {
    /// Named cookie
    Cookie(&'a str),
    /// `Authorization: Bearer <token>` header
    BearerHeader,
}

impl TokenSource<'_> {
    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        match self {
            TokenSource::Cookie(name) => extract_cookie(headers, name),
            TokenSource::BearerHeader => headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }
}

/// Ordered extraction sources for the access token
pub fn access_token_sources(access_cookie_name: &str) -> [TokenSource<'_>; 3] {
    [
        TokenSource::Cookie(access_cookie_name),
        TokenSource::Cookie(LEGACY_ACCESS_COOKIE),
        TokenSource::BearerHeader,
    ]
}

/// Extract the first access token candidate from the request
pub fn extract_access_token(headers: &HeaderMap, access_cookie_name: &str) -> Option<String> {
    access_token_sources(access_cookie_name)
        .iter()
        .find_map(|s| s.extract(headers))
}
