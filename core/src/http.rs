//! HTTP transport types shared by the request builders and the transport.
//!
//! # Design
//! Requests and responses are plain data. `endpoints` builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network; a
//! `Transport` executes the round-trip in between. Paths are relative to the
//! base URL the transport is bound to.

/// HTTP method for a request. The BFF only exposes these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `headers` holds only the per-call additions; the transport sends
/// `DEFAULT_HEADERS` first and appends these after them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub(crate) fn new(method: HttpMethod, path: String) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Header carrying the caller's auth token on identity-bearing calls.
pub const TOKEN_HEADER: &str = "X-Cig-Token";

/// Headers sent on every request, fixed at construction.
pub const DEFAULT_HEADERS: [(&str, &str); 4] = [
    ("Accept", "application/json"),
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET,PUT,POST,DELETE,PATCH"),
];

/// Headers to attach for an optional auth token.
pub fn token_headers(token: Option<&str>) -> Vec<(String, String)> {
    token
        .map(|token| vec![(TOKEN_HEADER.to_string(), token.to_string())])
        .unwrap_or_default()
}
