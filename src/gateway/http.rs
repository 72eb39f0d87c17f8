/// Transport-neutral HTTP request and response values
///
/// The listener turns wire requests into `GatewayRequest`s and writes
/// `GatewayResponse`s back; nothing in the gateway touches sockets.

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};

pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_SESSION_ID: &str = "mcp-session-id";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_WWW_AUTHENTICATE: &str = "www-authenticate";

/// An HTTP request addressed to the server
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl GatewayRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Add a header, skipping names or values that are not valid header text
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Header value as text; header names are matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Status, headers and body to write back to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl GatewayResponse {
    /// A response with no headers and an empty body
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn internal_error() -> Self {
        Self::empty(StatusCode::INTERNAL_SERVER_ERROR).with_body("Internal Server Error")
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// First value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
