//! HTTP round-trips described as plain data.
//!
//! # Design
//! The `build_*` methods on `AeroClient` produce `HttpRequest` values and
//! the `parse_*` methods consume `HttpResponse` values; neither touches the
//! network. The agent-backed `execute` step bridges the two, so status
//! interpretation and body decoding stay deterministic and unit-testable
//! without a server. All fields are owned so values can be moved freely
//! between the layers.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data. `path` is the full URL,
/// query string included.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data, fed to the `parse_*` methods
/// for status mapping and deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
