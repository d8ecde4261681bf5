//! Incoming HTTP response type.
//!
//! Transports build a [`Response`] from whatever they read off the wire.
//! Tests and stub handlers build one with [`Response::builder`].

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// An HTTP response returned by a [`RoundTrip`](crate::RoundTrip).
///
/// ```rust
/// use rebound::Response;
/// use http::StatusCode;
///
/// let resp = Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/users/42")
///     .body(r#"{"id":42}"#);
///
/// assert_eq!(resp.status(), StatusCode::CREATED);
/// assert_eq!(resp.header("Location"), Some("/users/42"));
/// assert_eq!(resp.text(), Some(r#"{"id":42}"#));
/// ```
#[derive(Clone, Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Response with no headers and no body.
    pub fn new(status: StatusCode) -> Self {
        Self { status, headers: HeaderMap::new(), body: Bytes::new() }
    }

    /// Builder for responses that need headers or a body. Defaults to `200 OK`.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { status: StatusCode::OK, headers: HeaderMap::new() }
    }

    pub fn status(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &Bytes { &self.body }

    /// Case-insensitive header lookup. Non-UTF-8 values are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// The body as UTF-8 text, or `None` if it is not valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}

impl From<http::Response<Bytes>> for Response {
    fn from(resp: http::Response<Bytes>) -> Self {
        let (parts, body) = resp.into_parts();
        Self { status: parts.status, headers: parts.headers, body }
    }
}

/// Fluent builder for [`Response`]. Terminated by [`body`](ResponseBuilder::body)
/// or [`no_body`](ResponseBuilder::no_body).
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HeaderMap,
}

impl ResponseBuilder {
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Appends a header. Names are case-insensitive and stored lowercase.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid header name or `value` contains bytes
    /// a header value cannot carry. Meant for stubs and tests; transports use
    /// `From<http::Response<_>>`.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        let key = HeaderName::from_bytes(name.as_bytes())
            .unwrap_or_else(|e| panic!("invalid header name `{name}`: {e}"));
        let val = HeaderValue::from_str(value)
            .unwrap_or_else(|e| panic!("invalid value for header `{name}`: {e}"));
        self.headers.append(key, val);
        self
    }

    pub fn body(self, body: impl Into<Bytes>) -> Response {
        Response { status: self.status, headers: self.headers, body: body.into() }
    }

    pub fn no_body(self) -> Response {
        self.body(Bytes::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_case_header_names() {
        let resp = Response::builder()
            .header("Content-Type", "text/plain")
            .header("X-Trace-ID", "t-1")
            .no_body();

        assert_eq!(resp.header("content-type"), Some("text/plain"));
        assert_eq!(resp.headers()["x-trace-id"], "t-1");
        assert!(resp.body().is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid header name `bad header`")]
    fn invalid_header_name_panics() {
        Response::builder().header("bad header", "x");
    }

    #[test]
    fn into_body_hands_back_bytes() {
        let resp = Response::builder().status(StatusCode::ACCEPTED).body("queued");
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        assert_eq!(resp.into_body(), Bytes::from_static(b"queued"));
    }
}
