//! Outgoing HTTP request type.

use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri, Version};

use crate::error::Error;

/// An outgoing HTTP request.
///
/// Immutable once built. Cloning is one atomic increment: every clone refers
/// to the same underlying request, which is how a middleware can forward a
/// request to the next handler and still hand the very same instance to a
/// callback afterwards.
///
/// ```rust
/// use rebound::Request;
/// use http::Method;
///
/// let req = Request::builder(Method::POST, "http://localhost:8080/users")
///     .header("content-type", "application/json")
///     .body(r#"{"name":"alice"}"#)
///     .build()
///     .unwrap();
///
/// assert_eq!(req.header("Content-Type"), Some("application/json"));
/// ```
#[derive(Clone, Debug)]
pub struct Request {
    inner: Arc<http::Request<Bytes>>,
}

impl Request {
    /// `GET uri` with no headers and an empty body.
    pub fn get(uri: &str) -> Result<Self, Error> {
        Self::builder(Method::GET, uri).build()
    }

    pub fn builder(method: Method, uri: &str) -> RequestBuilder {
        RequestBuilder {
            inner: http::Request::builder().method(method).uri(uri),
            body: Bytes::new(),
        }
    }

    pub fn method(&self) -> &Method { self.inner.method() }
    pub fn uri(&self) -> &Uri { self.inner.uri() }
    pub fn version(&self) -> Version { self.inner.version() }
    pub fn headers(&self) -> &HeaderMap { self.inner.headers() }
    pub fn body(&self) -> &Bytes { self.inner.body() }

    /// Case-insensitive header lookup. Non-UTF-8 values are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// `true` when both handles point at the same request.
    pub fn ptr_eq(&self, other: &Request) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        Self { inner: Arc::new(req) }
    }
}

/// Fluent builder for [`Request`]. Obtain via [`Request::builder`].
///
/// Invalid URIs or headers are reported once, by [`build`](RequestBuilder::build).
pub struct RequestBuilder {
    inner: http::request::Builder,
    body: Bytes,
}

impl RequestBuilder {
    pub fn header<K, V>(mut self, name: K, value: V) -> Self
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        self.inner = self.inner.header(name, value);
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.inner = self.inner.version(version);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Result<Request, Error> {
        Ok(self.inner.body(self.body)?.into())
    }
}
