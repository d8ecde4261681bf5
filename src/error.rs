//! Unified error type.

use std::time::Duration;

/// A boxed, thread-safe error from an underlying transport.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by a [`RoundTrip`](crate::RoundTrip).
///
/// Next-handlers report their own failures as [`Error::Transport`] (or any
/// other variant) and the recovery middleware passes them through untouched.
/// [`Error::Panicked`] is the only variant the middleware produces itself.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed to deliver the request or read the response.
    #[error("transport: {0}")]
    Transport(#[source] BoxError),

    /// The request could not be built (invalid URI, header name or value).
    #[error("http: {0}")]
    Http(#[from] http::Error),

    /// No response arrived before the configured deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The next-handler panicked. Carries the rendered panic payload.
    #[error("panic recovered during round trip: {0}")]
    Panicked(String),
}

impl Error {
    /// Wraps any transport error.
    pub fn transport(e: impl Into<BoxError>) -> Self {
        Self::Transport(e.into())
    }

    /// `true` when this error was converted from a panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }
}
