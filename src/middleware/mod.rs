//! Middleware layer.
//!
//! Middleware wraps a [`RoundTrip`](crate::RoundTrip) and is itself one, so
//! it is the right place for cross-cutting concerns around outbound calls.
//!
//! Built-in middleware:
//! - [`recovery`]: turns a panic inside the wrapped round trip into an
//!   [`Error::Panicked`](crate::Error::Panicked), with optional logging and
//!   a notification callback.

pub mod recovery;

pub use recovery::{Recover, Recovery};
