//! The `RoundTrip` capability and type erasure.
//!
//! # One operation
//!
//! Everything that can send a request implements [`RoundTrip`]: the real
//! transport, a stub in a test, a middleware wrapping either of them. A
//! middleware takes some `H: RoundTrip` and is itself a `RoundTrip`, so
//! layers compose by plain nesting:
//!
//! ```text
//! HttpClient                       ← talks to the network
//!        ↓ Recovery::new().wrap(client)
//! Recover<HttpClient>              ← same shape, panics become errors
//!        ↓ Arc::new(..)
//! BoxedRoundTrip                   ← optional: erase the concrete type
//! ```
//!
//! # Why boxed futures
//!
//! Trait methods cannot name the future an `async` body produces, and the
//! chain above wants `dyn RoundTrip`. So `round_trip` returns a
//! [`BoxFuture`]: one allocation per request, negligible next to network I/O.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;

/// A heap-allocated, type-erased future.
///
/// `Send` lets tokio move it across worker threads; `'a` lets it borrow the
/// handler that produced it.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A type-erased handler shared across concurrent requests.
pub type BoxedRoundTrip = Arc<dyn RoundTrip>;

/// Sends one request and resolves to its response.
///
/// Implement this for transports and middleware. For a one-off closure use
/// [`round_trip_fn`].
pub trait RoundTrip: Send + Sync + 'static {
    fn round_trip(&self, req: Request) -> BoxFuture<'_, Result<Response, Error>>;
}

impl<T: RoundTrip + ?Sized> RoundTrip for Arc<T> {
    fn round_trip(&self, req: Request) -> BoxFuture<'_, Result<Response, Error>> {
        (**self).round_trip(req)
    }
}

impl<T: RoundTrip + ?Sized> RoundTrip for Box<T> {
    fn round_trip(&self, req: Request) -> BoxFuture<'_, Result<Response, Error>> {
        (**self).round_trip(req)
    }
}

// ── Closure adaptor ───────────────────────────────────────────────────────────

/// Adapts an async closure into a [`RoundTrip`].
///
/// ```rust
/// use rebound::{Request, Response, RoundTrip, round_trip_fn};
/// use http::StatusCode;
///
/// # async fn run() -> Result<(), rebound::Error> {
/// let stub = round_trip_fn(|_req: Request| async {
///     Ok(Response::new(StatusCode::NO_CONTENT))
/// });
///
/// let resp = stub.round_trip(Request::get("http://localhost/")?).await?;
/// assert_eq!(resp.status(), StatusCode::NO_CONTENT);
/// # Ok(())
/// # }
/// ```
pub fn round_trip_fn<F, Fut>(f: F) -> RoundTripFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, Error>> + Send + 'static,
{
    RoundTripFn(f)
}

/// A closure wrapped as a [`RoundTrip`]. Built by [`round_trip_fn`].
#[derive(Clone)]
pub struct RoundTripFn<F>(F);

impl<F, Fut> RoundTrip for RoundTripFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, Error>> + Send + 'static,
{
    fn round_trip(&self, req: Request) -> BoxFuture<'_, Result<Response, Error>> {
        Box::pin((self.0)(req))
    }
}
