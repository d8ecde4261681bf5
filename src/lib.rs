//! # rebound
//!
//! Panic recovery for async HTTP client calls.
//! A panic in a request handler becomes an error value. Nothing more.
//!
//! ## The contract
//!
//! Everything that sends a request implements [`RoundTrip`]. Middleware
//! takes a `RoundTrip` and returns one, so it drops in anywhere the wrapped
//! handler was used.
//!
//! [`middleware::Recovery`] wraps a handler so that:
//!
//! - a normal response, or an ordinary `Err`, passes through unchanged;
//! - a panic inside the handler is caught and returned as
//!   [`Error::Panicked`], never unwinding into the caller;
//! - on a panic, an optional sink gets one colored, timestamped log record,
//!   and then an optional callback gets the request and the [`Panic`] payload.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use rebound::{HttpClient, Request, RoundTrip};
//! use rebound::middleware::Recovery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rebound::Error> {
//!     let client = Recovery::new()
//!         .log_to(std::io::stderr())
//!         .on_panic(|_resp, req, panic| {
//!             tracing::error!(uri = %req.uri(), %panic, "request handler panicked");
//!         })
//!         .wrap(HttpClient::new().timeout(Duration::from_secs(10)));
//!
//!     let resp = client.round_trip(Request::get("http://localhost:3000/users/42")?).await?;
//!     println!("{} {:?}", resp.status(), resp.text());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod handler;
mod panic;
mod request;
mod response;

pub mod middleware;

pub use client::HttpClient;
pub use error::{BoxError, Error};
pub use handler::{BoxFuture, BoxedRoundTrip, RoundTrip, RoundTripFn, round_trip_fn};
pub use panic::Panic;
pub use request::{Request, RequestBuilder};
pub use response::{Response, ResponseBuilder};
