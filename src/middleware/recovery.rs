//! Panic recovery for outbound round trips.
//!
//! [`Recover`] runs the wrapped handler inside a `catch_unwind` boundary.
//! A panic anywhere in that handler, whether while building its future or
//! while it is being polled, is caught there and turned into
//! [`Error::Panicked`]. Before the error is returned, in this order:
//!
//! 1. one log record is written to the configured sink, if any;
//! 2. the `on_panic` callback is called, if any.
//!
//! Ordinary `Err` results and successful responses pass through untouched.
//!
//! ```rust
//! use std::io;
//! use rebound::{Request, RoundTrip, round_trip_fn};
//! use rebound::middleware::Recovery;
//!
//! # async fn run() {
//! let flaky = round_trip_fn(|_req: Request| async {
//!     if true { panic!("boom") }
//!     Ok(rebound::Response::new(http::StatusCode::OK))
//! });
//!
//! let client = Recovery::new()
//!     .log_to(io::stderr())
//!     .on_panic(|_resp, req, panic| eprintln!("{} failed: {panic}", req.uri()))
//!     .wrap(flaky);
//!
//! let err = client.round_trip(Request::get("http://localhost/").unwrap()).await.unwrap_err();
//! assert!(err.is_panic());
//! # }
//! ```
//!
//! # Panicking callbacks
//!
//! The callback runs outside the guard. If it panics, that panic unwinds out
//! of the interceptor's future like any other panic in caller code.

use std::fmt;
use std::io::{self, Write};
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Local;
use futures_util::FutureExt;
use http::HeaderName;
use http::header::{AUTHORIZATION, COOKIE, PROXY_AUTHORIZATION};
use tracing::debug;

use crate::error::Error;
use crate::handler::{BoxFuture, RoundTrip};
use crate::panic::Panic;
use crate::request::Request;
use crate::response::Response;

/// Red foreground, then reset. Records stand out in a terminal.
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";


type Sink = Arc<Mutex<dyn Write + Send>>;
type Callback = Arc<dyn Fn(Option<&Response>, &Request, &Panic) + Send + Sync>;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Recovery configuration. Both the sink and the callback are optional;
/// recovery itself is always on.
#[derive(Clone, Default)]
pub struct Recovery {
    sink: Option<Sink>,
    on_panic: Option<Callback>,
}

impl Recovery {
    /// No sink, no callback: panics are converted to errors. Nothing is
    /// written to a writer; a `tracing` debug event is still emitted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one colored, timestamped record per recovered panic to `out`.
    ///
    /// The writer is shared by every request going through the middleware;
    /// each record is written under a lock, so records never interleave.
    pub fn log_to<W>(mut self, out: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let sink: Sink = Arc::new(Mutex::new(out));
        self.sink = Some(sink);
        self
    }

    /// Called once per recovered panic with the response produced so far
    /// (always `None` when the next handler panicked before returning one),
    /// the original request, and the panic payload.
    pub fn on_panic<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&Response>, &Request, &Panic) + Send + Sync + 'static,
    {
        self.on_panic = Some(Arc::new(f));
        self
    }

    /// Wraps `next`, producing a handler of the same shape.
    pub fn wrap<H: RoundTrip>(self, next: H) -> Recover<H> {
        Recover { next, config: self }
    }

    fn recover(&self, req: &Request, panic: Panic) -> Error {
        debug!(method = %req.method(), uri = %req.uri(), %panic, "recovered panic in round trip");

        if let Some(sink) = &self.sink {
            let mut out = sink.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = write_record(&mut *out, req, &panic) {
                debug!("recovery log write failed: {e}");
            }
        }

        if let Some(f) = &self.on_panic {
            f(None, req, &panic);
        }

        Error::Panicked(panic.to_string())
    }
}

impl fmt::Debug for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recovery")
            .field("sink", &self.sink.is_some())
            .field("on_panic", &self.on_panic.is_some())
            .finish()
    }
}

/// Free-function form of [`Recovery::wrap`].
pub fn client_interceptor<H: RoundTrip>(next: H, config: Recovery) -> Recover<H> {
    config.wrap(next)
}

// ── Interceptor ───────────────────────────────────────────────────────────────

/// A [`RoundTrip`] that never lets a panic from `H` escape.
/// Built by [`Recovery::wrap`].
#[derive(Clone, Debug)]
pub struct Recover<H> {
    next: H,
    config: Recovery,
}

impl<H> Recover<H> {
    pub fn get_ref(&self) -> &H {
        &self.next
    }

    pub fn into_inner(self) -> H {
        self.next
    }
}

impl<H: RoundTrip> RoundTrip for Recover<H> {
    fn round_trip(&self, req: Request) -> BoxFuture<'_, Result<Response, Error>> {
        Box::pin(async move {
            let forwarded = req.clone();
            // The call itself sits inside the async block so a panic raised
            // before the handler hands back its future is caught as well.
            let guarded = AssertUnwindSafe(async move { self.next.round_trip(forwarded).await });

            match guarded.catch_unwind().await {
                Ok(res) => res,
                Err(payload) => Err(self.config.recover(&req, Panic::new(payload))),
            }
        })
    }
}

// ── Log record ────────────────────────────────────────────────────────────────

fn write_record<W>(out: &mut W, req: &Request, panic: &Panic) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let mut record = format!(
        "\n\n{RED}{} panic recovered during round trip\n",
        Local::now().format("%Y/%m/%d %H:%M:%S"),
    );
    record.push_str(&format!("{} {} {:?}\r\n", req.method(), req.uri(), req.version()));
    for (name, value) in req.headers() {
        if value.is_sensitive() || is_credential(name) {
            record.push_str(&format!("{name}: *\r\n"));
        } else {
            record.push_str(&format!("{name}: {}\r\n", String::from_utf8_lossy(value.as_bytes())));
        }
    }
    record.push_str(&format!("\r\n{panic}\n{RESET}\n"));

    out.write_all(record.as_bytes())?;
    out.flush()
}

/// Headers whose values never reach the log sink.
fn is_credential(name: &HeaderName) -> bool {
    *name == AUTHORIZATION || *name == PROXY_AUTHORIZATION || *name == COOKIE
}
