//! Minimal rebound example: a handler that panics on one path, wrapped in
//! recovery, in front of a real HTTP transport.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example recover
//!
//! Requests to `/crash` panic inside the handler; the caller gets an error
//! back, stderr gets a red log record, and the callback reports the request.

use std::time::Duration;

use rebound::middleware::Recovery;
use rebound::{BoxedRoundTrip, HttpClient, Request, RoundTrip, round_trip_fn};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let transport = HttpClient::new().timeout(Duration::from_secs(2));

    // A handler that panics on one path and forwards everything else.
    let buggy = round_trip_fn(move |req: Request| {
        let transport = transport.clone();
        async move {
            if req.uri().path() == "/crash" {
                panic!("unexpected route {}", req.uri().path());
            }
            transport.round_trip(req).await
        }
    });

    let client: BoxedRoundTrip = std::sync::Arc::new(
        Recovery::new()
            .log_to(std::io::stderr())
            .on_panic(|_resp, req, panic| {
                tracing::warn!(method = %req.method(), uri = %req.uri(), %panic, "handler panicked");
            })
            .wrap(buggy),
    );

    for path in ["/crash", "/healthz"] {
        let req = Request::get(&format!("http://127.0.0.1:3000{path}")).expect("valid uri");
        match client.round_trip(req).await {
            Ok(resp) => println!("{path}: {}", resp.status()),
            Err(e) => println!("{path}: {e}"),
        }
    }
}
