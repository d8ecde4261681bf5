//! Shared test helpers: a capturing log sink, stub handlers and a local
//! hyper server.

#![allow(dead_code)]

use std::convert::Infallible;
use std::future::Future;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use rebound::{Error, Request, Response, RoundTrip, round_trip_fn};
use tokio::net::TcpListener;

/// In-memory `Write` sink whose clones share one buffer.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Next-handler that always answers `200 OK` with body `"ok"`.
pub fn ok_handler() -> impl RoundTrip + Clone {
    round_trip_fn(|_req: Request| async { Ok(Response::builder().body("ok")) })
}

/// Next-handler that panics with `msg` on every call.
pub fn panicking(msg: &'static str) -> impl RoundTrip + Clone {
    round_trip_fn(move |_req: Request| async move {
        if msg.is_empty() {
            return Ok(Response::new(StatusCode::OK));
        }
        std::panic::panic_any(msg)
    })
}

/// Next-handler that fails with an ordinary error.
pub fn failing() -> impl RoundTrip + Clone {
    round_trip_fn(|_req: Request| async { Err(Error::transport("connection reset")) })
}

/// Starts a local HTTP server on an ephemeral port; `handler` answers every
/// request. The server lives until the test runtime shuts down.
pub async fn spawn_server<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(hyper::Request<Incoming>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = http::Response<Full<Bytes>>> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else { continue };
            let handler = handler.clone();

            tokio::spawn(async move {
                let svc = service_fn(move |req| {
                    let fut = handler(req);
                    async move { Ok::<_, Infallible>(fut.await) }
                });
                let _ = ConnBuilder::new(TokioExecutor::new())
                    .serve_connection(TokioIo::new(stream), svc)
                    .await;
            });
        }
    });

    addr
}
