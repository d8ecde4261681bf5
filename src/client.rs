//! HTTP transport.
//!
//! [`HttpClient`] is the bottom of a middleware chain: it actually puts the
//! request on the wire, through hyper's pooled client.
//!
//! # Deadlines
//!
//! A per-request deadline is the transport's job, not the middleware's.
//! Set one with [`HttpClient::timeout`]; an elapsed deadline surfaces as
//! [`Error::Timeout`], which every middleware passes through as-is.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use crate::error::Error;
use crate::handler::{BoxFuture, RoundTrip};
use crate::request::Request;
use crate::response::Response;

/// Plain-HTTP client over hyper's connection pool.
///
/// Cheap to clone: clones share the pool.
///
/// ```rust,no_run
/// use std::time::Duration;
/// use rebound::{HttpClient, Request, RoundTrip};
/// use rebound::middleware::Recovery;
///
/// # async fn run() -> Result<(), rebound::Error> {
/// let client = Recovery::new()
///     .log_to(std::io::stderr())
///     .wrap(HttpClient::new().timeout(Duration::from_secs(5)));
///
/// let resp = client.round_trip(Request::get("http://localhost:3000/healthz")?).await?;
/// println!("{}", resp.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client<HttpConnector, Full<Bytes>>,
    timeout: Option<Duration>,
}

impl HttpClient {
    /// Requests must be sent from within a tokio runtime.
    pub fn new() -> Self {
        Self {
            inner: Client::builder(TokioExecutor::new()).build_http(),
            timeout: None,
        }
    }

    /// Fails any request that has not produced a full response within `limit`.
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    async fn send(&self, req: Request) -> Result<Response, Error> {
        let mut out = http::Request::builder()
            .method(req.method().clone())
            .uri(req.uri().clone())
            .version(req.version())
            .body(Full::new(req.body().clone()))?;
        *out.headers_mut() = req.headers().clone();

        let resp = self.inner.request(out).await.map_err(Error::transport)?;
        let (parts, body) = resp.into_parts();
        let body = body.collect().await.map_err(Error::transport)?.to_bytes();

        Ok(http::Response::from_parts(parts, body).into())
    }
}

impl Default for HttpClient {
    fn default() -> Self { Self::new() }
}

impl RoundTrip for HttpClient {
    fn round_trip(&self, req: Request) -> BoxFuture<'_, Result<Response, Error>> {
        Box::pin(async move {
            let Some(limit) = self.timeout else {
                return self.send(req).await;
            };

            match tokio::time::timeout(limit, self.send(req)).await {
                Ok(res) => res,
                Err(_) => {
                    debug!(?limit, "round trip deadline elapsed");
                    Err(Error::Timeout(limit))
                }
            }
        })
    }
}
