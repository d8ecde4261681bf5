//! `HttpClient` against a local hyper server, bare and behind recovery.

use std::time::Duration;

use bytes::Bytes;
use http::{Method, StatusCode};
use http_body_util::{BodyExt, Full};
use rebound::middleware::Recovery;
use rebound::{Error, HttpClient, Request, RoundTrip};

mod common;

use common::{Capture, spawn_server};

#[tokio::test]
async fn test_round_trip_echoes_request() {
    let addr = spawn_server(|req: hyper::Request<hyper::body::Incoming>| async move {
        let method = req.method().to_string();
        let tag = req.headers().get("x-tag").cloned();
        let body = req.into_body().collect().await.unwrap().to_bytes();

        let mut resp = http::Response::builder()
            .status(StatusCode::CREATED)
            .header("x-method", method);
        if let Some(tag) = tag {
            resp = resp.header("x-tag", tag);
        }
        resp.body(Full::new(body)).unwrap()
    })
    .await;

    let req = Request::builder(Method::POST, &format!("http://{addr}/items"))
        .header("x-tag", "t-9")
        .body("payload")
        .build()
        .unwrap();

    let resp = HttpClient::new().round_trip(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.header("x-method"), Some("POST"));
    assert_eq!(resp.header("x-tag"), Some("t-9"));
    assert_eq!(resp.text(), Some("payload"));
}

#[tokio::test]
async fn test_deadline_elapses() {
    let addr = spawn_server(|_req: hyper::Request<hyper::body::Incoming>| async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        http::Response::new(Full::new(Bytes::from_static(b"late")))
    })
    .await;

    let client = HttpClient::new().timeout(Duration::from_millis(50));
    let err = client
        .round_trip(Request::get(&format!("http://{addr}/")).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout(d) if d == Duration::from_millis(50)));
}

#[tokio::test]
async fn test_recovery_passes_transport_errors_through() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let sink = Capture::default();
    let client = Recovery::new().log_to(sink.clone()).wrap(HttpClient::new());

    let err = client
        .round_trip(Request::get(&format!("http://{addr}/")).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(sink.contents().is_empty());
}

#[tokio::test]
async fn test_recovery_over_real_transport() {
    let addr = spawn_server(|_req: hyper::Request<hyper::body::Incoming>| async {
        http::Response::new(Full::new(Bytes::from_static(b"pong")))
    })
    .await;

    let client = Recovery::new().wrap(HttpClient::new());
    let resp = client
        .round_trip(Request::get(&format!("http://{addr}/ping")).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text(), Some("pong"));
}
