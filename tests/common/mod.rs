//! Shared helpers: mock upstreams and an in-process relay.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::{routing::get, Json, Router};
use meme_relay::app::build_router;
use meme_relay::config::ProxyConfig;
use meme_relay::services::meme::MemeService;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}/gimme", addr)
}

/// Upstream that always answers 200 with `body`.
pub async fn json_upstream(body: Value) -> String {
    spawn_upstream(Router::new().route(
        "/gimme",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    ))
    .await
}

/// Upstream that always answers with `status` and a small text body.
pub async fn status_upstream(status: StatusCode) -> String {
    spawn_upstream(Router::new().route("/gimme", get(move || async move { (status, "upstream says no") })))
        .await
}

/// Address nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/gimme", addr)
}

/// Raw upstream that sends 200 headers with a truncated body, then either
/// holds the socket open for `stall` or closes it immediately.
pub async fn truncated_body_upstream(stall: Option<Duration>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else { break };
            tokio::spawn(async move {
                let mut request = [0u8; 1024];
                let _ = socket.read(&mut request).await;

                let partial = "{\"title\":";
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{}",
                    partial
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.flush().await;

                if let Some(stall) = stall {
                    tokio::time::sleep(stall).await;
                }
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}/gimme", addr)
}

pub fn relay(upstream_url: &str, timeout: Duration) -> Router {
    let service = MemeService::new(upstream_url, timeout).unwrap();
    build_router(Arc::new(service), ProxyConfig::default())
}

/// Send a GET with a cross-origin `Origin` header and decode the JSON body.
pub async fn get_json(router: Router, path: &str) -> (StatusCode, HeaderMap, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .uri(path)
                .header("origin", "http://frontend.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, headers, body)
}
