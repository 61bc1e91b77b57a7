//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::DefaultBodyLimit,
    http::{HeaderMap, Request, StatusCode},
    response::Response,
    Router,
};
use flight_relay::{HttpServer, RelayConfig};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Placeholder upstream for providers a test does not exercise.
pub const UNUSED: &str = "http://127.0.0.1:9/unused";

/// One request as seen by a mock upstream.
#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// A programmable upstream that records every request it receives.
pub struct MockUpstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl MockUpstream {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

/// Start a mock upstream on an ephemeral port; `respond` builds each answer.
pub async fn start_upstream<F>(respond: F) -> MockUpstream
where
    F: Fn() -> Response + Clone + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));

    let sink = captured.clone();
    let app = Router::new()
        .fallback(move |headers: HeaderMap, body: Bytes| {
            let sink = sink.clone();
            let respond = respond.clone();
            async move {
                sink.lock().unwrap().push(Captured { headers, body });
                respond()
            }
        })
        // Accept whatever the relay forwards; its own limit is under test.
        .layer(DefaultBodyLimit::disable());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream { addr, captured }
}

/// Counters kept by a slow upstream.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    arrived: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
}

impl Progress {
    pub fn arrived(&self) -> usize {
        self.arrived.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

/// Start an upstream that waits `delay` before answering `{}`.
///
/// `completed` only moves when the handler runs to the end, so it stays
/// put if the caller hangs up and the server drops the handler.
pub async fn start_slow_upstream(delay: Duration) -> (SocketAddr, Progress) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let progress = Progress::default();

    let tracked = progress.clone();
    let app = Router::new().fallback(move || {
        let tracked = tracked.clone();
        async move {
            tracked.arrived.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            tracked.completed.fetch_add(1, Ordering::SeqCst);
            "{}"
        }
    });

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, progress)
}

/// Poll `condition` every 10ms until it holds or `limit` passes.
pub async fn wait_until(limit: Duration, condition: impl Fn() -> bool) -> bool {
    let polling = async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };
    tokio::time::timeout(limit, polling).await.is_ok()
}

/// URL of a local port with nothing listening.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/closed")
}

pub fn config(travclan: &str, tripjack: &str, tbo: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.upstreams.travclan_url = travclan.to_string();
    config.upstreams.tripjack_url = tripjack.to_string();
    config.upstreams.tbo_url = tbo.to_string();
    config
}

pub fn relay(travclan: &str, tripjack: &str, tbo: &str) -> Router {
    relay_with(config(travclan, tripjack, tbo))
}

pub fn relay_with(config: RelayConfig) -> Router {
    HttpServer::new(config).unwrap().router()
}

/// Drive one request through the router and buffer the answer.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}
