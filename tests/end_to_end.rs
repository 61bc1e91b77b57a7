//! The relay on a real socket: concurrent providers and graceful shutdown.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{response::IntoResponse, Json};
use flight_relay::{HttpServer, RelayConfig, Shutdown};
use serde_json::{json, Value};
use tokio::{net::TcpListener, task::JoinHandle};

mod common;

use common::{closed_url, config, start_slow_upstream, start_upstream, wait_until, UNUSED};

const TBO_COOKIE: &str = "ASP.NET_SessionId=abc";

struct Running {
    addr: SocketAddr,
    shutdown: Shutdown,
    serving: JoinHandle<std::io::Result<()>>,
}

async fn serve(config: RelayConfig) -> Running {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let serving = tokio::spawn(server.run(listener, shutdown.signalled()));
    Running {
        addr,
        shutdown,
        serving,
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn tbo_search(addr: SocketAddr) -> reqwest::RequestBuilder {
    client()
        .post(format!("http://{addr}/api/tbo/flights"))
        .header("x-tbo-cookie", TBO_COOKIE)
        .json(&json!({"origin": "DEL"}))
}

#[tokio::test]
async fn test_concurrent_requests_do_not_interfere() {
    let travclan = start_upstream(|| Json(json!({"results": []})).into_response()).await;
    let tbo = closed_url().await;
    let running = serve(config(&travclan.url("/search/"), UNUSED, &tbo)).await;
    let addr = running.addr;

    let travclan_call = client()
        .post(format!("http://{addr}/api/travclan/flights"))
        .json(&json!({"page": 1}))
        .send();
    let (travclan_response, tbo_response) = tokio::join!(travclan_call, tbo_search(addr).send());

    let travclan_response = travclan_response.unwrap();
    assert_eq!(travclan_response.status(), 200);
    assert_eq!(
        travclan_response.json::<Value>().await.unwrap(),
        json!({"results": []})
    );

    let tbo_response = tbo_response.unwrap();
    assert_eq!(tbo_response.status(), 500);
    let body: Value = tbo_response.json().await.unwrap();
    assert_eq!(body["error"], "TBO proxy error");

    let health = client()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);

    running.shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), running.serving)
        .await
        .expect("server did not drain")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_upstream_call_outlives_client_disconnect() {
    let (upstream, progress) = start_slow_upstream(Duration::from_millis(500)).await;
    let running = serve(config(
        &format!("http://{upstream}/search/"),
        UNUSED,
        UNUSED,
    ))
    .await;

    let addr = running.addr;
    let request = tokio::spawn(
        client()
            .post(format!("http://{addr}/api/travclan/flights"))
            .json(&json!({"page": 1}))
            .send(),
    );
    assert!(wait_until(Duration::from_secs(5), || progress.arrived() == 1).await);

    // Hang up while the upstream is still working.
    request.abort();
    assert!(request.await.unwrap_err().is_cancelled());

    assert!(wait_until(Duration::from_secs(5), || progress.completed() == 1).await);
    assert_eq!(progress.arrived(), 1);
}

#[tokio::test]
async fn test_shutdown_does_not_wait_for_hung_upstream() {
    let (upstream, progress) = start_slow_upstream(Duration::from_secs(3600)).await;
    let mut config = config(UNUSED, UNUSED, &format!("http://{upstream}/FlightSearchResult.aspx"));
    config.listener.shutdown_grace_secs = 1;
    let running = serve(config).await;

    let pending = tokio::spawn(tbo_search(running.addr).send());
    assert!(wait_until(Duration::from_secs(5), || progress.arrived() == 1).await);

    running.shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), running.serving)
        .await
        .expect("shutdown blocked on an in-flight request")
        .unwrap()
        .unwrap();

    assert_eq!(progress.completed(), 0);
    pending.abort();
}
