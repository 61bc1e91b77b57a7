//! Travclan and Tripjack relays against mock upstreams.

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

mod common;

use common::{closed_url, relay, send, start_upstream, UNUSED};

fn json_post(path: &str) -> axum::http::request::Builder {
    Request::post(path).header(CONTENT_TYPE, "application/json")
}

#[tokio::test]
async fn test_travclan_relays_status_and_body() {
    let upstream = start_upstream(|| {
        (
            StatusCode::CREATED,
            Json(json!({"results": [{"airline": "6E", "fare": 5421}], "page": 2})),
        )
            .into_response()
    })
    .await;
    let router = relay(&upstream.url("/api/v3/flights/search/"), UNUSED, UNUSED);

    let request = Request::post("/api/travclan/flights")
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, "Bearer cognito-token")
        .body(Body::from(r#"{"page":2,"from":"DEL","to":"BOM"}"#))
        .unwrap();
    let (status, headers, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(headers[CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!({"results": [{"airline": "6E", "fare": 5421}], "page": 2})
    );

    let captured = upstream.requests();
    assert_eq!(captured.len(), 1);
    let sent = &captured[0];
    assert_eq!(sent.headers[AUTHORIZATION], "Bearer cognito-token");
    assert_eq!(sent.headers["authorization-mode"], "AWSCognito");
    assert_eq!(sent.headers["source"], "website");
    assert_eq!(sent.headers["origin"], "https://www.travclan.com");
    assert_eq!(sent.headers["referer"], "https://www.travclan.com/");
    assert!(sent.headers["user-agent"]
        .to_str()
        .unwrap()
        .contains("Chrome/137"));
    assert_eq!(
        serde_json::from_slice::<Value>(&sent.body).unwrap(),
        json!({"page": 2, "from": "DEL", "to": "BOM"})
    );
}

#[tokio::test]
async fn test_tripjack_relays_error_status_verbatim() {
    let upstream = start_upstream(|| {
        (
            StatusCode::FORBIDDEN,
            Json(json!({"status": {"success": false, "httpStatus": 403}, "errors": [{"message": "token expired"}]})),
        )
            .into_response()
    })
    .await;
    let router = relay(UNUSED, &upstream.url("/xms/v1/backend"), UNUSED);

    let request = json_post("/api/tripjack/flights")
        .header(AUTHORIZATION, "Bearer tj-token")
        .body(Body::from(r#"{"searchQuery":{"cabinClass":"ECONOMY"}}"#))
        .unwrap();
    let (status, _, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["errors"][0]["message"], "token expired");

    let sent = &upstream.requests()[0];
    assert_eq!(sent.headers[AUTHORIZATION], "Bearer tj-token");
    assert_eq!(sent.headers["browsername"], "chrome");
    assert_eq!(sent.headers["browserversion"], "137.0.0");
    assert_eq!(sent.headers["channeltype"], "DESKTOP");
    assert_eq!(sent.headers["currenv"], "prod");
    assert_eq!(sent.headers["whitelabel"], "");
    assert_eq!(sent.headers[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_missing_authorization_is_not_invented() {
    let upstream = start_upstream(|| Json(json!({"payload": null})).into_response()).await;
    let router = relay(UNUSED, &upstream.url("/xms/v1/backend"), UNUSED);

    let request = json_post("/api/tripjack/flights")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _, _) = send(&router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(upstream.requests()[0].headers.get(AUTHORIZATION).is_none());
}

#[tokio::test]
async fn test_form_body_is_forwarded_as_json() {
    let upstream = start_upstream(|| Json(json!({"ok": true})).into_response()).await;
    let router = relay(&upstream.url("/search/"), UNUSED, UNUSED);

    let request = Request::post("/api/travclan/flights")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("page=3&from=DEL"))
        .unwrap();
    let (status, _, _) = send(&router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_slice::<Value>(&upstream.requests()[0].body).unwrap(),
        json!({"page": "3", "from": "DEL"})
    );
}

#[tokio::test]
async fn test_non_json_upstream_is_proxy_error() {
    let upstream = start_upstream(|| "<html>Bad gateway</html>".into_response()).await;
    let router = relay(&upstream.url("/search/"), UNUSED, UNUSED);

    let request = json_post("/api/travclan/flights")
        .body(Body::from(r#"{"page":1}"#))
        .unwrap();
    let (status, _, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Travclan proxy error");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_unreachable_upstream_is_proxy_error() {
    let router = relay(UNUSED, &closed_url().await, UNUSED);

    let request = json_post("/api/tripjack/flights")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Tripjack proxy error");
}
