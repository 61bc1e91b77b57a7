//! Travclan flight search: JSON body, bearer authorization.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::http::body::SearchPayload;
use crate::http::server::AppState;
use crate::providers::{
    detached, Provider, RelayError, Upstream, UpstreamBuildError, BROWSER_USER_AGENT,
};

/// Static headers; `authorization` is added per request.
pub const HEADER_TEMPLATE: &[(&str, &str)] = &[
    ("accept", "application/json, text/plain, */*"),
    ("accept-language", "en-US,en;q=0.9"),
    ("authorization-mode", "AWSCognito"),
    ("content-type", "application/json"),
    ("source", "website"),
    ("user-agent", BROWSER_USER_AGENT),
    ("origin", "https://www.travclan.com"),
    ("referer", "https://www.travclan.com/"),
];

pub fn upstream(url: &str) -> Result<Upstream, UpstreamBuildError> {
    Upstream::new(Provider::Travclan, url, HEADER_TEMPLATE, true)
}

/// `POST /api/travclan/flights`
pub async fn search_flights(
    State(state): State<AppState>,
    headers: HeaderMap,
    SearchPayload(body): SearchPayload,
) -> Result<Response, RelayError> {
    let page = body.get("page").map(Value::to_string).unwrap_or_default();
    tracing::info!(page = %page, "Travclan flight search request");

    let authorization = headers.get(AUTHORIZATION).cloned();
    let upstream = state.travclan.clone();
    let (status, data) = detached(Provider::Travclan, async move {
        upstream.forward_json(authorization, &body).await
    })
    .await
    .inspect_err(|e| tracing::error!(error = %e, "Travclan error"))?;

    tracing::info!(status = %status, "Travclan response received");
    Ok((status, Json(data)).into_response())
}
