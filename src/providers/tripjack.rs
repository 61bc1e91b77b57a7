//! Tripjack flight search: JSON body, bearer authorization, browser markers.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::body::SearchPayload;
use crate::http::server::AppState;
use crate::providers::{
    detached, Provider, RelayError, Upstream, UpstreamBuildError, BROWSER_USER_AGENT,
};

pub const HEADER_TEMPLATE: &[(&str, &str)] = &[
    ("accept", "application/json, text/plain, */*"),
    ("accept-language", "en-US,en;q=0.9"),
    ("browsername", "chrome"),
    ("browserversion", "137.0.0"),
    ("channeltype", "DESKTOP"),
    ("content-type", "application/json"),
    ("currenv", "prod"),
    ("origin", "https://tripjack.com"),
    ("referer", "https://tripjack.com/"),
    ("user-agent", BROWSER_USER_AGENT),
    ("whitelabel", ""),
];

pub fn upstream(url: &str) -> Result<Upstream, UpstreamBuildError> {
    Upstream::new(Provider::Tripjack, url, HEADER_TEMPLATE, true)
}

/// `POST /api/tripjack/flights`
pub async fn search_flights(
    State(state): State<AppState>,
    headers: HeaderMap,
    SearchPayload(body): SearchPayload,
) -> Result<Response, RelayError> {
    tracing::info!("Tripjack flight search request");
    tracing::debug!(body = %body, "Tripjack request body");

    let authorization = headers.get(AUTHORIZATION).cloned();
    let upstream = state.tripjack.clone();
    let (status, data) = detached(Provider::Tripjack, async move {
        upstream.forward_json(authorization, &body).await
    })
    .await
    .inspect_err(|e| tracing::error!(error = %e, "Tripjack error"))?;

    tracing::info!(
        status = %status,
        has_payload = data.get("payload").is_some_and(|p| !p.is_null()),
        "Tripjack response received"
    );
    Ok((status, Json(data)).into_response())
}
