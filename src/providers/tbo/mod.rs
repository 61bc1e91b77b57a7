//! TBO flight search: cookie session, pre-encoded form body, HTML results.
//!
//! The session cookie travels in `X-TBO-Cookie` because browsers refuse to
//! forward a `Cookie` header on cross-origin requests.

pub mod form;
pub mod session;

use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{HeaderName, HeaderValue, CONTENT_TYPE, COOKIE, LOCATION},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
};

use crate::http::body::SearchPayload;
use crate::http::server::AppState;
use crate::providers::{
    detached, Provider, RelayError, Upstream, UpstreamBuildError, BROWSER_USER_AGENT,
};

use self::session::{AuthExpiry, SessionOutcome};

/// Custom header carrying the TBO session cookie string.
pub const X_TBO_COOKIE: HeaderName = HeaderName::from_static("x-tbo-cookie");

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

pub const HEADER_TEMPLATE: &[(&str, &str)] = &[
    ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7"),
    ("accept-language", "en-US,en;q=0.9"),
    ("cache-control", "max-age=0"),
    ("content-type", "application/x-www-form-urlencoded"),
    ("origin", "https://m.travelboutiqueonline.com"),
    ("priority", "u=0, i"),
    ("referer", "https://m.travelboutiqueonline.com/FlightSearchResult.aspx"),
    ("sec-ch-ua", "\"Google Chrome\";v=\"137\", \"Chromium\";v=\"137\", \"Not/A)Brand\";v=\"24\""),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "same-origin"),
    ("sec-fetch-user", "?1"),
    ("upgrade-insecure-requests", "1"),
    ("user-agent", BROWSER_USER_AGENT),
];

/// Redirects are surfaced, not followed: a redirect to the login page is
/// how TBO reports an expired session.
pub fn upstream(url: &str) -> Result<Upstream, UpstreamBuildError> {
    Upstream::new(Provider::Tbo, url, HEADER_TEMPLATE, false)
}

/// Raw upstream answer, body kept as received.
#[derive(Debug)]
pub struct UpstreamPage {
    pub status: StatusCode,
    pub location: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Session cookie from the inbound request; empty counts as missing.
pub fn session_cookie(headers: &HeaderMap) -> Option<HeaderValue> {
    headers
        .get(X_TBO_COOKIE)
        .filter(|value| !value.is_empty())
        .cloned()
}

async fn fetch_page(
    upstream: &Upstream,
    cookie: HeaderValue,
    form: String,
) -> Result<UpstreamPage, RelayError> {
    let response = upstream
        .post()
        .header(COOKIE, cookie)
        .body(form)
        .send()
        .await
        .map_err(|e| upstream.upstream_error(e))?;

    let status = response.status();
    let headers = response.headers().clone();
    let location = headers
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response
        .bytes()
        .await
        .map_err(|e| upstream.upstream_error(e))?;

    Ok(UpstreamPage {
        status,
        location,
        headers,
        body,
    })
}

/// `POST /api/tbo/flights`
pub async fn search_flights(
    State(state): State<AppState>,
    headers: HeaderMap,
    SearchPayload(body): SearchPayload,
) -> Result<Response, RelayError> {
    tracing::info!("TBO flight search request");
    tracing::debug!(headers = ?headers, form = %body, "TBO inbound request");

    let Some(cookie) = session_cookie(&headers) else {
        tracing::warn!("No cookies provided");
        return Err(RelayError::MissingSessionCookie);
    };

    let form = form::encode_prefilled(&body);
    tracing::info!(cookie_length = cookie.len(), "Sending TBO request");
    tracing::debug!(form_preview = %preview(&form, 200), "TBO form data");

    let upstream = state.tbo.clone();
    let page = detached(Provider::Tbo, async move {
        fetch_page(&upstream, cookie, form).await
    })
    .await
    .inspect_err(|e| tracing::error!(error = %e, "TBO error"))?;

    let html = String::from_utf8_lossy(&page.body).into_owned();
    tracing::info!(
        status = %page.status,
        html_length = session::html_length(&html),
        "TBO response received"
    );
    tracing::debug!(headers = ?page.headers, "TBO response headers");
    if page.status.is_redirection() {
        tracing::info!(location = ?page.location, "TBO returned redirect");
    }

    match session::classify(page.status, page.location.as_deref(), &html) {
        SessionOutcome::AuthExpired(expiry) => {
            match &expiry {
                AuthExpiry::LoginRedirect { location } => {
                    tracing::warn!(location = %location, "TBO redirected to login");
                }
                AuthExpiry::Invalid { html_length } => {
                    tracing::warn!(
                        html_length,
                        "Response appears to be a login page or session expired"
                    );
                    tracing::debug!(head = %preview(&html, 500), "Rejected TBO page");
                }
            }
            return Err(expiry.into());
        }
        SessionOutcome::Unknown(hint) => {
            tracing::warn!(
                no_flights_notice = hint.no_flights_notice,
                "No flight result markers in TBO page"
            );
        }
        SessionOutcome::Success => {}
    }

    Ok((
        StatusCode::OK,
        [(CONTENT_TYPE, HTML_CONTENT_TYPE)],
        page.body,
    )
        .into_response())
}

/// At most `max_chars` leading characters of `text`.
fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
