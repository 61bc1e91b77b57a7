//! Upstream provider forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (after CORS + body parsing)
//!     → travclan.rs / tripjack.rs (JSON bearer-auth providers)
//!         → Upstream::forward_json (one POST, JSON relay)
//!     → tbo/ (cookie-session HTML provider)
//!         → form.rs (pre-encoded form body)
//!         → Upstream POST, redirects not followed
//!         → session.rs (classify page)
//!     → error.rs (RelayError → 401/500 JSON)
//! ```
//!
//! # Design Decisions
//! - One immutable `Upstream` profile per provider, built once at startup
//! - Outbound calls run in a spawned task: a dropped inbound connection
//!   does not cancel them, and a panic only fails its own request
//! - No retries, no timeouts, no caching

pub mod error;
pub mod tbo;
pub mod travclan;
pub mod tripjack;

use std::fmt;
use std::future::Future;

use axum::http::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION},
    StatusCode,
};
use reqwest::redirect::Policy;
use serde_json::Value;
use thiserror::Error;
use url::Url;

pub use error::RelayError;

/// Chrome 137 on Windows, shared by every provider template.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36";

/// The upstream travel APIs this relay forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Travclan,
    Tripjack,
    Tbo,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Travclan => "Travclan",
            Provider::Tripjack => "Tripjack",
            Provider::Tbo => "TBO",
        };
        f.write_str(name)
    }
}

/// Failure to build an upstream profile at startup.
#[derive(Debug, Error)]
pub enum UpstreamBuildError {
    #[error("invalid {provider} upstream URL '{url}': {source}")]
    Url {
        provider: Provider,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build {provider} HTTP client: {source}")]
    Client {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },
}

/// Immutable outbound profile: target, static header template, client.
#[derive(Debug, Clone)]
pub struct Upstream {
    provider: Provider,
    url: Url,
    headers: HeaderMap,
    client: reqwest::Client,
}

impl Upstream {
    /// Build a profile from a header template.
    ///
    /// Template names must be lowercase static strings.
    pub fn new(
        provider: Provider,
        url: &str,
        template: &[(&'static str, &'static str)],
        follow_redirects: bool,
    ) -> Result<Self, UpstreamBuildError> {
        let url = Url::parse(url).map_err(|source| UpstreamBuildError::Url {
            provider,
            url: url.to_string(),
            source,
        })?;

        let headers = template
            .iter()
            .map(|&(name, value)| {
                (
                    HeaderName::from_static(name),
                    HeaderValue::from_static(value),
                )
            })
            .collect();

        let policy = if follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };
        // Direct connections only; system proxy variables are not consulted.
        let client = reqwest::Client::builder()
            .redirect(policy)
            .no_proxy()
            .build()
            .map_err(|source| UpstreamBuildError::Client { provider, source })?;

        Ok(Self {
            provider,
            url,
            headers,
            client,
        })
    }

    /// The static header template sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A POST to the target carrying the header template.
    pub(crate) fn post(&self) -> reqwest::RequestBuilder {
        self.client
            .post(self.url.clone())
            .headers(self.headers.clone())
    }

    /// POST `body` as JSON and decode the JSON answer.
    ///
    /// `authorization` is copied verbatim from the caller; its correctness
    /// is the caller's responsibility.
    pub async fn forward_json(
        &self,
        authorization: Option<HeaderValue>,
        body: &Value,
    ) -> Result<(StatusCode, Value), RelayError> {
        let mut request = self.post().json(body);
        if let Some(authorization) = authorization {
            request = request.header(AUTHORIZATION, authorization);
        }

        let response = request.send().await.map_err(|e| self.upstream_error(e))?;
        let status = response.status();
        let data = response
            .json::<Value>()
            .await
            .map_err(|e| self.upstream_error(e))?;

        Ok((status, data))
    }

    pub(crate) fn upstream_error(&self, source: reqwest::Error) -> RelayError {
        RelayError::Upstream {
            provider: self.provider,
            source,
        }
    }
}

/// Run an outbound call to completion on its own task.
///
/// The task is not cancelled when the caller's future is dropped.
pub(crate) async fn detached<T, F>(provider: Provider, call: F) -> Result<T, RelayError>
where
    F: Future<Output = Result<T, RelayError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(call)
        .await
        .map_err(|source| RelayError::Aborted { provider, source })?
}
