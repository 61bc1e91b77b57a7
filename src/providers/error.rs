//! Relay error kinds and their HTTP mapping.
//!
//! Every error is produced and reported inside the handler that hit it.
//! Nothing propagates past the request boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::providers::Provider;

const RELOGIN_HINT: &str = "Please login to TBO and update your session cookies";

/// Errors surfaced to the caller of a forwarding route.
#[derive(Debug, Error)]
pub enum RelayError {
    /// `X-TBO-Cookie` missing or empty. Raised before any outbound call.
    #[error("No TBO cookies provided")]
    MissingSessionCookie,

    /// Upstream redirected to its login page.
    #[error("TBO session expired")]
    LoginRedirect { location: String },

    /// Upstream answered with a login or expiry page.
    #[error("TBO session expired or invalid")]
    SessionInvalid { html_length: usize },

    /// Network failure, unreadable body or malformed JSON.
    #[error("{provider} proxy error: {source}")]
    Upstream {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    /// The outbound task panicked or was cancelled.
    #[error("{provider} proxy error: {source}")]
    Aborted {
        provider: Provider,
        #[source]
        source: tokio::task::JoinError,
    },
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingSessionCookie
            | RelayError::LoginRedirect { .. }
            | RelayError::SessionInvalid { .. } => StatusCode::UNAUTHORIZED,
            RelayError::Upstream { .. } | RelayError::Aborted { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            RelayError::MissingSessionCookie => json!({
                "error": self.to_string(),
                "message": "Please provide TBO session cookies in X-TBO-Cookie header",
            }),
            RelayError::LoginRedirect { location } => json!({
                "error": self.to_string(),
                "message": RELOGIN_HINT,
                "redirect": location,
            }),
            RelayError::SessionInvalid { html_length } => json!({
                "error": self.to_string(),
                "message": RELOGIN_HINT,
                "htmlLength": html_length,
            }),
            RelayError::Upstream { provider, source } => json!({
                "error": format!("{provider} proxy error"),
                "message": source.to_string(),
                "details": format!("{source:?}"),
            }),
            RelayError::Aborted { provider, source } => json!({
                "error": format!("{provider} proxy error"),
                "message": source.to_string(),
                "details": format!("{source:?}"),
            }),
        };

        (status, Json(body)).into_response()
    }
}
