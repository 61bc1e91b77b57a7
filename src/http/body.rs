//! Inbound body parsing shared by the forwarding routes.
//!
//! JSON and URL-encoded bodies are accepted. Anything else, or an empty
//! body, is treated as an empty object. The size ceiling comes from
//! `DefaultBodyLimit` on the router.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Parsed search request body, field order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPayload(pub Value);

#[derive(Debug, Error)]
pub enum BodyRejection {
    #[error("{0}")]
    Read(#[from] BytesRejection),

    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON body must be an object or an array")]
    NotStructured,

    #[error("invalid form body: {0}")]
    Form(#[from] serde_urlencoded::de::Error),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let status = match &self {
            BodyRejection::Read(rejection) => rejection.status(),
            _ => StatusCode::BAD_REQUEST,
        };
        tracing::warn!(status = %status, error = %self, "Rejected request body");

        let body = json!({
            "error": "Invalid request body",
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn of(headers: &HeaderMap) -> Self {
        let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
            return BodyKind::Other;
        };
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/json" || essence.ends_with("+json") {
            BodyKind::Json
        } else if essence == "application/x-www-form-urlencoded" {
            BodyKind::Form
        } else {
            BodyKind::Other
        }
    }
}

impl<S> FromRequest<S> for SearchPayload
where
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let kind = BodyKind::of(req.headers());
        let bytes = Bytes::from_request(req, state).await?;

        if bytes.is_empty() {
            return Ok(Self(Value::Object(Map::new())));
        }

        let value = match kind {
            BodyKind::Json => {
                let value: Value = serde_json::from_slice(&bytes)?;
                if !(value.is_object() || value.is_array()) {
                    return Err(BodyRejection::NotStructured);
                }
                value
            }
            BodyKind::Form => parse_form(&bytes)?,
            BodyKind::Other => Value::Object(Map::new()),
        };

        Ok(Self(value))
    }
}

/// Decode a form body; repeated keys collect into an array.
fn parse_form(bytes: &[u8]) -> Result<Value, BodyRejection> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(bytes)?;

    let mut fields = Map::new();
    for (key, value) in pairs {
        match fields.get_mut(&key) {
            Some(Value::Array(items)) => items.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                fields.insert(key, Value::String(value));
            }
        }
    }

    Ok(Value::Object(fields))
}
