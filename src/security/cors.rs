//! Cross-origin policy for the browser client.
//!
//! Any origin is accepted and mirrored back so credentials can be allowed.
//! Every `OPTIONS` request is answered here as a preflight and never
//! reaches a handler.

use axum::http::{
    header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
    Method,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::providers::tbo::X_TBO_COOKIE;

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, X_TBO_COOKIE])
        .expose_headers([CONTENT_LENGTH, CONTENT_TYPE])
}
