//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Validation is a pure
//! function that reports every problem, not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("upstreams.{field} '{value}' is not an absolute http(s) URL")]
    UpstreamUrl { field: &'static str, value: String },

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let upstreams = [
        ("travclan_url", &config.upstreams.travclan_url),
        ("tripjack_url", &config.upstreams.tripjack_url),
        ("tbo_url", &config.upstreams.tbo_url),
    ];
    for (field, value) in upstreams {
        if !is_http_url(value) {
            errors.push(ValidationError::UpstreamUrl {
                field,
                value: value.clone(),
            });
        }
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
