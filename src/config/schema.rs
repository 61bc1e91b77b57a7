//! Configuration schema definitions.
//!
//! Every section has defaults that reproduce the relay's fixed behaviour, so
//! running without a config file (or with an empty one) is valid.

use serde::{Deserialize, Serialize};

/// Travclan flight search endpoint.
pub const TRAVCLAN_SEARCH_URL: &str =
    "https://aggregator-flights-v1.travclan.com/api/v3/flights/search/";

/// Tripjack backend endpoint.
pub const TRIPJACK_SEARCH_URL: &str = "https://tripjack.com/xms/v1/backend";

/// TBO mobile search results page.
pub const TBO_SEARCH_URL: &str = "https://m.travelboutiqueonline.com/FlightSearchResult.aspx";

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Static asset serving.
    pub assets: AssetsConfig,

    /// Upstream provider endpoints.
    pub upstreams: UpstreamsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:3001").
    pub bind_address: String,

    /// Seconds in-flight requests may run after a shutdown signal before
    /// they are dropped.
    pub shutdown_grace_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            shutdown_grace_secs: 5,
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum JSON or URL-encoded body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory served verbatim (HTML, CSS, JS, images).
    pub root: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
        }
    }
}

/// Upstream endpoints, one per provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamsConfig {
    pub travclan_url: String,
    pub tripjack_url: String,
    pub tbo_url: String,
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            travclan_url: TRAVCLAN_SEARCH_URL.to_string(),
            tripjack_url: TRIPJACK_SEARCH_URL.to_string(),
            tbo_url: TBO_SEARCH_URL.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
