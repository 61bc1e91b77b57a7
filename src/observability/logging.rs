//! Structured logging.
//!
//! `tracing` events rendered by the `tracing-subscriber` fmt layer on
//! stdout. `RUST_LOG` overrides the configured level.

use tracing_subscriber::{
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::ObservabilityConfig;

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let level = &config.log_level;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("flight_relay={level},tower_http={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
