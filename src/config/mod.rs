//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! --config <PATH> (optional TOML file)
//!     → loader.rs (read & deserialize, defaults fill gaps)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → consumed once at startup to build upstream profiles
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults matching the fixed relay behaviour
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    AssetsConfig, LimitsConfig, ListenerConfig, ObservabilityConfig, RelayConfig,
    UpstreamsConfig,
};
