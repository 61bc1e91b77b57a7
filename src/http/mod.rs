//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → security::cors (preflight, origin mirroring)
//!     → route:
//!         /health            → health.rs
//!         /images/*          → assets.rs (file or placeholder GIF)
//!         /api/<provider>/…  → body.rs (parse) → providers
//!         anything else      → static files
//! ```

pub mod assets;
pub mod body;
pub mod health;
pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
