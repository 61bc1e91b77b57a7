//! Browser-facing request policy.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (preflight answered, origin mirrored)
//!     → DefaultBodyLimit (size ceiling, enforced when the body is read)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - No authentication and no rate limiting: credentials are the
//!   upstream providers' concern and pass through untouched
//! - Oversized bodies fail with 413 when the handler extracts them

pub mod cors;

pub use cors::cors_layer;
