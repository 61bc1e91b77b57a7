//! Observability subsystem.
//!
//! Console logging only: every handler reports through `tracing`, and the
//! request span from `http::request` ties each line to its request ID.

pub mod logging;
