//! Local relay for browser-based flight search.
//!
//! Browsers cannot call the provider APIs directly: cross-origin rules block
//! the requests and session cookies cannot be forwarded. This relay accepts
//! the browser's request, rebuilds it the way each provider expects, makes a
//! single outbound call and hands the answer back.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────────────┐
//!                      │                    FLIGHT RELAY                    │
//!                      │                                                    │
//!   Browser request    │  ┌──────────┐   ┌──────────┐   ┌───────────────┐   │
//!  ────────────────────┼─▶│ request  │──▶│ security │──▶│  http::body   │   │
//!                      │  │ id/trace │   │   cors   │   │ JSON / form   │   │
//!                      │  └──────────┘   └──────────┘   └───────┬───────┘   │
//!                      │                                        │           │
//!                      │           ┌────────────────────────────┼──────┐    │
//!                      │           ▼                ▼           ▼      │    │
//!                      │    ┌────────────┐  ┌────────────┐  ┌────────┐ │    │  Provider
//!                      │    │  travclan  │  │  tripjack  │  │  tbo   │─┼────┼─▶ APIs
//!                      │    │ JSON relay │  │ JSON relay │  │ cookie │ │    │
//!                      │    └────────────┘  └────────────┘  │ + HTML │ │    │
//!                      │                                    └────────┘ │    │
//!   Browser response   │   health · static files · placeholder GIF     │    │
//!  ◀───────────────────┼───────────────────────────────────────────────┘    │
//!                      │                                                    │
//!                      │   config · lifecycle · observability               │
//!                      └────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod providers;
pub mod security;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
