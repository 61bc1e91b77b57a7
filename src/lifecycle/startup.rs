//! Startup orchestration.
//!
//! Order: upstream profiles → listener → banner → serve. Any startup
//! error is fatal; nothing is served until every profile is built.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::RelayConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::providers::UpstreamBuildError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Upstream(#[from] UpstreamBuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Build, bind and serve until Ctrl+C.
pub async fn run(config: RelayConfig) -> Result<(), StartupError> {
    let server = HttpServer::new(config)?;

    let address = server.config().listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(StartupError::Serve)?;

    log_banner(local_addr, &server.config().assets.root);

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    server
        .run(listener, shutdown.signalled())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn log_banner(addr: SocketAddr, assets_root: &str) {
    tracing::info!(url = %format!("http://{addr}"), "Multi-portal flight search relay started");
    tracing::info!(root = %assets_root, "Serving static files");
    tracing::info!(page = %format!("http://{addr}/flight-search.html"), "Open the search page");
    for (provider, path) in [
        ("Travclan", "/api/travclan/flights"),
        ("Tripjack", "/api/tripjack/flights"),
        ("TBO", "/api/tbo/flights"),
    ] {
        tracing::info!(provider, endpoint = %format!("http://{addr}{path}"), "API endpoint");
    }
}
