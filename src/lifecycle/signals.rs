//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C (SIGINT) and trigger a graceful shutdown.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutting down proxy server...");
            shutdown.trigger();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    }
}
