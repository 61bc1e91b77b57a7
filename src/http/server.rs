//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build upstream profiles once from configuration
//! - Create the Axum Router with every route
//! - Wire up middleware (request ID, tracing, CORS, body limit)
//! - Serve on a listener until shutdown

use std::future::{Future, IntoFuture};
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, sync::oneshot};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::{RelayConfig, UpstreamsConfig};
use crate::http::assets::{self, IMAGE_ROUTES};
use crate::http::health;
use crate::http::request::{request_span, UuidRequestId, X_REQUEST_ID};
use crate::providers::{tbo, travclan, tripjack, Upstream, UpstreamBuildError};
use crate::security::cors_layer;

/// Application state injected into handlers. Immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub travclan: Upstream,
    pub tripjack: Upstream,
    pub tbo: Upstream,
}

impl AppState {
    pub fn from_config(config: &UpstreamsConfig) -> Result<Self, UpstreamBuildError> {
        Ok(Self {
            travclan: travclan::upstream(&config.travclan_url)?,
            tripjack: tripjack::upstream(&config.tripjack_url)?,
            tbo: tbo::upstream(&config.tbo_url)?,
        })
    }
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, UpstreamBuildError> {
        let state = AppState::from_config(&config.upstreams)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let assets_root = PathBuf::from(&config.assets.root);
        let images = ServeDir::new(&assets_root).fallback(assets::placeholder_image.into_service());

        let mut router = Router::new()
            .route("/health", get(health::health))
            .route("/api/travclan/flights", post(travclan::search_flights))
            .route("/api/tripjack/flights", post(tripjack::search_flights))
            .route("/api/tbo/flights", post(tbo::search_flights));
        for path in IMAGE_ROUTES {
            router = router.route_service(path, images.clone());
        }

        router
            .fallback_service(ServeDir::new(&assets_root))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(cors_layer())
                    .layer(DefaultBodyLimit::max(config.limits.max_body_bytes)),
            )
    }

    /// The fully layered router, for driving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` resolves, then drain.
    ///
    /// In-flight requests get `listener.shutdown_grace_secs` to finish;
    /// whatever is still running after that is abandoned.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        let grace = Duration::from_secs(self.config.listener.shutdown_grace_secs);
        tracing::info!(address = %addr, "HTTP server starting");

        let (draining_tx, draining_rx) = oneshot::channel();
        let signal = async move {
            shutdown.await;
            let _ = draining_tx.send(());
        };
        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .into_future();

        let deadline = async move {
            match draining_rx.await {
                Ok(()) => tokio::time::sleep(grace).await,
                // Server finished without a signal; `serve` wins the race.
                Err(_) => std::future::pending().await,
            }
        };

        tokio::select! {
            result = serve => result?,
            () = deadline => {
                tracing::warn!(
                    grace_secs = grace.as_secs(),
                    "Grace period elapsed, abandoning in-flight requests"
                );
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
