//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve `/combinedData` through the current aggregator
//! - Swap the aggregator on configuration reloads
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::aggregate::Aggregator;
use crate::config::{ListenerConfig, ServiceConfig};
use crate::http::health::get_health;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::observability::{metrics, tracing::make_request_span};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<ArcSwap<Aggregator>>,
}

/// HTTP server for the combined-data endpoint.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    aggregator: Arc<ArcSwap<Aggregator>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> reqwest::Result<Self> {
        let aggregator = Arc::new(ArcSwap::from_pointee(Aggregator::from_config(&config)?));

        let state = AppState {
            aggregator: aggregator.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            aggregator,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/combinedData", get(combined_data_handler))
            .route("/health", get(get_health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(propagate_request_id_layer()),
            )
    }

    /// Run the server on `listener` until `shutdown` fires.
    ///
    /// Configurations received on `config_updates` replace the aggregator;
    /// listener changes only take effect after a restart.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServiceConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let aggregator = self.aggregator.clone();
        let listener_config = self.config.listener.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                apply_config_update(&aggregator, &listener_config, &new_config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn apply_config_update(
    aggregator: &ArcSwap<Aggregator>,
    current_listener: &ListenerConfig,
    new_config: &ServiceConfig,
) {
    if &new_config.listener != current_listener {
        tracing::warn!(
            bind_address = %new_config.listener.bind_address(),
            "Listener changes require a restart, ignoring"
        );
    }

    match Aggregator::from_config(new_config) {
        Ok(next) => {
            aggregator.store(Arc::new(next));
            tracing::info!(
                comments_url = %new_config.upstream.comments_url,
                posts_url = %new_config.upstream.posts_url,
                users_url = %new_config.upstream.users_url,
                "Configuration reloaded"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to apply reloaded configuration");
        }
    }
}

/// `GET /combinedData`: fetch, join and serve the combined records.
async fn combined_data_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);
    let aggregator = state.aggregator.load_full();

    match aggregator.combined_data().await {
        Ok(records) => {
            tracing::info!(request_id = %request_id, records = records.len(), "Combined data served");
            metrics::record_request(StatusCode::OK.as_u16(), start);
            (StatusCode::OK, Json(records)).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                kind = e.kind(),
                error = %e,
                "Failed to build combined data"
            );
            metrics::record_request(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), start);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
