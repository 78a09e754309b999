//! HTTP server for the Prometheus metrics endpoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use hadoop_exporter_common::CONTENT_TYPE;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info};

use crate::exporter::Exporter;

/// Application state shared across handlers.
struct AppState<E> {
    exporter: Arc<E>,
}

impl<E> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            exporter: self.exporter.clone(),
        }
    }
}

/// Create the HTTP router.
pub fn create_router<E: Exporter>(exporter: Arc<E>, metrics_path: &str) -> Router {
    let state = AppState { exporter };

    Router::new()
        .route(metrics_path, get(metrics_handler::<E>))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handler for the metrics endpoint. Every request runs its own collection pass.
async fn metrics_handler<E: Exporter>(State(state): State<AppState<E>>) -> Response {
    let started = Instant::now();
    let exporter = state.exporter.name();

    let snapshot = match state.exporter.collect().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(exporter, error = %e, "Collection failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("collection failed: {}\n", e),
            )
                .into_response();
        }
    };

    let families = snapshot.families().len();
    let samples = snapshot.sample_count();

    match snapshot.encode_text() {
        Ok(body) => {
            debug!(
                exporter,
                families,
                samples,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Scrape complete"
            );
            (StatusCode::OK, [("content-type", CONTENT_TYPE)], body).into_response()
        }
        Err(e) => {
            error!(exporter, error = %e, "Encoding failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{}\n", e)).into_response()
        }
    }
}

/// Handler for the /health endpoint.
async fn health_handler() -> Response {
    (StatusCode::OK, "healthy\n").into_response()
}

/// HTTP server configuration.
pub struct HttpServer<E> {
    exporter: Arc<E>,
    listen_addr: SocketAddr,
    metrics_path: String,
}

impl<E: Exporter> HttpServer<E> {
    /// Create a new HTTP server.
    pub fn new(exporter: Arc<E>, listen_addr: SocketAddr, metrics_path: String) -> Self {
        Self {
            exporter,
            listen_addr,
            metrics_path,
        }
    }

    /// Bind the listener and serve until the shutdown signal is received.
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.listen_addr, e))?;

        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until the shutdown signal is received.
    pub async fn serve(
        self,
        listener: tokio::net::TcpListener,
        mut shutdown: watch::Receiver<bool>,
    ) -> anyhow::Result<()> {
        let router = create_router(self.exporter, &self.metrics_path);
        let addr = listener.local_addr()?;

        info!(
            addr = %addr,
            path = %self.metrics_path,
            "HTTP server listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                loop {
                    if shutdown.changed().await.is_err() {
                        break;
                    }
                    if *shutdown.borrow() {
                        break;
                    }
                }
                info!("HTTP server shutting down");
            })
            .await
            .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

        info!("HTTP server stopped");
        Ok(())
    }
}
