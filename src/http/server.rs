//! HTTP server setup.
//!
//! # Responsibilities
//! - Create Axum Router with the demo handlers
//! - Wire up middleware (timeout, recorder, request logger)
//! - Serve on a listener until shutdown

use std::future::Future;
use std::time::Duration;

use axum::{
    extract::{Path, Request},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use crate::access_log::RequestLogger;
use crate::config::ServerConfig;
use crate::http::middleware::{recorder_middleware, RequestLoggerLayer};

/// HTTP server with request logging.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server logging to the configured destination.
    pub fn new(config: ServerConfig) -> Self {
        let logger = RequestLogger::from_config(&config.access_log);
        Self::with_logger(config, logger)
    }

    /// Create a server with an explicit access logger.
    pub fn with_logger(config: ServerConfig, logger: RequestLogger) -> Self {
        let router = Self::build_router(&config, logger);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, logger: RequestLogger) -> Router {
        Router::new()
            .route("/status/{code}", get(status_handler))
            .route("/{*path}", any(echo_handler))
            .route("/", any(echo_handler))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn(recorder_middleware))
            .layer(RequestLoggerLayer::new(logger))
    }

    /// The router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            json = self.config.access_log.enable_log_as_json,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Echo the request line back with 200.
async fn echo_handler(request: Request) -> impl IntoResponse {
    format!("{} {}\n", request.method(), request.uri())
}

/// Answer with the requested status code.
async fn status_handler(Path(code): Path<u16>) -> impl IntoResponse {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, status.to_string()),
        Err(_) => (StatusCode::BAD_REQUEST, format!("invalid status code {}", code)),
    }
}

/// Wait for Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
