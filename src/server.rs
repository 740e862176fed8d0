// ABOUTME: HTTP server assembly: shared resources, router with middleware, and graceful shutdown
// ABOUTME: Mounts health, LINE webhook, and sensor telemetry routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

//! # HTTP Server
//!
//! [`ServerResources`] is built once at startup and shared with every route
//! through axum state.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::bot::BotService;
use crate::config::ServerConfig;
use crate::constants::network::MAX_BODY_BYTES;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::line::WebhookSignatureValidator;
use crate::routes::{HealthRoutes, SensorRoutes, WebhookRoutes};

/// Everything the route handlers need
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Storage handle
    pub database: Database,
    /// Chat event handling
    pub bot: BotService,
    /// LINE webhook signature check
    pub signature_validator: WebhookSignatureValidator,
}

impl ServerResources {
    /// Bundle the shared server state
    #[must_use]
    pub fn new(config: Arc<ServerConfig>, database: Database, bot: BotService) -> Self {
        let signature_validator =
            WebhookSignatureValidator::new(config.line.channel_secret.clone());
        Self {
            config,
            database,
            bot,
            signature_validator,
        }
    }
}

/// Build the application router with tracing, timeout, and body-limit layers
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let request_timeout = Duration::from_secs(resources.config.request_timeout_secs);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(WebhookRoutes::routes(Arc::clone(&resources)))
        .merge(SensorRoutes::routes(resources))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the address is invalid, binding fails, or the server
/// stops abnormally
pub async fn serve(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        resources.config.host, resources.config.http_port
    )
    .parse()
    .map_err(|e| AppError::config(format!("Invalid bind address: {e}")))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("HTTP server listening on http://{addr}");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("HTTP server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
