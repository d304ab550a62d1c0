//! Application builder. Wires router, middleware and state into an Axum app.

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use elderease_core::config::AppConfig;
use elderease_core::error::{AppError, ErrorKind};
use elderease_database::Stores;
use elderease_storage::LocalUploadStore;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
}

/// Runs the ElderEase server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ElderEase server...");

    // ── Step 1: Connect stores (and migrate) ─────────────────────
    tracing::info!(backend = %config.database.backend, "Initializing stores...");
    let stores = Stores::connect(&config.database).await?;

    // ── Step 2: Prepare upload directory ─────────────────────────
    let uploads = LocalUploadStore::new(&config.uploads).await?;

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = config.bind_address();
    let state = AppState::new(config, stores.clone(), uploads);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e))?;

    tracing::info!(address = %addr, "ElderEase server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 4: Release connections ──────────────────────────────
    if let Some(pool) = stores.pool() {
        pool.close().await;
    }
    tracing::info!("ElderEase server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
