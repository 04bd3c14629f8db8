//! Application builder: wires router, middleware and state into an Axum app.

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use registro_core::config::AppConfig;
use registro_core::error::{AppError, ErrorKind};
use registro_core::result::AppResult;
use registro_database::StoreManager;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the Registro server with the given configuration.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!(
        "Initializing store (provider: {})...",
        config.store.provider
    );
    let store = StoreManager::new(&config.store)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, store)?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e))?;
    tracing::info!("Registro listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    tracing::info!("Registro server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
