//! HTTP surface of the service: the shared request context, the router and
//! the shutdown signal.

use crate::engine::connection::ConnectionManager;
use crate::ingestion::handlers::handle_insert;
use crate::search::handlers::handle_search;
use axum::{routing::post, Extension, Router};
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// State shared by every request handler.
pub struct AppContext {
    pub connections: Arc<ConnectionManager>,
    pub index: String,
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/search", post(handle_search))
        .route("/insert", post(handle_insert))
        .layer(Extension(ctx))
        .layer(TraceLayer::new_for_http())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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
}
