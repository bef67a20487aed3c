use search_backend::app::{router, shutdown_signal, AppContext};
use search_backend::config::BackendConfig;
use search_backend::engine::client::HttpConnector;
use search_backend::engine::connection::ConnectionManager;
use search_backend::engine::index::ensure_index;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before tracing so RUST_LOG may come from the file too
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match dotenv {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    let config = BackendConfig::from_env()?;
    tracing::info!(
        "Using engine {} (index '{}')",
        config.engine_host,
        config.index
    );

    let connector = Arc::new(HttpConnector::new(config.engine_settings()));
    let connections = Arc::new(ConnectionManager::new(connector, config.retry_policy()));

    // Warm up the connection in the background; requests retry on their own.
    let warmup = connections.clone();
    let index = config.index.clone();
    let create_index = config.ensure_index;
    tokio::spawn(async move {
        match warmup.acquire().await {
            Ok(client) => {
                if create_index {
                    if let Err(e) = ensure_index(client.as_ref(), &index).await {
                        tracing::error!("Error checking/creating index '{}': {}", index, e);
                    }
                }
            }
            Err(e) => tracing::warn!("Engine not reachable at startup: {}", e),
        }
    });

    let ctx = Arc::new(AppContext {
        connections,
        index: config.index.clone(),
    });

    let app = router(ctx);

    tracing::info!("HTTP server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}
