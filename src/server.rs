//! HTTP server initialization and runtime setup.
//!
//! Builds the cache, upstream client and lookup service, then runs the Axum
//! server until a shutdown signal arrives.

use crate::application::services::LookupService;
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, MemoryCache};
use crate::infrastructure::upstream::{HttpUpstream, UpstreamClient};
use crate::routes::app_router;
use crate::state::{ApiKeys, AppState};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the shared application state from configuration.
///
/// # Errors
///
/// Returns an error if the sanitizer markers are invalid or the upstream
/// client cannot be created.
pub fn build_state(config: &Config) -> Result<AppState> {
    let cache: Arc<dyn CacheService> = Arc::new(MemoryCache::new(config.cache_ttl_seconds));
    tracing::info!("Cache enabled (in-memory, TTL {}s)", config.cache_ttl_seconds);

    let upstream: Arc<dyn UpstreamClient> = Arc::new(
        HttpUpstream::new(&config.upstream_url, config.upstream_timeout())
            .context("Failed to create upstream client")?,
    );

    let lookup_service = Arc::new(LookupService::new(
        cache,
        upstream,
        config.sanitizer()?,
        config.branding.clone(),
    ));

    Ok(AppState::new(
        lookup_service,
        ApiKeys::new(config.api_keys.iter().cloned()),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory response cache
/// - Upstream HTTP client
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - State construction fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
