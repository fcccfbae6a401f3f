use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::{GroqApi, SportradarApi};
use crate::config::{CacheTtls, Settings};
use crate::error::{ApiError, Result};
use crate::models::CacheStore;
use crate::routes::{create_router, AppState};
use crate::services::{NflQueryService, NflService};

/// Wires the upstream clients, cache and services from validated settings.
pub fn build_state(settings: &Settings) -> Result<AppState> {
    settings.validate()?;

    let upstream = SportradarApi::new(
        &settings.base_url,
        &settings.api_key,
        settings.upstream_timeout(),
    )?;
    info!("Using SportsRadar base URL {}", upstream.base_url());

    if settings.groq_api_key.is_none() {
        warn!("GROQ_API_KEY not set; /api/nfl/query will answer with a fallback message");
    }
    let llm = GroqApi::new(settings.groq_api_key.clone(), settings.upstream_timeout())?;

    let nfl = Arc::new(NflService::new(
        Arc::new(upstream),
        CacheStore::new(),
        CacheTtls::from(&settings.ttl),
    ));
    let query = Arc::new(NflQueryService::new(
        nfl.clone(),
        Arc::new(llm),
        settings.default_season,
    ));

    Ok(AppState { nfl, query })
}

#[tracing::instrument(level = "info", name = "NFL Data Server", skip(state))]
pub async fn start_server(host: &str, port: u16, state: AppState) -> Result<()> {
    let addr: SocketAddr = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| ApiError::Configuration(format!("cannot resolve {:?}: {}", host, e)))?
        .next()
        .ok_or_else(|| ApiError::Configuration(format!("no address found for {:?}", host)))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::Configuration(format!("cannot bind {}: {}", addr, e)))?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Configuration(format!("server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
