// =============================================================================
// Chart API — Main Entry Point
// =============================================================================
//
// Serves daily candlestick data annotated with SMA/EMA, Bollinger Bands, MACD
// and RSI. Every request fetches fresh bars from Alpaca and recomputes the
// indicators; there is no cache.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod chart;
mod config;
mod error;
mod indicators;
mod market_data;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::AppConfig;
use crate::market_data::AlpacaClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::resolve()?;

    info!(
        bind_addr = %config.bind_addr,
        lookback_days = config.lookback_days,
        origins = ?config.allowed_origins,
        "Chart API starting"
    );
    info!(feed = %config.alpaca.feed, data_url = %config.alpaca.data_url, "Using Alpaca market data");

    // ── 2. Upstream client & shared state ────────────────────────────────
    let client = AlpacaClient::new(&config.alpaca)?;
    let state = Arc::new(AppState::new(Arc::new(client), config.lookback_days));

    // ── 3. API server ────────────────────────────────────────────────────
    let app = api::rest::router(state, &config.allowed_origins);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("Chart API shut down complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received — stopping gracefully");
}
