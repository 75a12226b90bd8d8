// =============================================================================
// Market Data — upstream bar sources
// =============================================================================
//
// The chart handler only needs "daily bars for a symbol". `BarSource` is that
// seam; `AlpacaClient` is the production implementation and tests plug in
// in-memory sources. Every failure here is reported as `FetchError`, which the
// API layer surfaces as "data unavailable" before any indicators run.

pub mod alpaca;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Bar;

pub use alpaca::AlpacaClient;

/// Errors raised while fetching bars from an upstream provider.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure, timeout or TLS error.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("API request failed with status: {status}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can supply a symbol's recent daily bars.
///
/// Implementations must drop records they cannot parse rather than fail the
/// whole request. Ordering of the returned bars is not guaranteed.
#[async_trait]
pub trait BarSource: Send + Sync {
    async fn daily_bars(&self, symbol: &str, lookback_days: u32) -> Result<Vec<Bar>, FetchError>;
}
