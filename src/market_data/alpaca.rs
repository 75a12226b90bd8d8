// =============================================================================
// Alpaca Market Data Client — daily bars over REST
// =============================================================================
//
// GET {data_url}/stocks/{symbol}/bars?start=..&end=..&timeframe=1Day&limit=..&feed=..
//
// SECURITY: The secret key is sent as a header only; it is never logged or
// included in `Debug` output.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{BarSource, FetchError};
use crate::config::AlpacaConfig;
use crate::types::Bar;

/// Raw bar as returned by the Alpaca v2 bars endpoint.
#[derive(Debug, Deserialize)]
struct AlpacaBar {
    t: String,
    o: f64,
    h: f64,
    l: f64,
    c: f64,
    v: i64,
}

#[derive(Debug, Deserialize)]
struct AlpacaBarsResponse {
    // Alpaca sends `"bars": null` when the range holds no trading days.
    #[serde(default)]
    bars: Option<Vec<AlpacaBar>>,
}

/// Alpaca REST client for historical daily bars.
#[derive(Clone)]
pub struct AlpacaClient {
    data_url: String,
    feed: String,
    client: reqwest::Client,
}

impl AlpacaClient {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Create a new `AlpacaClient` from explicit configuration.
    ///
    /// Fails if a credential cannot be encoded as a header value or the HTTP
    /// client cannot be built.
    pub fn new(config: &AlpacaConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();

        let key = HeaderValue::from_str(&config.api_key)
            .context("APCA_API_KEY_ID is not a valid header value")?;
        default_headers.insert("APCA-API-KEY-ID", key);

        let mut secret = HeaderValue::from_str(&config.api_secret)
            .context("APCA_API_SECRET_KEY is not a valid header value")?;
        secret.set_sensitive(true);
        default_headers.insert("APCA-API-SECRET-KEY", secret);

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        debug!(data_url = %config.data_url, feed = %config.feed, "AlpacaClient initialised");

        Ok(Self {
            data_url: config.data_url.trim_end_matches('/').to_string(),
            feed: config.feed.clone(),
            client,
        })
    }

    /// GET /stocks/{symbol}/bars for the `lookback_days` days ending today.
    #[instrument(skip(self), name = "alpaca::get_daily_bars")]
    pub async fn get_daily_bars(&self, symbol: &str, lookback_days: u32) -> Result<Vec<Bar>, FetchError> {
        let url = format!("{}/stocks/{}/bars", self.data_url, symbol);
        let query = bars_query(Utc::now().date_naive(), lookback_days, &self.feed);

        let resp = self.client.get(&url).query(&query).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            warn!(symbol, status = status.as_u16(), body = %body, "Alpaca bars request rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bars = parse_bars(&body)?;
        debug!(symbol, count = bars.len(), "daily bars fetched");
        Ok(bars)
    }
}

#[async_trait]
impl BarSource for AlpacaClient {
    async fn daily_bars(&self, symbol: &str, lookback_days: u32) -> Result<Vec<Bar>, FetchError> {
        self.get_daily_bars(symbol, lookback_days).await
    }
}

impl std::fmt::Debug for AlpacaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaClient")
            .field("data_url", &self.data_url)
            .field("feed", &self.feed)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Internal helpers
// -----------------------------------------------------------------------------

/// Query string for a daily-bars request ending on `today`.
fn bars_query(today: NaiveDate, lookback_days: u32, feed: &str) -> Vec<(&'static str, String)> {
    let start = today - chrono::Duration::days(i64::from(lookback_days));
    vec![
        ("start", start.format("%Y-%m-%d").to_string()),
        ("end", today.format("%Y-%m-%d").to_string()),
        ("timeframe", "1Day".to_string()),
        ("limit", lookback_days.to_string()),
        ("feed", feed.to_string()),
    ]
}

/// Decode a bars response body, skipping records with unparseable timestamps.
fn parse_bars(body: &str) -> Result<Vec<Bar>, FetchError> {
    let response: AlpacaBarsResponse = serde_json::from_str(body)?;

    let bars = response
        .bars
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| match DateTime::parse_from_rfc3339(&raw.t) {
            Ok(ts) => Some(Bar {
                timestamp: ts.with_timezone(&Utc),
                open: raw.o,
                high: raw.h,
                low: raw.l,
                close: raw.c,
                volume: raw.v,
            }),
            Err(e) => {
                warn!(timestamp = %raw.t, error = %e, "skipping bar with unparseable timestamp");
                None
            }
        })
        .collect();

    Ok(bars)
}
