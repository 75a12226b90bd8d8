// =============================================================================
// Shared types used across the chart service
// =============================================================================
//
// Wire shapes for the chart endpoint. Indicator fields are `Option` so that
// "not enough history yet" is distinguishable from a computed zero; absent
// values are dropped from the JSON payload entirely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Bollinger envelope around the 20-period SMA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBand {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// MACD line, signal line and histogram for a single point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdData {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Indicator snapshot for one bar, computed from the causal prefix only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger_bands: Option<BollingerBand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sma_20: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ema_20: Option<f64>,
}

/// A bar paired with its as-of indicator snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickData {
    pub bar: Bar,
    pub indicators: Indicators,
}

/// Response body of `GET /api/v1/chart/:symbol`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    pub symbol: String,
    pub data: Vec<CandlestickData>,
}
