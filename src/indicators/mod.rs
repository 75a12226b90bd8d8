// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator functions over a slice of closes. Each
// function looks only at the slice it is given and returns `Option<T>`, with
// `None` meaning "not enough history". Callers that want point-in-time values
// pass the causal prefix of the series (see `crate::chart`).

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::calculate_bollinger;
pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;

/// Look-back shared by SMA, EMA and Bollinger Bands.
pub const MA_PERIOD: usize = 20;
/// Bollinger envelope width in standard deviations.
pub const BOLLINGER_WIDTH: f64 = 2.0;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const RSI_PERIOD: usize = 14;
