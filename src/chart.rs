// =============================================================================
// Chart Assembly — point-in-time indicator evaluation
// =============================================================================
//
// Turns a bar series into one annotated record per bar. The indicators for
// bar `i` are computed from `closes[..=i]` only, so no record ever sees a
// later price. This is the single place that enforces causality; the
// indicator functions just work on whatever slice they receive.
//
// Each indicator has its own length gate. There is no shared warm-up.
// =============================================================================

use crate::indicators::{
    calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
    BOLLINGER_WIDTH, MACD_SLOW, MA_PERIOD, RSI_PERIOD,
};
use crate::types::{Bar, CandlestickData, ChartResponse, Indicators};

/// Sort `bars` chronologically and annotate each with its as-of indicators.
///
/// Never fails: an empty series yields an empty `data` vector.
pub fn evaluate(symbol: impl Into<String>, mut bars: Vec<Bar>) -> ChartResponse {
    bars.sort_by_key(|b| b.timestamp);

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let data = bars
        .into_iter()
        .enumerate()
        .map(|(i, bar)| CandlestickData {
            bar,
            indicators: indicators_as_of(&closes[..=i]),
        })
        .collect();

    ChartResponse {
        symbol: symbol.into(),
        data,
    }
}

/// Indicator snapshot at the last element of `prefix`.
fn indicators_as_of(prefix: &[f64]) -> Indicators {
    let mut indicators = Indicators::default();

    if prefix.len() >= MA_PERIOD {
        indicators.sma_20 = calculate_sma(prefix, MA_PERIOD);
        indicators.ema_20 = calculate_ema(prefix, MA_PERIOD);
        indicators.bollinger_bands = calculate_bollinger(prefix, MA_PERIOD, BOLLINGER_WIDTH);
    }
    if prefix.len() >= MACD_SLOW {
        indicators.macd = calculate_macd(prefix);
    }
    // RSI itself needs one more close than this gate; the first gated bar
    // still comes back empty.
    if prefix.len() >= RSI_PERIOD {
        indicators.rsi = calculate_rsi(prefix, RSI_PERIOD);
    }

    indicators
}
