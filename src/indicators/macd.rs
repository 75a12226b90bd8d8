// =============================================================================
// Moving Average Convergence / Divergence (MACD)
// =============================================================================
//
//   macd_line = EMA(closes, 12) - EMA(closes, 26)
//   signal    = EMA([macd_line], 9)
//   histogram = macd_line - signal
//
// The signal EMA is taken over a one-element buffer holding only the current
// MACD value, not over a history of MACD values. One sample is always shorter
// than the 9-period look-back, so the signal is 0.0 and the histogram equals
// the MACD line. Output compatibility depends on this; see DESIGN.md.

use super::ema::calculate_ema;
use super::{MACD_FAST, MACD_SIGNAL, MACD_SLOW};
use crate::types::MacdData;

/// MACD (12/26/9) at the end of `closes`.
///
/// Returns `None` when fewer than 26 closes are given.
pub fn calculate_macd(closes: &[f64]) -> Option<MacdData> {
    if closes.len() < MACD_SLOW {
        return None;
    }

    let fast = calculate_ema(closes, MACD_FAST)?;
    let slow = calculate_ema(closes, MACD_SLOW)?;
    let macd = fast - slow;

    let signal = calculate_ema(&[macd], MACD_SIGNAL).unwrap_or(0.0);

    Some(MacdData {
        macd,
        signal,
        histogram: macd - signal,
    })
}
