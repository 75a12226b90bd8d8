// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Middle band = SMA(period), upper/lower = middle ± k·σ where σ is the
// population standard deviation of the trailing `period` closes (variance
// divided by `period`, not `period - 1`).

use super::sma::calculate_sma;
use crate::types::BollingerBand;

/// Calculate Bollinger Bands for the given closing prices.
///
/// Returns `None` when `period == 0` or fewer than `period` closes are given.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> Option<BollingerBand> {
    let middle = calculate_sma(closes, period)?;

    let window = &closes[closes.len() - period..];
    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
    let std_dev = variance.sqrt();

    Some(BollingerBand {
        upper: middle + num_std * std_dev,
        middle,
        lower: middle - num_std * std_dev,
    })
}
