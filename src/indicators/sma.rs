// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of the trailing `period` values:
//   SMA = (x_{n-period} + ... + x_{n-1}) / period
//
// Only the trailing window contributes; anything before it is ignored.

/// Mean of the last `period` elements of `values`.
///
/// Returns `None` when `period == 0` or fewer than `period` values are given.
pub fn calculate_sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }

    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}
