// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices than the SMA does.
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The recurrence is seeded with the *first* element of the slice (not an SMA
// of the first `period` closes) and run to the end of the slice on every call.
// =============================================================================

/// Final EMA value of `closes` for the given `period`.
///
/// # Edge cases
/// - `period == 0` => `None`
/// - `closes.len() < period` => `None`
pub fn calculate_ema(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let multiplier = 2.0 / (period + 1) as f64;
    let (&seed, rest) = closes.split_first()?;

    Some(
        rest.iter()
            .fold(seed, |prev, &close| close * multiplier + prev * (1.0 - multiplier)),
    )
}
