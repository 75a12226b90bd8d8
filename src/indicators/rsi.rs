// =============================================================================
// Relative Strength Index (RSI)
// =============================================================================
//
// Step 1 — Split close-to-close deltas into gains (positive deltas, else 0)
//          and losses (magnitude of negative deltas, else 0).
// Step 2 — avg_gain / avg_loss = SMA of the trailing `period` gains / losses.
//          No Wilder smoothing: each call averages the last window directly.
// Step 3 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// avg_loss == 0 saturates at exactly 100, including a perfectly flat window.
// =============================================================================

use super::sma::calculate_sma;

/// RSI at the end of `closes` over `period` deltas.
///
/// # Edge cases
/// - `period == 0` => `None`
/// - `closes.len() < period + 1` => `None` (need `period` deltas)
/// - average loss of zero => `Some(100.0)`
pub fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            }
        })
        .unzip();

    let avg_gain = calculate_sma(&gains, period)?;
    let avg_loss = calculate_sma(&losses, period)?;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_input() {
        assert!(calculate_rsi(&[], 14).is_none());
    }

    #[test]
    fn rsi_period_zero() {
        assert!(calculate_rsi(&[1.0, 2.0, 3.0], 0).is_none());
    }

    #[test]
    fn rsi_insufficient_data() {
        // Need period+1 closes (period deltas). 14 closes => 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert!(calculate_rsi(&closes, 14).is_none());
    }

    #[test]
    fn rsi_all_gains() {
        let closes: Vec<f64> = (1..=15).map(|x| x as f64).collect();
        assert_eq!(calculate_rsi(&closes, 14), Some(100.0));
    }

    #[test]
    fn rsi_all_losses() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let v = calculate_rsi(&closes, 14).unwrap();
        assert!(v.abs() < 1e-10, "expected 0.0, got {v}");
    }

    #[test]
    fn rsi_flat_market_saturates() {
        // No losses at all (and no gains) still takes the avg_loss == 0 branch.
        let closes = vec![100.0; 30];
        assert_eq!(calculate_rsi(&closes, 14), Some(100.0));
    }

    #[test]
    fn rsi_known_value() {
        // Deltas alternate +2 / -1 over a 4-delta window: gains 4/4, losses 2/4.
        let closes = vec![10.0, 12.0, 11.0, 13.0, 12.0];
        let v = calculate_rsi(&closes, 4).unwrap();
        // RS = 1.0 / 0.5 = 2 => RSI = 100 - 100/3
        assert!((v - (100.0 - 100.0 / 3.0)).abs() < 1e-10);
    }

    #[test]
    fn rsi_uses_trailing_window_only() {
        // A large early loss outside the window must not affect the result.
        let mut closes = vec![50.0, 10.0];
        closes.extend((11..=25).map(|x| x as f64));
        assert_eq!(calculate_rsi(&closes, 14), Some(100.0));
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        for end in 15..=closes.len() {
            let v = calculate_rsi(&closes[..end], 14).unwrap();
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }
}
