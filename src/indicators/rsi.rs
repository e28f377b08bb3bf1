// =============================================================================
// Relative Strength Index (RSI) — simple-average variant
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Take the last `period` price deltas from consecutive closes.
// Step 2 — Sum positive deltas as gains and negated negative deltas as losses.
// Step 3 — avg_gain = gains / period,  avg_loss = losses / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// No Wilder smoothing is applied; only the trailing window counts.
//
// Thresholds:  RSI > 70 => OVERBOUGHT,  RSI < 30 => OVERSOLD.
// =============================================================================

/// Default look-back.
pub const RSI_PERIOD: usize = 14;

/// Neutral reading returned when there is not enough history.
pub const RSI_NEUTRAL: f64 = 50.0;

/// Compute the RSI of the trailing `period` deltas of `closes`.
///
/// # Edge cases
/// - `closes.len() < period + 1` => 50.0 (neutral)
/// - `period == 0` => 50.0
/// - Average loss is zero with at least one gain => 100.0
/// - No movement at all => 50.0
pub fn calculate_rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return RSI_NEUTRAL;
    }

    let window = &closes[closes.len() - (period + 1)..];
    let (gains, losses) = window.windows(2).fold((0.0_f64, 0.0_f64), |(g, l), w| {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            (g + delta, l)
        } else {
            (g, l - delta)
        }
    });

    let period_f = period as f64;
    rsi_from_averages(gains / period_f, losses / period_f)
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        RSI_NEUTRAL
    } else if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_input_is_neutral() {
        assert_eq!(calculate_rsi(&[], 14), 50.0);
    }

    #[test]
    fn rsi_insufficient_data_is_neutral() {
        // 14 closes => 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert_eq!(calculate_rsi(&closes, 14), 50.0);
    }

    #[test]
    fn rsi_strictly_increasing_fifteen_points_is_100() {
        let closes: Vec<f64> = (1..=15).map(|x| x as f64).collect();
        assert_eq!(calculate_rsi(&closes, 14), 100.0);
    }

    #[test]
    fn rsi_non_negative_deltas_with_a_gain_is_100() {
        let mut closes = vec![10.0; 15];
        closes[14] = 10.5;
        assert_eq!(calculate_rsi(&closes, 14), 100.0);
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        assert!(calculate_rsi(&closes, 14).abs() < 1e-10);
    }

    #[test]
    fn rsi_flat_market_is_neutral() {
        assert_eq!(calculate_rsi(&[100.0; 30], 14), 50.0);
    }

    #[test]
    fn rsi_uses_only_trailing_window() {
        // A crash long before the window must not matter.
        let mut closes = vec![500.0, 1.0];
        closes.extend((1..=15).map(|x| x as f64 + 1.0));
        assert_eq!(calculate_rsi(&closes, 14), 100.0);
    }

    #[test]
    fn rsi_known_value() {
        // 14 deltas: seven +2, seven -1 => avg_gain = 1.0, avg_loss = 0.5.
        let mut closes = vec![100.0];
        for i in 0..14 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
        }
        let expected = 100.0 - 100.0 / (1.0 + 2.0);
        assert!((calculate_rsi(&closes, 14) - expected).abs() < 1e-10);
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        for end in 1..=closes.len() {
            let v = calculate_rsi(&closes[..end], 14);
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }
}
