// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ).  σ is the population standard deviation of
// the same trailing window.
//
// On a short series the window shrinks to whatever is available and the
// middle band follows the SMA fallback (the latest close).

use serde::{Deserialize, Serialize};

use super::ma::sma;

pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;

/// Result of a Bollinger Band calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BollingerResult {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// - `middle` = SMA(`period`)
/// - `upper`  = middle + `num_std` * σ
/// - `lower`  = middle - `num_std` * σ
///
/// An empty series yields all-zero bands.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerResult {
    if closes.is_empty() {
        return BollingerResult::default();
    }

    let middle = sma(closes, period);
    let window = &closes[closes.len().saturating_sub(period.max(1))..];
    let variance =
        window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / window.len() as f64;
    let std_dev = variance.sqrt();

    BollingerResult {
        upper: middle + num_std * std_dev,
        middle,
        lower: middle - num_std * std_dev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert!((bb.middle - 10.5).abs() < 1e-10);
        // Population variance of 1..=20 is (20^2 - 1) / 12.
        let sd = ((400.0 - 1.0) / 12.0_f64).sqrt();
        assert!((bb.upper - (10.5 + 2.0 * sd)).abs() < 1e-10);
        assert!((bb.lower - (10.5 - 2.0 * sd)).abs() < 1e-10);
    }

    #[test]
    fn bollinger_uses_trailing_window() {
        let mut closes = vec![1000.0; 10];
        closes.extend(vec![50.0; 20]);
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert!((bb.middle - 50.0).abs() < 1e-10);
        assert!((bb.upper - bb.lower).abs() < 1e-10);
    }

    #[test]
    fn bollinger_flat() {
        let bb = calculate_bollinger(&[100.0; 20], 20, 2.0);
        assert_eq!(bb.upper, 100.0);
        assert_eq!(bb.lower, 100.0);
    }

    #[test]
    fn bollinger_short_series_still_ordered() {
        let bb = calculate_bollinger(&[1.0, 5.0, 3.0], 20, 2.0);
        assert!((bb.middle - 3.0).abs() < 1e-10);
        assert!(bb.upper >= bb.middle && bb.middle >= bb.lower);
    }

    #[test]
    fn bollinger_empty() {
        assert_eq!(calculate_bollinger(&[], 20, 2.0), BollingerResult::default());
    }

    #[test]
    fn bands_always_ordered() {
        for n in 1..60 {
            let closes: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 1.3).sin() * 7.0).collect();
            let bb = calculate_bollinger(&closes, 20, 2.0);
            assert!(bb.upper >= bb.middle, "n={n}");
            assert!(bb.middle >= bb.lower, "n={n}");
        }
    }
}
