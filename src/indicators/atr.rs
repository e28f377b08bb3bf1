// =============================================================================
// Average True Range (ATR) — simple-average variant
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each bar after the first:
//   TR = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is the SMA of the TR series over `period` (no Wilder smoothing).
//
// Default period: 14
// =============================================================================

use crate::market_data::Candle;

use super::ma::sma;

pub const ATR_PERIOD: usize = 14;

/// True range of every bar that has a predecessor (length = candles - 1).
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .windows(2)
        .map(|w| {
            let prev_close = w[0].close;
            let bar = &w[1];
            let hl = bar.high - bar.low;
            let hc = (bar.high - prev_close).abs();
            let lc = (bar.low - prev_close).abs();
            hl.max(hc).max(lc)
        })
        .collect()
}

/// Compute the most recent ATR value from a slice of OHLCV candles.
///
/// Returns 0.0 when there are fewer than `period + 1` candles.
pub fn calculate_atr(candles: &[Candle], period: usize) -> f64 {
    if candles.len() < period + 1 {
        return 0.0;
    }
    sma(&true_ranges(candles), period)
}

/// Convenience function: compute ATR with the standard 14-period default.
pub fn calculate(candles: &[Candle]) -> f64 {
    calculate_atr(candles, ATR_PERIOD)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle::new(0, open, high, low, close, 100.0)
    }

    #[test]
    fn atr_insufficient_data() {
        let candles = vec![candle(100.0, 105.0, 95.0, 102.0); 14];
        assert_eq!(calculate_atr(&candles, 14), 0.0);
    }

    #[test]
    fn atr_exact_minimum_data() {
        let candles = vec![
            candle(100.0, 102.0, 98.0, 101.0),
            candle(101.0, 104.0, 99.0, 103.0),
            candle(103.0, 106.0, 100.0, 105.0),
            candle(105.0, 108.0, 102.0, 107.0),
        ];
        // TRs: 5, 6, 6
        assert!((calculate_atr(&candles, 3) - 17.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn atr_constant_range() {
        let candles: Vec<Candle> = (0..30)
            .map(|_| candle(100.0, 105.0, 95.0, 100.0))
            .collect();
        assert!((calculate_atr(&candles, 14) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn atr_true_range_uses_prev_close() {
        let candles = vec![
            candle(100.0, 105.0, 95.0, 95.0),
            candle(110.0, 115.0, 108.0, 112.0), // |115 - 95| = 20
        ];
        assert_eq!(true_ranges(&candles), vec![20.0]);
        assert!((calculate_atr(&candles, 1) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn atr_averages_only_trailing_window() {
        let mut candles = vec![
            candle(100.0, 101.0, 99.0, 100.0),
            candle(100.0, 200.0, 0.0, 100.0),
        ];
        candles.extend((0..5).map(|_| candle(100.0, 101.0, 99.0, 100.0)));
        // TRs: 200, 2, 2, 2, 2, 2 -- the wide bar is outside the last 3.
        assert!((calculate_atr(&candles, 3) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn atr_convenience_function() {
        let candles: Vec<Candle> = (0..30)
            .map(|i| {
                let base = 100.0 + i as f64;
                candle(base, base + 3.0, base - 3.0, base + 1.0)
            })
            .collect();
        assert_eq!(calculate_atr(&candles, 14), calculate(&candles));
    }
}
