// =============================================================================
// Chart Pattern Detection
// =============================================================================
//
// Scans aligned close / high / low columns (oldest first) for crossover and
// structural patterns.  Every rule is evaluated independently and several may
// fire on the same bar:
//
//   Golden Cross      SMA50 crosses above SMA200 on the latest bar    85  bullish
//   Death Cross       SMA50 crosses below SMA200 on the latest bar    85  bearish
//   Bullish Trend     price above SMA50 and SMA200                    70  bullish
//   Bearish Trend     price below SMA50 and SMA200                    70  bearish
//   Support Test      price <= 20-bar low  * 1.02                     60  bullish
//   Resistance Test   price >= 20-bar high * 0.98                     60  bearish
//   Uptrend Structure last 5 highs and last 5 lows strictly rising    75  bullish
//
// Missing history never raises: a rule without enough data simply does not
// fire.

use tracing::debug;

use crate::indicators::ma::sma;
use crate::indicators::{SMA_LONG, SMA_MEDIUM};
use crate::types::{Bias, Pattern};

const CROSS_CONFIDENCE: f64 = 85.0;
const TREND_CONFIDENCE: f64 = 70.0;
const SUPPORT_RESISTANCE_CONFIDENCE: f64 = 60.0;
const STRUCTURE_CONFIDENCE: f64 = 75.0;

/// Bars scanned for the recent high / low.
const RANGE_LOOKBACK: usize = 20;
/// Proximity band around the recent low / high.
const SUPPORT_TOLERANCE: f64 = 1.02;
const RESISTANCE_TOLERANCE: f64 = 0.98;
/// Bars compared for higher-highs / higher-lows.
const STRUCTURE_LOOKBACK: usize = 5;

/// Run every detection rule over the given columns.
pub fn detect_patterns(closes: &[f64], highs: &[f64], lows: &[f64]) -> Vec<Pattern> {
    let Some(&price) = closes.last() else {
        return Vec::new();
    };

    let mut patterns = Vec::new();

    if let Some(cross) = moving_average_cross(closes) {
        patterns.push(cross);
    }
    if let Some(trend) = trend_alignment(closes, price) {
        patterns.push(trend);
    }
    patterns.extend(support_resistance(highs, lows, price));
    if let Some(structure) = uptrend_structure(highs, lows) {
        patterns.push(structure);
    }

    debug!(count = patterns.len(), price, "patterns detected");
    patterns
}

/// Golden / death cross of SMA50 against SMA200 between the previous and the
/// latest bar.  Needs at least 200 closes.
fn moving_average_cross(closes: &[f64]) -> Option<Pattern> {
    if closes.len() < SMA_LONG {
        return None;
    }

    let previous = &closes[..closes.len() - 1];
    let prev_fast = sma(previous, SMA_MEDIUM);
    let prev_slow = sma(previous, SMA_LONG);
    let fast = sma(closes, SMA_MEDIUM);
    let slow = sma(closes, SMA_LONG);

    if prev_fast < prev_slow && fast > slow {
        Some(Pattern::new(
            "Golden Cross",
            Bias::Bullish,
            CROSS_CONFIDENCE,
            "50-period SMA crossed above the 200-period SMA",
        ))
    } else if prev_fast > prev_slow && fast < slow {
        Some(Pattern::new(
            "Death Cross",
            Bias::Bearish,
            CROSS_CONFIDENCE,
            "50-period SMA crossed below the 200-period SMA",
        ))
    } else {
        None
    }
}

/// Price position relative to both SMA50 and SMA200.  Mixed => no pattern.
fn trend_alignment(closes: &[f64], price: f64) -> Option<Pattern> {
    let sma50 = sma(closes, SMA_MEDIUM);
    let sma200 = sma(closes, SMA_LONG);

    if price > sma50 && price > sma200 {
        Some(Pattern::new(
            "Bullish Trend",
            Bias::Bullish,
            TREND_CONFIDENCE,
            "Price is trading above the 50 and 200-period SMAs",
        ))
    } else if price < sma50 && price < sma200 {
        Some(Pattern::new(
            "Bearish Trend",
            Bias::Bearish,
            TREND_CONFIDENCE,
            "Price is trading below the 50 and 200-period SMAs",
        ))
    } else {
        None
    }
}

/// Proximity of price to the recent 20-bar low and high.  Both may fire on a
/// tight range.
fn support_resistance(highs: &[f64], lows: &[f64], price: f64) -> Vec<Pattern> {
    let mut found = Vec::new();

    let recent_low = trailing(lows, RANGE_LOOKBACK)
        .iter()
        .copied()
        .reduce(f64::min);
    let recent_high = trailing(highs, RANGE_LOOKBACK)
        .iter()
        .copied()
        .reduce(f64::max);

    if let Some(low) = recent_low {
        if price <= low * SUPPORT_TOLERANCE {
            found.push(Pattern::new(
                "Support Test",
                Bias::Bullish,
                SUPPORT_RESISTANCE_CONFIDENCE,
                format!("Price is testing support near {low:.4}"),
            ));
        }
    }
    if let Some(high) = recent_high {
        if price >= high * RESISTANCE_TOLERANCE {
            found.push(Pattern::new(
                "Resistance Test",
                Bias::Bearish,
                SUPPORT_RESISTANCE_CONFIDENCE,
                format!("Price is testing resistance near {high:.4}"),
            ));
        }
    }

    found
}

/// Strictly higher highs and higher lows over the last 5 bars.
///
/// There is intentionally no mirrored lower-lows rule.
fn uptrend_structure(highs: &[f64], lows: &[f64]) -> Option<Pattern> {
    if highs.len() < STRUCTURE_LOOKBACK || lows.len() < STRUCTURE_LOOKBACK {
        return None;
    }

    let rising = |series: &[f64]| series.windows(2).all(|w| w[1] > w[0]);
    let higher_highs = rising(trailing(highs, STRUCTURE_LOOKBACK));
    let higher_lows = rising(trailing(lows, STRUCTURE_LOOKBACK));

    if higher_highs && higher_lows {
        Some(Pattern::new(
            "Higher Highs & Higher Lows",
            Bias::Bullish,
            STRUCTURE_CONFIDENCE,
            "Uptrend structure: each of the last 5 bars made a higher high and a higher low",
        ))
    } else {
        None
    }
}

/// The last `n` elements (or all of them when shorter).
fn trailing(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn names(patterns: &[Pattern]) -> Vec<&str> {
        patterns.iter().map(|p| p.name.as_str()).collect()
    }

    /// Highs/lows hugging the closes by +/- `spread`.
    fn envelope(closes: &[f64], spread: f64) -> (Vec<f64>, Vec<f64>) {
        (
            closes.iter().map(|c| c + spread).collect(),
            closes.iter().map(|c| c - spread).collect(),
        )
    }

    #[test]
    fn empty_input_has_no_patterns() {
        assert!(detect_patterns(&[], &[], &[]).is_empty());
    }

    #[test]
    fn golden_cross_on_two_hundred_rising_closes() {
        let closes: Vec<f64> = (1..=200).map(|x| x as f64).collect();
        let (highs, lows) = envelope(&closes, 0.5);

        let patterns = detect_patterns(&closes, &highs, &lows);
        let golden: Vec<&Pattern> = patterns.iter().filter(|p| p.name == "Golden Cross").collect();
        assert_eq!(golden.len(), 1);
        assert_eq!(golden[0].confidence, 85.0);
        assert_eq!(golden[0].bias, Bias::Bullish);
        assert!(!names(&patterns).contains(&"Death Cross"));
    }

    #[test]
    fn no_cross_once_established() {
        // SMA50 above SMA200 on both bars => no new cross.
        let closes: Vec<f64> = (1..=260).map(|x| x as f64).collect();
        assert!(moving_average_cross(&closes).is_none());
    }

    #[test]
    fn cross_needs_two_hundred_points() {
        let closes: Vec<f64> = (1..=199).map(|x| x as f64).collect();
        assert!(moving_average_cross(&closes).is_none());
    }

    #[test]
    fn death_cross_on_two_hundred_falling_closes() {
        let closes: Vec<f64> = (1..=200).rev().map(|x| x as f64).collect();
        let cross = moving_average_cross(&closes).unwrap();
        assert_eq!(cross.name, "Death Cross");
        assert_eq!(cross.bias, Bias::Bearish);
        assert_eq!(cross.confidence, 85.0);
    }

    #[test]
    fn trend_alignment_both_directions() {
        let up: Vec<f64> = (1..=250).map(|x| x as f64).collect();
        let p = trend_alignment(&up, 250.0).unwrap();
        assert_eq!(p.name, "Bullish Trend");
        assert_eq!(p.confidence, 70.0);

        let down: Vec<f64> = (1..=250).rev().map(|x| x as f64).collect();
        let p = trend_alignment(&down, 1.0).unwrap();
        assert_eq!(p.name, "Bearish Trend");
        assert_eq!(p.bias, Bias::Bearish);
    }

    #[test]
    fn trend_alignment_mixed_is_silent() {
        // Long decline then a sharp rebound: price above SMA50 but below SMA200.
        let mut closes: Vec<f64> = (0..200).map(|i| 500.0 - i as f64).collect();
        closes.extend((0..50).map(|i| 100.0 + i as f64 * 2.0));
        let price = *closes.last().unwrap();
        assert!(price > sma(&closes, 50));
        assert!(price < sma(&closes, 200));
        assert!(trend_alignment(&closes, price).is_none());
    }

    #[test]
    fn support_and_resistance_can_both_fire() {
        let highs = vec![100.5; 20];
        let lows = vec![99.5; 20];
        let found = support_resistance(&highs, &lows, 100.0);
        assert_eq!(names(&found), vec!["Support Test", "Resistance Test"]);
        assert!(found.iter().all(|p| p.confidence == 60.0));
    }

    #[test]
    fn support_boundary_is_inclusive() {
        let lows = vec![100.0; 20];
        let highs = vec![200.0; 20];
        let at_band = support_resistance(&highs, &lows, 102.0);
        assert_eq!(names(&at_band), vec!["Support Test"]);
        let above_band = support_resistance(&highs, &lows, 102.5);
        assert!(above_band.is_empty());
    }

    #[test]
    fn support_uses_last_twenty_bars_only() {
        let mut lows = vec![10.0];
        lows.extend(vec![100.0; 20]);
        let highs = vec![200.0; 21];
        // The old 10.0 low is out of range, so 101 is near 100 support.
        assert_eq!(names(&support_resistance(&highs, &lows, 101.0)), vec!["Support Test"]);
    }

    #[test]
    fn uptrend_structure_requires_both_sides() {
        let highs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let lows = vec![0.5, 1.5, 2.5, 3.5, 4.5];
        let p = uptrend_structure(&highs, &lows).unwrap();
        assert_eq!(p.confidence, 75.0);
        assert_eq!(p.bias, Bias::Bullish);

        let flat_low = vec![0.5, 1.5, 1.5, 3.5, 4.5];
        assert!(uptrend_structure(&highs, &flat_low).is_none());
    }

    #[test]
    fn uptrend_structure_needs_five_bars() {
        assert!(uptrend_structure(&[1.0, 2.0, 3.0, 4.0], &[0.0, 1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn falling_structure_has_no_pattern() {
        let highs = vec![5.0, 4.0, 3.0, 2.0, 1.0];
        let lows = vec![4.5, 3.5, 2.5, 1.5, 0.5];
        assert!(uptrend_structure(&highs, &lows).is_none());
    }
}
