// =============================================================================
// Sentiment Aggregator — signals + patterns into one bounded verdict
// =============================================================================
//
//   base    = clamp(20 * #BUY - 20 * #SELL, -100, 100)
//   delta   = sum(+confidence * 0.2 for bullish, -confidence * 0.2 for bearish)
//   score   = clamp(base + delta, -100, 100)
//
// Classification:
//   score >=  60  STRONG_BUY
//   score >=  20  BUY
//   score <= -60  STRONG_SELL
//   score <= -20  SELL
//   otherwise     NEUTRAL

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indicators::Indicators;
use crate::types::{Action, Bias, Overall, Pattern, SentimentResult, Signal};

pub const SIGNAL_WEIGHT: f64 = 20.0;
pub const PATTERN_WEIGHT: f64 = 0.2;
pub const SCORE_LIMIT: f64 = 100.0;

pub const STRONG_THRESHOLD: f64 = 60.0;
pub const THRESHOLD: f64 = 20.0;

pub const INSUFFICIENT_DATA_SUMMARY: &str = "Insufficient data for analysis";

/// How the final score was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Clamped signal score.
    pub base: f64,
    /// Unclamped pattern contribution.
    pub pattern_delta: f64,
    /// Clamped final score.
    pub total: f64,
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(-SCORE_LIMIT, SCORE_LIMIT)
}

/// Signal contribution, clamped on its own before patterns are added.
pub fn base_score(signals: &[Signal]) -> f64 {
    let raw: f64 = signals
        .iter()
        .map(|s| match s.signal {
            Action::Buy => SIGNAL_WEIGHT,
            Action::Sell => -SIGNAL_WEIGHT,
            Action::Neutral => 0.0,
        })
        .sum();
    clamp_score(raw)
}

/// Pattern contribution (not clamped).
pub fn pattern_delta(patterns: &[Pattern]) -> f64 {
    patterns
        .iter()
        .map(|p| match p.bias {
            Bias::Bullish => p.confidence * PATTERN_WEIGHT,
            Bias::Bearish => -p.confidence * PATTERN_WEIGHT,
            Bias::Neutral => 0.0,
        })
        .sum()
}

/// Score signals and patterns.  The total is always inside [-100, 100].
pub fn score(signals: &[Signal], patterns: &[Pattern]) -> ScoreBreakdown {
    let base = base_score(signals);
    let delta = pattern_delta(patterns);
    ScoreBreakdown {
        base,
        pattern_delta: delta,
        total: clamp_score(base + delta),
    }
}

/// Map a final score onto the five-level verdict.
pub fn classify(score: f64) -> Overall {
    if score >= STRONG_THRESHOLD {
        Overall::StrongBuy
    } else if score >= THRESHOLD {
        Overall::Buy
    } else if score <= -STRONG_THRESHOLD {
        Overall::StrongSell
    } else if score <= -THRESHOLD {
        Overall::Sell
    } else {
        Overall::Neutral
    }
}

/// One-paragraph explanation of the verdict.  Informational only.
pub fn summarize(signals: &[Signal], patterns: &[Pattern], ind: &Indicators) -> String {
    let buys = signals.iter().filter(|s| s.signal == Action::Buy).count();
    let sells = signals.iter().filter(|s| s.signal == Action::Sell).count();
    let bullish = patterns.iter().filter(|p| p.bias == Bias::Bullish).count();
    let bearish = patterns.iter().filter(|p| p.bias == Bias::Bearish).count();

    let deviation = if ind.sma200 != 0.0 {
        (ind.price - ind.sma200) / ind.sma200 * 100.0
    } else {
        0.0
    };
    let side = if deviation >= 0.0 { "above" } else { "below" };

    format!(
        "{buys} buy and {sells} sell signals; {bullish} bullish and {bearish} bearish patterns. \
         RSI at {:.1}. Price is {:.2}% {side} the 200-period SMA.",
        ind.rsi,
        deviation.abs()
    )
}

/// Build the final result from an evaluated window.
pub fn aggregate(
    ind: &Indicators,
    signals: Vec<Signal>,
    patterns: Vec<Pattern>,
    timestamp: DateTime<Utc>,
) -> SentimentResult {
    let breakdown = score(&signals, &patterns);
    let overall = classify(breakdown.total);
    let summary = summarize(&signals, &patterns, ind);

    debug!(
        symbol = %ind.symbol,
        base = breakdown.base,
        pattern_delta = breakdown.pattern_delta,
        score = breakdown.total,
        %overall,
        "sentiment aggregated"
    );

    SentimentResult {
        symbol: ind.symbol.clone(),
        overall,
        score: breakdown.total,
        signals,
        patterns,
        summary,
        timestamp,
    }
}

/// Verdict for a window too short to analyse.
pub fn insufficient_data(symbol: &str, timestamp: DateTime<Utc>) -> SentimentResult {
    SentimentResult {
        symbol: symbol.to_string(),
        overall: Overall::Neutral,
        score: 0.0,
        signals: Vec::new(),
        patterns: Vec::new(),
        summary: INSUFFICIENT_DATA_SUMMARY.to_string(),
        timestamp,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{BollingerResult, MacdResult};

    fn sig(action: Action) -> Signal {
        Signal::new("X", action, 0.0, "")
    }

    fn pat(bias: Bias, confidence: f64) -> Pattern {
        Pattern::new("P", bias, confidence, "")
    }

    fn indicators(price: f64, sma200: f64, rsi: f64) -> Indicators {
        Indicators {
            symbol: "BTCUSDT".to_string(),
            price,
            sma20: price,
            sma50: price,
            sma200,
            ema12: price,
            ema26: price,
            rsi,
            macd: MacdResult::default(),
            atr: 0.0,
            bollinger: BollingerResult::default(),
            volume_sma: 0.0,
            volume_ratio: 0.0,
            funding_rate: 0.0,
            open_interest: 0.0,
        }
    }

    #[test]
    fn base_score_counts_directions() {
        let signals = vec![sig(Action::Buy), sig(Action::Buy), sig(Action::Sell), sig(Action::Neutral)];
        assert_eq!(base_score(&signals), 20.0);
    }

    #[test]
    fn base_score_is_clamped_before_patterns() {
        // 6 BUY => 120 raw, clamped to 100; a bearish pattern then pulls it
        // down from 100, not from 120.
        let signals = vec![sig(Action::Buy); 6];
        let b = score(&signals, &[pat(Bias::Bearish, 50.0)]);
        assert_eq!(b.base, 100.0);
        assert_eq!(b.pattern_delta, -10.0);
        assert_eq!(b.total, 90.0);
    }

    #[test]
    fn total_is_clamped_for_adversarial_input() {
        let signals = vec![sig(Action::Buy); 6];
        let patterns = vec![pat(Bias::Bullish, 100.0); 3];
        let b = score(&signals, &patterns);
        assert_eq!(b.total, 100.0);

        let signals = vec![sig(Action::Sell); 6];
        let patterns = vec![pat(Bias::Bearish, 100.0); 3];
        assert_eq!(score(&signals, &patterns).total, -100.0);
    }

    #[test]
    fn neutral_patterns_do_not_move_score() {
        assert_eq!(pattern_delta(&[pat(Bias::Neutral, 100.0)]), 0.0);
    }

    #[test]
    fn pattern_delta_weights_confidence() {
        let patterns = vec![pat(Bias::Bullish, 85.0), pat(Bias::Bearish, 60.0)];
        assert!((pattern_delta(&patterns) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn classification_bands() {
        assert_eq!(classify(100.0), Overall::StrongBuy);
        assert_eq!(classify(60.0), Overall::StrongBuy);
        assert_eq!(classify(59.9), Overall::Buy);
        assert_eq!(classify(20.0), Overall::Buy);
        assert_eq!(classify(19.9), Overall::Neutral);
        assert_eq!(classify(0.0), Overall::Neutral);
        assert_eq!(classify(-19.9), Overall::Neutral);
        assert_eq!(classify(-20.0), Overall::Sell);
        assert_eq!(classify(-59.9), Overall::Sell);
        assert_eq!(classify(-60.0), Overall::StrongSell);
    }

    #[test]
    fn summary_reports_counts_and_deviation() {
        let signals = vec![sig(Action::Buy), sig(Action::Buy), sig(Action::Sell)];
        let patterns = vec![pat(Bias::Bullish, 70.0)];
        let text = summarize(&signals, &patterns, &indicators(110.0, 100.0, 42.0));
        assert!(text.contains("2 buy and 1 sell signals"), "{text}");
        assert!(text.contains("1 bullish and 0 bearish patterns"), "{text}");
        assert!(text.contains("RSI at 42.0"), "{text}");
        assert!(text.contains("10.00% above"), "{text}");
    }

    #[test]
    fn summary_handles_zero_sma() {
        let text = summarize(&[], &[], &indicators(0.0, 0.0, 50.0));
        assert!(text.contains("0.00% above"), "{text}");
    }

    #[test]
    fn aggregate_builds_result() {
        let ts = DateTime::<Utc>::UNIX_EPOCH;
        let signals = vec![sig(Action::Buy), sig(Action::Buy), sig(Action::Buy)];
        let patterns = vec![pat(Bias::Bullish, 85.0)];
        let result = aggregate(&indicators(10.0, 9.0, 55.0), signals, patterns, ts);
        assert_eq!(result.symbol, "BTCUSDT");
        assert_eq!(result.score, 77.0);
        assert_eq!(result.overall, Overall::StrongBuy);
        assert_eq!(result.signals.len(), 3);
        assert_eq!(result.patterns.len(), 1);
        assert_eq!(result.timestamp, ts);
    }

    #[test]
    fn insufficient_data_shape() {
        let r = insufficient_data("ETHUSDT", DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(r.overall, Overall::Neutral);
        assert_eq!(r.score, 0.0);
        assert!(r.signals.is_empty());
        assert!(r.patterns.is_empty());
        assert_eq!(r.summary, INSUFFICIENT_DATA_SUMMARY);
    }
}
