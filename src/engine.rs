// =============================================================================
// Sentiment Engine — the single entry point of the analysis core
// =============================================================================
//
// candles ─► indicators ─► signals ──┐
//    │                                ├─► aggregator ─► SentimentResult
//    └──────► patterns ───────────────┘
//
// Pure and synchronous: no I/O, no shared state, inputs are never mutated.
// The only rejected inputs are non-finite numbers.  Windows shorter than
// MIN_CANDLES short-circuit to a NEUTRAL verdict.
// =============================================================================

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::EvaluationError;
use crate::indicators::compute_indicators;
use crate::market_data::{self, Candle};
use crate::patterns::detect_patterns;
use crate::signals::{aggregate, generate_signals, insufficient_data};
use crate::types::SentimentResult;

/// Minimum window length for a full analysis.
pub const MIN_CANDLES: usize = 50;

/// Evaluate `candles` (oldest first) and stamp the result with the current time.
pub fn evaluate(
    symbol: &str,
    candles: &[Candle],
    funding_rate: Option<f64>,
    open_interest: Option<f64>,
) -> Result<SentimentResult, EvaluationError> {
    evaluate_at(symbol, candles, funding_rate, open_interest, Utc::now())
}

/// Deterministic form of [`evaluate`]: identical inputs give identical output.
pub fn evaluate_at(
    symbol: &str,
    candles: &[Candle],
    funding_rate: Option<f64>,
    open_interest: Option<f64>,
    timestamp: DateTime<Utc>,
) -> Result<SentimentResult, EvaluationError> {
    validate(candles, funding_rate, open_interest)?;

    if candles.len() < MIN_CANDLES {
        debug!(symbol, candles = candles.len(), "insufficient data for sentiment");
        return Ok(insufficient_data(symbol, timestamp));
    }

    let indicators = compute_indicators(symbol, candles, funding_rate, open_interest);
    let signals = generate_signals(&indicators);
    let patterns = detect_patterns(
        &market_data::closes(candles),
        &market_data::highs(candles),
        &market_data::lows(candles),
    );

    Ok(aggregate(&indicators, signals, patterns, timestamp))
}

/// Reject non-finite candle fields and external scalars.
fn validate(
    candles: &[Candle],
    funding_rate: Option<f64>,
    open_interest: Option<f64>,
) -> Result<(), EvaluationError> {
    for (index, candle) in candles.iter().enumerate() {
        if let Some((field, value)) = candle.first_non_finite() {
            return Err(EvaluationError::NonFiniteCandle { index, field, value });
        }
    }

    for (name, scalar) in [("funding_rate", funding_rate), ("open_interest", open_interest)] {
        if let Some(value) = scalar.filter(|v| !v.is_finite()) {
            return Err(EvaluationError::NonFiniteScalar { name, value });
        }
    }

    Ok(())
}
