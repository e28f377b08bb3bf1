// =============================================================================
// Signals Module
// =============================================================================
//
// Signal processing pipeline for the sentiment engine:
// - Threshold mapping of each indicator to BUY / NEUTRAL / SELL
// - Aggregation of signals and chart patterns into a bounded score and verdict

pub mod generator;
pub mod sentiment;

pub use generator::generate_signals;
pub use sentiment::{aggregate, classify, insufficient_data, score, ScoreBreakdown};
