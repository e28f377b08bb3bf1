// =============================================================================
// Aurora Sentiment — technical-analysis market sentiment engine
// =============================================================================
//
// Turns a window of OHLCV candles (plus optional funding rate and open
// interest) into a scored, classified sentiment verdict.  The analysis core
// (`indicators`, `patterns`, `signals`, `engine`) is pure and synchronous; the
// exchange clients, cache and service loop sit around it.
// =============================================================================

pub mod binance;
pub mod cache;
pub mod engine;
pub mod error;
pub mod futures_intel;
pub mod indicators;
pub mod market_data;
pub mod patterns;
pub mod runtime_config;
pub mod service;
pub mod signals;
pub mod types;

pub use engine::{evaluate, evaluate_at, MIN_CANDLES};
pub use error::EvaluationError;
pub use market_data::Candle;
pub use service::{BinanceSource, MarketDataSource, SentimentService};
pub use types::{Action, Bias, Overall, Pattern, SentimentResult, Signal};
