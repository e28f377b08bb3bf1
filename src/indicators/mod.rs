// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the technical indicators used by
// the sentiment engine.  None of them fail: a series that is too short for a
// period degrades to a documented fallback value (latest value, 50 for RSI,
// 0 for ATR).

pub mod atr;
pub mod bollinger;
pub mod ma;
pub mod macd;
pub mod rsi;
pub mod volume;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::market_data::{self, Candle};

pub use bollinger::BollingerResult;
pub use macd::MacdResult;

pub const SMA_SHORT: usize = 20;
pub const SMA_MEDIUM: usize = 50;
pub const SMA_LONG: usize = 200;

/// Snapshot of every indicator for the latest bar of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    pub symbol: String,
    /// Latest close.
    pub price: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub ema12: f64,
    pub ema26: f64,
    pub rsi: f64,
    pub macd: MacdResult,
    pub atr: f64,
    pub bollinger: BollingerResult,
    pub volume_sma: f64,
    /// Latest volume / `volume_sma`.
    pub volume_ratio: f64,
    /// Supplied externally; 0.0 when absent.
    pub funding_rate: f64,
    /// Supplied externally; 0.0 when absent.
    pub open_interest: f64,
}

/// Compute the full indicator snapshot for `candles` (oldest first).
pub fn compute_indicators(
    symbol: &str,
    candles: &[Candle],
    funding_rate: Option<f64>,
    open_interest: Option<f64>,
) -> Indicators {
    let closes = market_data::closes(candles);
    let volumes = market_data::volumes(candles);

    let (volume_sma, volume_ratio) = volume::calculate_volume_ratio(&volumes);

    let indicators = Indicators {
        symbol: symbol.to_string(),
        price: ma::latest_or_zero(&closes),
        sma20: ma::sma(&closes, SMA_SHORT),
        sma50: ma::sma(&closes, SMA_MEDIUM),
        sma200: ma::sma(&closes, SMA_LONG),
        ema12: ma::ema(&closes, macd::MACD_FAST),
        ema26: ma::ema(&closes, macd::MACD_SLOW),
        rsi: rsi::calculate_rsi(&closes, rsi::RSI_PERIOD),
        macd: macd::calculate_macd(&closes),
        atr: atr::calculate(candles),
        bollinger: bollinger::calculate_bollinger(
            &closes,
            bollinger::BOLLINGER_PERIOD,
            bollinger::BOLLINGER_STD_DEV,
        ),
        volume_sma,
        volume_ratio,
        funding_rate: funding_rate.unwrap_or(0.0),
        open_interest: open_interest.unwrap_or(0.0),
    };

    debug!(
        symbol,
        candles = candles.len(),
        price = indicators.price,
        rsi = indicators.rsi,
        histogram = indicators.macd.histogram,
        "indicators computed"
    );

    indicators
}
