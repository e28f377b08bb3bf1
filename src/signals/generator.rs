// =============================================================================
// Signal Generator — threshold mapping from indicators to BUY / NEUTRAL / SELL
// =============================================================================
//
// Fixed evaluation order, one entry per rule:
//
//   RSI(14)          < 30 BUY                    > 70 SELL
//   MACD             hist > 0 && macd > signal   hist < 0 SELL
//   MA Alignment     price > SMA20 > SMA50       price < SMA20 < SMA50
//   Bollinger Bands  price <= lower              price >= upper
//   Volume           only when ratio > 2: price > SMA20 BUY, else SELL
//   Funding Rate     only outside [-0.01, 0.05]: < -0.01 BUY, > 0.05 SELL
//
// Volume and Funding are conditional and may be absent entirely.

use crate::indicators::Indicators;
use crate::types::{Action, Signal};

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const VOLUME_SPIKE_RATIO: f64 = 2.0;
pub const FUNDING_LOW: f64 = -0.01;
pub const FUNDING_HIGH: f64 = 0.05;

/// Map every indicator to its signal, in fixed order.
pub fn generate_signals(ind: &Indicators) -> Vec<Signal> {
    let mut signals = vec![
        rsi_signal(ind),
        macd_signal(ind),
        ma_alignment_signal(ind),
        bollinger_signal(ind),
    ];
    signals.extend(volume_signal(ind));
    signals.extend(funding_signal(ind));
    signals
}

pub fn rsi_signal(ind: &Indicators) -> Signal {
    let rsi = ind.rsi;
    let (action, description) = if rsi < RSI_OVERSOLD {
        (Action::Buy, format!("RSI at {rsi:.1} is oversold"))
    } else if rsi > RSI_OVERBOUGHT {
        (Action::Sell, format!("RSI at {rsi:.1} is overbought"))
    } else {
        (Action::Neutral, format!("RSI at {rsi:.1} is in the neutral zone"))
    };
    Signal::new("RSI", action, rsi, description)
}

pub fn macd_signal(ind: &Indicators) -> Signal {
    let m = &ind.macd;
    let (action, description) = if m.histogram > 0.0 && m.macd > m.signal {
        (Action::Buy, "MACD is above its signal line with a positive histogram")
    } else if m.histogram < 0.0 {
        (Action::Sell, "MACD histogram is negative")
    } else {
        (Action::Neutral, "MACD shows no clear momentum")
    };
    Signal::new("MACD", action, m.histogram, description)
}

pub fn ma_alignment_signal(ind: &Indicators) -> Signal {
    let (price, sma20, sma50) = (ind.price, ind.sma20, ind.sma50);
    let (action, description) = if price > sma20 && sma20 > sma50 {
        (Action::Buy, "Price > SMA20 > SMA50: bullish moving average alignment")
    } else if price < sma20 && sma20 < sma50 {
        (Action::Sell, "Price < SMA20 < SMA50: bearish moving average alignment")
    } else {
        (Action::Neutral, "Moving averages are not aligned")
    };
    Signal::new("MA Alignment", action, sma20, description)
}

/// Both band boundaries are inclusive.
pub fn bollinger_signal(ind: &Indicators) -> Signal {
    let bb = &ind.bollinger;
    let price = ind.price;
    let (action, description) = if price <= bb.lower {
        (Action::Buy, format!("Price at or below the lower band ({:.4})", bb.lower))
    } else if price >= bb.upper {
        (Action::Sell, format!("Price at or above the upper band ({:.4})", bb.upper))
    } else {
        (Action::Neutral, "Price is inside the bands".to_string())
    };
    Signal::new("Bollinger Bands", action, price, description)
}

/// Only emitted on a volume spike (ratio > 2).
pub fn volume_signal(ind: &Indicators) -> Option<Signal> {
    let ratio = ind.volume_ratio;
    if ratio <= VOLUME_SPIKE_RATIO {
        return None;
    }

    let (action, description) = if ind.price > ind.sma20 {
        (Action::Buy, format!("Volume spike ({ratio:.1}x average) with price above SMA20"))
    } else {
        (Action::Sell, format!("Volume spike ({ratio:.1}x average) with price at or below SMA20"))
    };
    Some(Signal::new("Volume", action, ratio, description))
}

/// Only emitted when funding leaves the [-0.01, 0.05] band (bounds excluded).
pub fn funding_signal(ind: &Indicators) -> Option<Signal> {
    let rate = ind.funding_rate;
    if rate < FUNDING_LOW {
        Some(Signal::new(
            "Funding Rate",
            Action::Buy,
            rate,
            format!("Negative funding ({rate:.4}): shorts are paying longs"),
        ))
    } else if rate > FUNDING_HIGH {
        Some(Signal::new(
            "Funding Rate",
            Action::Sell,
            rate,
            format!("Elevated funding ({rate:.4}): longs are overleveraged"),
        ))
    } else {
        None
    }
}
