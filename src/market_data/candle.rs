use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single OHLCV candle.  Series are always ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket open time in UNIX milliseconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Name and value of the first non-finite field, if any.
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Column extraction
// ---------------------------------------------------------------------------

/// Close prices, oldest first.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

pub fn highs(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.high).collect()
}

pub fn lows(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.low).collect()
}

pub fn volumes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.volume).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_preserve_order() {
        let candles = vec![
            Candle::new(0, 1.0, 2.0, 0.5, 1.5, 10.0),
            Candle::new(60_000, 1.5, 3.0, 1.0, 2.5, 20.0),
        ];
        assert_eq!(closes(&candles), vec![1.5, 2.5]);
        assert_eq!(highs(&candles), vec![2.0, 3.0]);
        assert_eq!(lows(&candles), vec![0.5, 1.0]);
        assert_eq!(volumes(&candles), vec![10.0, 20.0]);
    }

    #[test]
    fn finds_non_finite_field() {
        let ok = Candle::new(0, 1.0, 2.0, 0.5, 1.5, 10.0);
        assert!(ok.first_non_finite().is_none());

        let bad = Candle::new(0, 1.0, f64::INFINITY, 0.5, f64::NAN, 10.0);
        let (field, _) = bad.first_non_finite().unwrap();
        assert_eq!(field, "high");
    }

    #[test]
    fn deserialises_from_json() {
        let json = r#"{"time":1,"open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":3.0}"#;
        let c: Candle = serde_json::from_str(json).unwrap();
        assert_eq!(c.time, 1);
        assert!((c.close - 1.5).abs() < 1e-10);
    }
}
