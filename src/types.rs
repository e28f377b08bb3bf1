// =============================================================================
// Shared types produced by the Aurora sentiment engine
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discrete directional call made by a single indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Buy,
    #[default]
    Neutral,
    Sell,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// One indicator's verdict with a human-readable rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub indicator: String,
    pub signal: Action,
    pub value: f64,
    pub description: String,
}

impl Signal {
    pub fn new(
        indicator: impl Into<String>,
        signal: Action,
        value: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            indicator: indicator.into(),
            signal,
            value,
            description: description.into(),
        }
    }
}

/// Directional lean of a chart pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Bias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// A detected chart pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    #[serde(rename = "type")]
    pub bias: Bias,
    /// 0..=100
    pub confidence: f64,
    pub description: String,
}

impl Pattern {
    pub fn new(
        name: impl Into<String>,
        bias: Bias,
        confidence: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            bias,
            confidence,
            description: description.into(),
        }
    }
}

/// Five-level market verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Overall {
    StrongBuy,
    Buy,
    #[default]
    Neutral,
    Sell,
    StrongSell,
}

impl std::fmt::Display for Overall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongBuy => write!(f, "STRONG_BUY"),
            Self::Buy => write!(f, "BUY"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Sell => write!(f, "SELL"),
            Self::StrongSell => write!(f, "STRONG_SELL"),
        }
    }
}

/// Final output of one evaluation.  Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub symbol: String,
    pub overall: Overall,
    /// -100..=100
    pub score: f64,
    pub signals: Vec<Signal>,
    pub patterns: Vec<Pattern>,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names() {
        assert_eq!(serde_json::to_string(&Action::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&Overall::StrongSell).unwrap(), "\"STRONG_SELL\"");
        assert_eq!(serde_json::to_string(&Bias::Bearish).unwrap(), "\"bearish\"");
    }

    #[test]
    fn pattern_serialises_bias_as_type() {
        let p = Pattern::new("Support Test", Bias::Bullish, 60.0, "near support");
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["type"], "bullish");
        assert_eq!(v["name"], "Support Test");
        assert!(v.get("bias").is_none());
    }

    #[test]
    fn defaults_are_neutral() {
        assert_eq!(Action::default(), Action::Neutral);
        assert_eq!(Overall::default(), Overall::Neutral);
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(Overall::StrongBuy.to_string(), "STRONG_BUY");
        assert_eq!(Action::Neutral.to_string(), "NEUTRAL");
        assert_eq!(Bias::Neutral.to_string(), "neutral");
    }
}
