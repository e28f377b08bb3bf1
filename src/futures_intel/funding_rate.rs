// =============================================================================
// Funding Rate Monitor — Contrarian input from perpetual futures funding
// =============================================================================
//
// Funding rates are periodic payments between longs and shorts that anchor the
// perpetual contract price to spot.  The sentiment engine consumes the rate in
// percent (`rate_pct`); the bias label here is informational.
//
//   rate_pct > +0.05  =>  BEARISH  (overleveraged longs)
//   rate_pct < -0.01  =>  BULLISH  (shorts paying)
//   otherwise         =>  NEUTRAL

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{http_client, FUTURES_BASE_URL};
use crate::binance::client::parse_str_f64;
use crate::signals::generator::{FUNDING_HIGH, FUNDING_LOW};

/// Snapshot of the latest funding rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingState {
    /// Raw funding rate as a decimal (e.g. 0.0001 = 0.01%).
    pub rate: f64,

    /// Funding rate as a percentage (e.g. 0.01).
    pub rate_pct: f64,

    /// Directional bias label.
    pub bias: String,

    /// Timestamp (ms) of the funding event.
    pub funding_time: i64,
}

impl FundingState {
    /// Interpret a raw decimal rate.
    pub fn from_rate(rate: f64, funding_time: i64) -> Self {
        let rate_pct = rate * 100.0;
        let bias = if rate_pct > FUNDING_HIGH {
            "BEARISH"
        } else if rate_pct < FUNDING_LOW {
            "BULLISH"
        } else {
            "NEUTRAL"
        };

        Self {
            rate,
            rate_pct,
            bias: bias.to_string(),
            funding_time,
        }
    }

    /// Parse the `/fapi/v1/fundingRate` array payload (latest entry last).
    pub fn from_response(body: &serde_json::Value) -> Result<Self> {
        let arr = body
            .as_array()
            .context("funding rate response is not an array")?;
        let entry = arr
            .last()
            .context("funding rate response array is empty")?;

        let rate = parse_str_f64(&entry["fundingRate"]).context("invalid fundingRate")?;
        let funding_time = entry["fundingTime"].as_i64().unwrap_or(0);

        Ok(Self::from_rate(rate, funding_time))
    }
}

/// Fetches the latest funding rate from the Binance Futures API.
pub struct FundingRateMonitor {
    client: reqwest::Client,
    base_url: String,
}

impl FundingRateMonitor {
    pub fn new() -> Self {
        Self::with_client(http_client())
    }

    /// Create a monitor that re-uses an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: FUTURES_BASE_URL.to_string(),
        }
    }

    /// Fetch the latest funding rate for `symbol`.
    #[instrument(skip(self), name = "futures::funding_rate")]
    pub async fn fetch(&self, symbol: &str) -> Result<FundingState> {
        let url = format!(
            "{}/fapi/v1/fundingRate?symbol={}&limit=1",
            self.base_url, symbol
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET funding rate for {symbol}"))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse funding rate response body")?;

        if !status.is_success() {
            anyhow::bail!("funding rate API returned {}: {}", status, body);
        }

        let state = FundingState::from_response(&body)?;

        debug!(
            symbol,
            rate_pct = state.rate_pct,
            bias = %state.bias,
            "funding rate fetched"
        );

        Ok(state)
    }
}

impl Default for FundingRateMonitor {
    fn default() -> Self {
        Self::new()
    }
}
