// =============================================================================
// Open Interest Tracker
// =============================================================================
//
// Open Interest (OI) is the total number of outstanding derivative contracts.
// The engine carries it on the indicator snapshot; it does not drive a signal.

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use super::{http_client, FUTURES_BASE_URL};
use crate::binance::client::parse_str_f64;

/// Fetches open interest from the Binance Futures API.
pub struct OpenInterestTracker {
    client: reqwest::Client,
    base_url: String,
}

impl OpenInterestTracker {
    pub fn new() -> Self {
        Self::with_client(http_client())
    }

    /// Create a tracker that re-uses an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: FUTURES_BASE_URL.to_string(),
        }
    }

    /// Fetch the current open interest (in contracts) for `symbol`.
    #[instrument(skip(self), name = "futures::open_interest")]
    pub async fn fetch(&self, symbol: &str) -> Result<f64> {
        let url = format!("{}/fapi/v1/openInterest?symbol={}", self.base_url, symbol);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET open interest for {symbol}"))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse open interest response")?;

        if !status.is_success() {
            anyhow::bail!("open interest API returned {}: {}", status, body);
        }

        let current_oi = parse_open_interest(&body)?;
        debug!(symbol, current_oi, "open interest fetched");
        Ok(current_oi)
    }
}

impl Default for OpenInterestTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract `openInterest` from the `/fapi/v1/openInterest` payload.
pub fn parse_open_interest(body: &serde_json::Value) -> Result<f64> {
    parse_str_f64(&body["openInterest"]).context("invalid openInterest field")
}
