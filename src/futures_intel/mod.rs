// =============================================================================
// Futures Intelligence Module
// =============================================================================
//
// External scalars for the sentiment engine, read from the Binance Futures
// API:
//
//   1. Funding Rate   — fed to the funding signal (contrarian at extremes)
//   2. Open Interest  — carried on the indicator snapshot
//
// Both fetchers are stateless; a failure here never blocks an evaluation, the
// caller simply treats the scalar as absent.

pub mod funding_rate;
pub mod open_interest;

pub use funding_rate::{FundingRateMonitor, FundingState};
pub use open_interest::OpenInterestTracker;

pub const FUTURES_BASE_URL: &str = "https://fapi.binance.com";

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .expect("failed to build reqwest client for futures intel")
}
