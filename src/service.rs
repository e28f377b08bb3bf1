// =============================================================================
// Sentiment Service — fetch, memoise, evaluate
// =============================================================================
//
// Glue between the external market-data collaborator and the pure engine:
//
//   cache hit  => cached SentimentResult
//   cache miss => candles (+ funding / OI) -> evaluate -> insert with TTL
//
// A failed candle fetch is returned as an error and never reaches the engine.
// Funding rate and open interest are optional: a failed fetch is logged and
// the scalar is treated as absent.
// =============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::binance::{BinanceClient, RateLimitTracker};
use crate::cache::TtlCache;
use crate::engine::evaluate;
use crate::futures_intel::{FundingRateMonitor, OpenInterestTracker};
use crate::market_data::Candle;
use crate::runtime_config::RuntimeConfig;
use crate::types::SentimentResult;

/// Where candles and futures scalars come from.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// The most recent `limit` candles for `symbol`, oldest first.
    async fn candles(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Candle>>;

    /// Latest funding rate in percent (0.01 = 0.01%).
    async fn funding_rate(&self, symbol: &str) -> Result<f64>;

    /// Current open interest in contracts.
    async fn open_interest(&self, symbol: &str) -> Result<f64>;
}

// =============================================================================
// Binance-backed source
// =============================================================================

/// Spot klines plus futures funding / open interest from Binance.
#[derive(Default)]
pub struct BinanceSource {
    client: BinanceClient,
    funding: FundingRateMonitor,
    open_interest: OpenInterestTracker,
}

impl BinanceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight tracker of the spot klines client.
    pub fn rate_limit(&self) -> &RateLimitTracker {
        self.client.rate_limit()
    }
}

#[async_trait]
impl MarketDataSource for BinanceSource {
    async fn candles(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Candle>> {
        self.client.get_klines(symbol, interval, limit).await
    }

    async fn funding_rate(&self, symbol: &str) -> Result<f64> {
        Ok(self.funding.fetch(symbol).await?.rate_pct)
    }

    async fn open_interest(&self, symbol: &str) -> Result<f64> {
        self.open_interest.fetch(symbol).await
    }
}

// =============================================================================
// SentimentService
// =============================================================================

/// Cached sentiment evaluation over a [`MarketDataSource`].
pub struct SentimentService<S> {
    source: S,
    cache: TtlCache<String, SentimentResult>,
    config: RuntimeConfig,
}

impl<S: MarketDataSource> SentimentService<S> {
    pub fn new(source: S, config: RuntimeConfig) -> Self {
        Self {
            source,
            cache: TtlCache::new(config.cache_capacity),
            config,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn cache(&self) -> &TtlCache<String, SentimentResult> {
        &self.cache
    }

    fn cache_key(&self, symbol: &str) -> String {
        format!("{symbol}@{}", self.config.interval)
    }

    /// Sentiment for `symbol`, served from cache while fresh.
    pub async fn sentiment(&self, symbol: &str) -> Result<SentimentResult> {
        let key = self.cache_key(symbol);
        if let Some(hit) = self.cache.get(&key) {
            debug!(symbol, "sentiment cache hit");
            return Ok(hit);
        }

        let candles = self
            .source
            .candles(symbol, &self.config.interval, self.config.lookback)
            .await
            .with_context(|| format!("failed to fetch candles for {symbol}"))?;

        if candles.is_empty() {
            anyhow::bail!("no candles returned for {symbol}");
        }

        let (funding_rate, open_interest) = if self.config.include_funding {
            let (funding, oi) = tokio::join!(
                self.source.funding_rate(symbol),
                self.source.open_interest(symbol)
            );
            (
                optional_scalar(symbol, "funding rate", funding),
                optional_scalar(symbol, "open interest", oi),
            )
        } else {
            (None, None)
        };

        let result = evaluate(symbol, &candles, funding_rate, open_interest)
            .with_context(|| format!("invalid market data for {symbol}"))?;

        self.cache.insert(key, result.clone(), self.config.cache_ttl());
        debug!(
            symbol,
            candles = candles.len(),
            score = result.score,
            overall = %result.overall,
            "sentiment evaluated"
        );

        Ok(result)
    }

    /// Evaluate every symbol concurrently; results keep the input order.
    pub async fn sentiment_many(&self, symbols: &[String]) -> Vec<(String, Result<SentimentResult>)> {
        let results = join_all(symbols.iter().map(|s| self.sentiment(s))).await;
        symbols.iter().cloned().zip(results).collect()
    }
}

/// Downgrade a failed optional fetch to "absent".
fn optional_scalar(symbol: &str, what: &str, fetched: Result<f64>) -> Option<f64> {
    match fetched {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(symbol, error = %e, "{what} unavailable, evaluating without it");
            None
        }
    }
}
