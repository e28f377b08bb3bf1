// =============================================================================
// Aurora Sentiment — Main Entry Point
// =============================================================================
//
// Periodically evaluates every configured symbol and prints one JSON verdict
// per line on stdout.  Logs go to stderr through tracing.
// =============================================================================

use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use aurora_sentiment::runtime_config::RuntimeConfig;
use aurora_sentiment::{BinanceSource, SentimentService};

const DEFAULT_CONFIG_PATH: &str = "sentiment_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Aurora Sentiment starting up");

    let config_path =
        std::env::var("SENTIMENT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let mut config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    if let Ok(syms) = std::env::var("SENTIMENT_SYMBOLS") {
        config.override_symbols(&syms);
    }

    info!(
        symbols = ?config.symbols,
        interval = %config.interval,
        lookback = config.lookback,
        refresh_secs = config.refresh_secs,
        "Configured sentiment service"
    );

    // ── 2. Build the service ─────────────────────────────────────────────
    let service = SentimentService::new(BinanceSource::new(), config);
    let config = service.config();
    let mut interval = tokio::time::interval(config.refresh_interval());

    // ── 3. Refresh loop ──────────────────────────────────────────────────
    loop {
        tokio::select! {
            _ = interval.tick() => {
                refresh(&service, &config.symbols).await;
                let purged = service.cache().purge_expired();
                let weight = service.source().rate_limit().snapshot();
                debug!(
                    used_weight_1m = weight.used_weight_1m,
                    cached = service.cache().len(),
                    purged,
                    "Refresh pass complete"
                );
                if config.run_once {
                    break;
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                warn!("Shutdown signal received, stopping");
                break;
            }
        }
    }

    info!("Aurora Sentiment shut down complete.");
    Ok(())
}

/// Evaluate all symbols once, logging each verdict and printing it as JSON.
async fn refresh(service: &SentimentService<BinanceSource>, symbols: &[String]) {
    for (symbol, outcome) in service.sentiment_many(symbols).await {
        match outcome {
            Ok(result) => {
                info!(
                    symbol = %symbol,
                    overall = %result.overall,
                    score = result.score,
                    signals = result.signals.len(),
                    patterns = result.patterns.len(),
                    "Sentiment"
                );
                match serde_json::to_string(&result) {
                    Ok(line) => println!("{line}"),
                    Err(e) => error!(symbol = %symbol, error = %e, "Failed to serialise result"),
                }
            }
            Err(e) => error!(symbol = %symbol, error = %format!("{e:#}"), "Sentiment evaluation failed"),
        }
    }
}
