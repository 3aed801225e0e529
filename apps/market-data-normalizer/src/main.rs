//! Market Data Normalizer Binary
//!
//! Reads Binance stream messages from stdin (one JSON object per line),
//! stamps each with the local receive time and writes canonical records to
//! stdout as JSON lines.
//!
//! # Usage
//!
//! ```bash
//! websocat wss://stream.binance.com:9443/stream?streams=btcusdt@trade \
//!   | cargo run --bin market-data-normalizer
//! ```
//!
//! # Environment Variables
//!
//! - `NORMALIZER_VENUE`: Venue qualifying instrument ids (default: BINANCE)
//! - `NORMALIZER_MAX_TIMESTAMP_MS`: Upper bound for wire timestamps (default: none)
//! - `NORMALIZER_LOG_FORMAT`: text | json (default: text)
//! - `RUST_LOG`: Log filter (default: `market_data_normalizer=info`)
//!
//! Rejected messages are logged and skipped. A design-time error (an
//! interval unit the translator does not know) ends the process with a
//! non-zero exit code.

use std::io::{BufRead, BufWriter};

use anyhow::Context;
use chrono::Utc;
use market_data_normalizer::infrastructure::telemetry::{self, TelemetryConfig};
use market_data_normalizer::{
    JsonLinesSink, NormalizationError, NormalizationService, NormalizerConfig, Outcome,
    StreamCodec, UnixNanos,
};

fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = NormalizerConfig::from_env().context("invalid normalizer configuration")?;

    if let Err(e) = telemetry::init_with_config(&TelemetryConfig::from(&config)) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    log_config(&config);

    let stdout = std::io::stdout();
    let sink = JsonLinesSink::new(BufWriter::new(stdout.lock()));
    let mut service = NormalizationService::new(StreamCodec::new(config.translator()), sink);

    let stdin = std::io::stdin();
    for (index, line) in stdin.lock().lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        let line_number = index + 1;

        match service.process(&line, wall_clock_nanos()) {
            Ok(Outcome::Published { kind, instrument_id }) => {
                tracing::trace!(line_number, kind, %instrument_id, "Record published");
            }
            Ok(Outcome::Rejected(e)) => {
                tracing::warn!(line_number, error = %e, "Message rejected");
            }
            Ok(Outcome::Skipped) => {}
            Err(NormalizationError::Fatal(e)) => {
                tracing::error!(
                    line_number,
                    error = %e,
                    category = e.category().as_str(),
                    "Fatal translation error"
                );
                service.flush()?;
                return Err(NormalizationError::Fatal(e))
                    .with_context(|| format!("stopped at line {line_number}"));
            }
            Err(e) => return Err(e.into()),
        }
    }

    service.flush()?;

    let stats = service.stats();
    tracing::info!(
        published = stats.published,
        rejected = stats.rejected,
        skipped = stats.skipped,
        "Input exhausted"
    );

    Ok(())
}

/// Current wall-clock time as `ts_init`.
fn wall_clock_nanos() -> UnixNanos {
    Utc::now()
        .timestamp_nanos_opt()
        .and_then(|nanos| u64::try_from(nanos).ok())
        .map_or(UnixNanos::ZERO, UnixNanos::new)
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &NormalizerConfig) {
    tracing::info!(
        venue = %config.venue,
        max_timestamp_ms = ?config.timestamps.max_millis,
        log_format = config.log_format.as_str(),
        "Configuration loaded"
    );
}
