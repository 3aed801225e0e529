//! Tracing Subscriber Initialization
//!
//! Configures `tracing-subscriber` with an env filter and either a text or a
//! JSON formatter. Logs go to stderr so stdout stays free for records.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Filter directives (default: `market_data_normalizer=info`)
//! - `NORMALIZER_LOG_FORMAT`: `text` or `json` (read by [`NormalizerConfig`])
//!
//! # Usage
//!
//! ```ignore
//! use market_data_normalizer::infrastructure::telemetry;
//!
//! telemetry::init()?;
//! tracing::info!("Normalizer started");
//! ```
//!
//! [`NormalizerConfig`]: crate::infrastructure::config::NormalizerConfig

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::infrastructure::config::{LogFormat, NormalizerConfig};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "market_data_normalizer=info";

/// Telemetry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Output format.
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is unset.
    pub default_directive: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            default_directive: DEFAULT_DIRECTIVE.to_string(),
        }
    }
}

impl From<&NormalizerConfig> for TelemetryConfig {
    fn from(config: &NormalizerConfig) -> Self {
        Self {
            format: config.log_format,
            ..Self::default()
        }
    }
}

impl TelemetryConfig {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_directive))
    }
}

/// Initialize the global subscriber with default configuration.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> Result<(), TryInitError> {
    init_with_config(&TelemetryConfig::default())
}

/// Initialize the global subscriber with custom configuration.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_with_config(config: &TelemetryConfig) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    match config.format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(false),
            )
            .try_init(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.default_directive, DEFAULT_DIRECTIVE);
    }

    #[test]
    fn config_takes_format_from_normalizer_config() {
        let normalizer = NormalizerConfig {
            log_format: LogFormat::Json,
            ..NormalizerConfig::default()
        };
        let config = TelemetryConfig::from(&normalizer);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.default_directive, DEFAULT_DIRECTIVE);
    }

    #[test]
    fn second_init_fails_without_panicking() {
        let config = TelemetryConfig::default();
        let _ = init_with_config(&config);
        assert!(init_with_config(&config).is_err());
    }
}
