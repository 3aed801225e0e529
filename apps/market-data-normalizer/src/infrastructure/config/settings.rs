//! Normalizer Configuration Settings
//!
//! Configuration types for the normalizer, loaded from environment variables.

use crate::domain::shared::{TimestampPolicy, Venue};
use crate::infrastructure::binance::BinanceTranslator;

/// Venue used when `NORMALIZER_VENUE` is unset.
pub const DEFAULT_VENUE: &str = "BINANCE";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse format from string.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Get the format name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Complete normalizer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Venue qualifying every instrument id.
    pub venue: Venue,
    /// Accepted range for wire timestamps.
    pub timestamps: TimestampPolicy,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            venue: Venue::new(DEFAULT_VENUE),
            timestamps: TimestampPolicy::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl NormalizerConfig {
    /// Create configuration from environment variables.
    ///
    /// | Variable                      | Default   |
    /// |-------------------------------|-----------|
    /// | `NORMALIZER_VENUE`            | `BINANCE` |
    /// | `NORMALIZER_MAX_TIMESTAMP_MS` | unbounded |
    /// | `NORMALIZER_LOG_FORMAT`       | `text`    |
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but empty or unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`NormalizerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let venue = match lookup("NORMALIZER_VENUE") {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyValue("NORMALIZER_VENUE".to_string()));
            }
            Some(value) => Venue::new(value.trim()),
            None => Venue::new(DEFAULT_VENUE),
        };

        let timestamps = match parse_optional_u64(&lookup, "NORMALIZER_MAX_TIMESTAMP_MS")? {
            Some(max_millis) => TimestampPolicy::bounded(max_millis),
            None => TimestampPolicy::default(),
        };

        let log_format = lookup("NORMALIZER_LOG_FORMAT")
            .map(|s| LogFormat::from_str_case_insensitive(&s))
            .unwrap_or_default();

        Ok(Self {
            venue,
            timestamps,
            log_format,
        })
    }

    /// Build a translator for this configuration.
    #[must_use]
    pub fn translator(&self) -> BinanceTranslator {
        BinanceTranslator::new(self.venue.clone(), self.timestamps)
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable cannot be parsed.
    #[error("environment variable {key} has invalid value {value:?}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Value as found.
        value: String,
    },
}

fn parse_optional_u64<F>(lookup: &F, key: &str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        })
}
