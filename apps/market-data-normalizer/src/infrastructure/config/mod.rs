//! Configuration Module
//!
//! Configuration loading for the normalizer binary.

mod settings;

pub use settings::{ConfigError, DEFAULT_VENUE, LogFormat, NormalizerConfig};
