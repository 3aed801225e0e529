//! Infrastructure Layer - Adapters and external integrations.
//!
//! This layer contains the venue codec and the concrete implementations of
//! the port interfaces defined in the application layer.

/// Binance wire schemas, translators and stream codec.
pub mod binance;

/// Configuration loaded from the environment.
pub mod config;

/// JSON lines output adapter.
pub mod sink;

/// Tracing subscriber setup.
pub mod telemetry;
