#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements,
        clippy::unreadable_literal
    )
)]

//! Market Data Normalizer - Binance to Canonical Records
//!
//! A stateless translation layer that converts Binance REST and WebSocket
//! market data messages into one canonical representation: order book
//! deltas, quotes, trades, bars and 24h tickers with exact decimal prices
//! and nanosecond timestamps.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Canonical records and value objects
//!   - `market_data`: Book deltas, quotes, trades, bars, tickers
//!   - `shared`: Prices, quantities, identifiers, timestamps, errors
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: Sink interface for downstream consumers
//!   - `services`: Decode-and-publish loop with error classification
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `binance`: Wire schemas, translators, stream codec
//!   - `config`: Environment configuration
//!   - `sink`: JSON lines writer
//!   - `telemetry`: Tracing subscriber
//!
//! # Data Flow
//!
//! ```text
//! raw JSON ──► StreamCodec ──► BinanceTranslator ──► MarketDataEvent ──► MarketDataSink
//!                  │                   │
//!                  └── CodecError ◄────┴── NormalizeError (per-message | design-time)
//! ```
//!
//! Translators never read the clock: the caller stamps `ts_init`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Canonical records with no venue knowledge.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::market_data::{
    AggregationSource, AggressorSide, Bar, BarAggregation, BarSpecification, BarType, BookAction,
    BookType, MarketDataEvent, OrderBookDelta, OrderBookDeltas, OrderSide, PriceType, QuoteTick,
    Ticker, TimestampSource, TradeTick,
};
pub use domain::shared::{
    ErrorCategory, InstrumentId, NormalizeError, NumericLiteral, Price, Quantity, Symbol,
    TimestampPolicy, TradeId, UnixNanos, Venue,
};

// Application
pub use application::ports::{InMemorySink, MarketDataSink, SinkError};
pub use application::services::{
    NormalizationError, NormalizationService, NormalizationStats, Outcome,
};

// Binance adapters
pub use infrastructure::binance::{BinanceTranslator, CodecError, StreamCodec};

// Infrastructure config
pub use infrastructure::config::{ConfigError, LogFormat, NormalizerConfig};

// Output
pub use infrastructure::sink::JsonLinesSink;

// Telemetry
pub use infrastructure::telemetry::{TelemetryConfig, init as init_telemetry};
