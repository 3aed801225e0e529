//! Domain Layer - Canonical market data types.
//!
//! This layer contains the canonical records and the value objects they are
//! built from. Nothing here knows about any particular venue's wire format.

/// Canonical records (book deltas, quotes, trades, bars, tickers).
pub mod market_data;

/// Value objects and errors shared by every translator.
pub mod shared;
