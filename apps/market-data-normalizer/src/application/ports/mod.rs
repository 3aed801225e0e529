//! Port Interfaces
//!
//! Contracts that infrastructure adapters implement, following the
//! Hexagonal Architecture pattern.
//!
//! ## Driven Ports (Outbound)
//!
//! - `MarketDataSink`: Downstream consumer of canonical records

mod market_data_sink;

pub use market_data_sink::{InMemorySink, MarketDataSink, SinkError};
