//! Top-of-book quotes and trade prints.

use serde::{Deserialize, Serialize};

use super::enums::{AggressorSide, TimestampSource};
use crate::domain::shared::{InstrumentId, Price, Quantity, TradeId, UnixNanos};

/// Best bid and offer at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTick {
    /// Quoted instrument.
    pub instrument_id: InstrumentId,
    /// Best bid price.
    pub bid_price: Price,
    /// Best ask price.
    pub ask_price: Price,
    /// Size at the best bid.
    pub bid_size: Quantity,
    /// Size at the best ask.
    pub ask_size: Quantity,
    /// Event time. Check `ts_event_source` before using it for latency.
    pub ts_event: UnixNanos,
    /// Whether `ts_event` came from the venue or was copied from `ts_init`.
    pub ts_event_source: TimestampSource,
    /// Local processing time.
    pub ts_init: UnixNanos,
}

/// A single trade print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeTick {
    /// Traded instrument.
    pub instrument_id: InstrumentId,
    /// Execution price.
    pub price: Price,
    /// Executed size.
    pub size: Quantity,
    /// Taker side.
    pub aggressor_side: AggressorSide,
    /// Venue match id.
    pub trade_id: TradeId,
    /// Trade time at the venue.
    pub ts_event: UnixNanos,
    /// Local processing time.
    pub ts_init: UnixNanos,
}
