//! Rolling 24h statistics snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{InstrumentId, UnixNanos};

/// Rolling 24h window statistics for one instrument.
///
/// Statistics are kept as raw decimals rather than [`Price`](crate::domain::shared::Price)
/// because several of them (changes, percentages) are not prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    /// Instrument the statistics describe.
    pub instrument_id: InstrumentId,
    /// Absolute price change over the window.
    pub price_change: Decimal,
    /// Percent price change over the window.
    pub price_change_percent: Decimal,
    /// Volume-weighted average price.
    pub weighted_avg_price: Decimal,
    /// Close of the previous window.
    pub prev_close_price: Decimal,
    /// Last traded price.
    pub last_price: Decimal,
    /// Last traded quantity.
    pub last_qty: Decimal,
    /// Best bid price.
    pub bid_price: Decimal,
    /// Best ask price.
    pub ask_price: Decimal,
    /// Window open price.
    pub open_price: Decimal,
    /// Window high price.
    pub high_price: Decimal,
    /// Window low price.
    pub low_price: Decimal,
    /// Base asset volume.
    pub volume: Decimal,
    /// Quote asset volume.
    pub quote_volume: Decimal,
    /// Window open time.
    pub open_time: UnixNanos,
    /// Window close time.
    pub close_time: UnixNanos,
    /// First trade id in the window (`-1` when no trade occurred).
    pub first_trade_id: i64,
    /// Last trade id in the window (`-1` when no trade occurred).
    pub last_trade_id: i64,
    /// Number of trades in the window.
    pub count: u64,
    /// Event time at the venue.
    pub ts_event: UnixNanos,
    /// Local processing time.
    pub ts_init: UnixNanos,
}
