//! Canonical Market Data Types
//!
//! The single in-memory representation every venue message is translated
//! into: book deltas, quotes, trades, bars and tickers. All records are
//! immutable once built, carry both `ts_event` and `ts_init`, and hold no
//! reference back to the wire message they came from.

mod bar;
mod book;
mod enums;
mod tick;
mod ticker;

use serde::{Deserialize, Serialize};

pub use bar::{Bar, BarSpecification, BarType};
pub use book::{OrderBookDelta, OrderBookDeltas};
pub use enums::{
    AggregationSource, AggressorSide, BarAggregation, BookAction, BookType, OrderSide, PriceType,
    TimestampSource,
};
pub use tick::{QuoteTick, TradeTick};
pub use ticker::Ticker;

use crate::domain::shared::{InstrumentId, UnixNanos};

/// Any canonical record produced from one wire message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarketDataEvent {
    /// Order book delta batch.
    Deltas(OrderBookDeltas),
    /// Top-of-book quote.
    Quote(QuoteTick),
    /// Trade print.
    Trade(TradeTick),
    /// OHLCV bar.
    Bar(Bar),
    /// 24h statistics.
    Ticker(Ticker),
}

impl MarketDataEvent {
    /// Get the event kind name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Deltas(_) => "deltas",
            Self::Quote(_) => "quote",
            Self::Trade(_) => "trade",
            Self::Bar(_) => "bar",
            Self::Ticker(_) => "ticker",
        }
    }

    /// Instrument the record describes.
    #[must_use]
    pub const fn instrument_id(&self) -> &InstrumentId {
        match self {
            Self::Deltas(deltas) => &deltas.instrument_id,
            Self::Quote(quote) => &quote.instrument_id,
            Self::Trade(trade) => &trade.instrument_id,
            Self::Bar(bar) => &bar.bar_type.instrument_id,
            Self::Ticker(ticker) => &ticker.instrument_id,
        }
    }

    /// Event time of the record.
    #[must_use]
    pub const fn ts_event(&self) -> UnixNanos {
        match self {
            Self::Deltas(deltas) => deltas.ts_event,
            Self::Quote(quote) => quote.ts_event,
            Self::Trade(trade) => trade.ts_event,
            Self::Bar(bar) => bar.ts_event,
            Self::Ticker(ticker) => ticker.ts_event,
        }
    }

    /// Local processing time of the record.
    #[must_use]
    pub const fn ts_init(&self) -> UnixNanos {
        match self {
            Self::Deltas(deltas) => deltas.ts_init,
            Self::Quote(quote) => quote.ts_init,
            Self::Trade(trade) => trade.ts_init,
            Self::Bar(bar) => bar.ts_init,
            Self::Ticker(ticker) => ticker.ts_init,
        }
    }
}
