//! Binance Message Translators
//!
//! Pure mappings from typed Binance wire messages to canonical records.
//! Every method takes the processing timestamp (`ts_init`) from the caller
//! and never reads the clock, so identical input always yields identical
//! output or an identical error.
//!
//! # Timestamps
//!
//! | Message          | `ts_event` source         |
//! |------------------|---------------------------|
//! | depth update     | `E` (event time)          |
//! | 24h ticker       | `E` (event time)          |
//! | book ticker      | copied from `ts_init`     |
//! | streaming trade  | `T` (trade time)          |
//! | REST trade       | `time`                    |
//! | streaming kline  | `E` (event time)          |
//! | REST kline       | index 0 (open time)       |

use rust_decimal::Decimal;

use crate::domain::market_data::{
    AggressorSide, Bar, BarSpecification, BarType, BookType, OrderBookDelta, OrderBookDeltas,
    OrderSide, QuoteTick, Ticker, TimestampSource, TradeTick,
};
use crate::domain::shared::{
    InstrumentId, NormalizeError, NumericLiteral, Price, Quantity, Symbol, TimestampPolicy,
    UnixNanos, Venue,
};
use crate::infrastructure::binance::messages::{
    BookTickerMessage, DepthUpdateMessage, KlineMessage, RestKline, RestTrade, TickerMessage,
    TradeMessage, WireLevel,
};

/// Translates Binance wire messages into canonical market data records.
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads and called concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinanceTranslator {
    venue: Venue,
    timestamps: TimestampPolicy,
}

impl Default for BinanceTranslator {
    fn default() -> Self {
        Self::new(Venue::new("BINANCE"), TimestampPolicy::default())
    }
}

impl BinanceTranslator {
    /// Create a translator qualifying symbols with `venue`.
    #[must_use]
    pub const fn new(venue: Venue, timestamps: TimestampPolicy) -> Self {
        Self { venue, timestamps }
    }

    /// Venue used to qualify symbols.
    #[must_use]
    pub const fn venue(&self) -> &Venue {
        &self.venue
    }

    /// Timestamp acceptance policy.
    #[must_use]
    pub const fn timestamp_policy(&self) -> TimestampPolicy {
        self.timestamps
    }

    /// Qualify a raw symbol with the configured venue.
    #[must_use]
    pub fn instrument_id(&self, symbol: impl Into<Symbol>) -> InstrumentId {
        InstrumentId::new(symbol.into(), self.venue.clone())
    }

    fn nanos(&self, millis: i64) -> Result<UnixNanos, NormalizeError> {
        self.timestamps.millis_to_nanos(millis)
    }

    // =========================================================================
    // Order book
    // =========================================================================

    /// Translate a diff depth update into an ordered delta batch.
    ///
    /// Bids come first, then asks, each in wire order. A zero size removes
    /// the level; any positive size upserts it.
    ///
    /// # Errors
    ///
    /// - [`NormalizeError::MalformedDepthMessage`] if either level list is
    ///   absent or a level is not a `(price, size)` pair.
    /// - [`NormalizeError::InvalidNumericLiteral`] / [`NormalizeError::InvalidTimestamp`]
    ///   for unparseable values.
    pub fn order_book_deltas(
        &self,
        msg: &DepthUpdateMessage,
        instrument_id: &InstrumentId,
        ts_init: UnixNanos,
    ) -> Result<OrderBookDeltas, NormalizeError> {
        let bids = msg
            .bids
            .as_deref()
            .ok_or_else(|| NormalizeError::malformed_depth("bid levels `b` are absent"))?;
        let asks = msg
            .asks
            .as_deref()
            .ok_or_else(|| NormalizeError::malformed_depth("ask levels `a` are absent"))?;

        let ts_event = self.nanos(msg.event_time)?;

        let mut deltas = Vec::with_capacity(bids.len() + asks.len());
        for (side, levels) in [(OrderSide::Buy, bids), (OrderSide::Sell, asks)] {
            for (index, level) in levels.iter().enumerate() {
                let (price, size) = split_level(level, side, index)?;
                deltas.push(OrderBookDelta::level(
                    instrument_id.clone(),
                    side,
                    Price::from_literal(price)?,
                    Quantity::from_literal(size)?,
                    ts_event,
                    ts_init,
                ));
            }
        }

        Ok(OrderBookDeltas {
            instrument_id: instrument_id.clone(),
            book_type: BookType::L2Mbp,
            deltas,
            first_update_id: msg.first_update_id,
            final_update_id: msg.final_update_id,
            ts_event,
            ts_init,
        })
    }

    // =========================================================================
    // Quotes, trades, tickers
    // =========================================================================

    /// Translate a book ticker into a quote.
    ///
    /// The wire format has no event time, so `ts_event` is set to `ts_init`
    /// and the quote is marked [`TimestampSource::Local`].
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidNumericLiteral`] for unparseable values.
    pub fn quote_tick(
        &self,
        msg: &BookTickerMessage,
        instrument_id: &InstrumentId,
        ts_init: UnixNanos,
    ) -> Result<QuoteTick, NormalizeError> {
        Ok(QuoteTick {
            instrument_id: instrument_id.clone(),
            bid_price: Price::from_literal(&msg.bid_price)?,
            ask_price: Price::from_literal(&msg.ask_price)?,
            bid_size: Quantity::from_literal(&msg.bid_qty)?,
            ask_size: Quantity::from_literal(&msg.ask_qty)?,
            ts_event: ts_init,
            ts_event_source: TimestampSource::Local,
            ts_init,
        })
    }

    /// Translate a streaming trade into a trade tick.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidNumericLiteral`] or
    /// [`NormalizeError::InvalidTimestamp`] for unparseable values.
    pub fn trade_tick(
        &self,
        msg: &TradeMessage,
        instrument_id: &InstrumentId,
        ts_init: UnixNanos,
    ) -> Result<TradeTick, NormalizeError> {
        Ok(TradeTick {
            instrument_id: instrument_id.clone(),
            price: Price::from_literal(&msg.price)?,
            size: Quantity::from_literal(&msg.quantity)?,
            aggressor_side: AggressorSide::from_buyer_is_maker(msg.buyer_is_maker),
            trade_id: msg.trade_id.to_trade_id(),
            ts_event: self.nanos(msg.trade_time)?,
            ts_init,
        })
    }

    /// Translate a REST trade into a trade tick.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidNumericLiteral`] or
    /// [`NormalizeError::InvalidTimestamp`] for unparseable values.
    pub fn trade_tick_rest(
        &self,
        trade: &RestTrade,
        instrument_id: &InstrumentId,
        ts_init: UnixNanos,
    ) -> Result<TradeTick, NormalizeError> {
        Ok(TradeTick {
            instrument_id: instrument_id.clone(),
            price: Price::from_literal(&trade.price)?,
            size: Quantity::from_literal(&trade.qty)?,
            aggressor_side: AggressorSide::from_buyer_is_maker(trade.is_buyer_maker),
            trade_id: trade.id.to_trade_id(),
            ts_event: self.nanos(trade.time)?,
            ts_init,
        })
    }

    /// Translate a 24h rolling window ticker.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidNumericLiteral`] or
    /// [`NormalizeError::InvalidTimestamp`] for unparseable values.
    pub fn ticker(
        &self,
        msg: &TickerMessage,
        instrument_id: &InstrumentId,
        ts_init: UnixNanos,
    ) -> Result<Ticker, NormalizeError> {
        let volume = Quantity::from_literal(&msg.volume)?;
        let quote_volume = Quantity::from_literal(&msg.quote_volume)?;
        let last_qty = Quantity::from_literal(&msg.last_qty)?;

        Ok(Ticker {
            instrument_id: instrument_id.clone(),
            price_change: decimal(&msg.price_change)?,
            price_change_percent: decimal(&msg.price_change_percent)?,
            weighted_avg_price: decimal(&msg.weighted_avg_price)?,
            prev_close_price: decimal(&msg.prev_close_price)?,
            last_price: decimal(&msg.last_price)?,
            last_qty: last_qty.as_decimal(),
            bid_price: decimal(&msg.bid_price)?,
            ask_price: decimal(&msg.ask_price)?,
            open_price: decimal(&msg.open_price)?,
            high_price: decimal(&msg.high_price)?,
            low_price: decimal(&msg.low_price)?,
            volume: volume.as_decimal(),
            quote_volume: quote_volume.as_decimal(),
            open_time: self.nanos(msg.open_time)?,
            close_time: self.nanos(msg.close_time)?,
            first_trade_id: msg.first_id,
            last_trade_id: msg.last_id,
            count: msg.count,
            ts_event: self.nanos(msg.event_time)?,
            ts_init,
        })
    }

    // =========================================================================
    // Bars
    // =========================================================================

    /// Translate a REST kline array into a bar of a caller-supplied type.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidNumericLiteral`] or
    /// [`NormalizeError::InvalidTimestamp`] for unparseable values.
    pub fn bar_rest(
        &self,
        bar_type: &BarType,
        kline: &RestKline,
        ts_init: UnixNanos,
    ) -> Result<Bar, NormalizeError> {
        Ok(Bar {
            bar_type: bar_type.clone(),
            open: Price::from_literal(&kline.open)?,
            high: Price::from_literal(&kline.high)?,
            low: Price::from_literal(&kline.low)?,
            close: Price::from_literal(&kline.close)?,
            volume: Quantity::from_literal(&kline.volume)?,
            quote_volume: Quantity::from_literal(&kline.quote_volume)?,
            count: kline.count,
            taker_buy_base_volume: Quantity::from_literal(&kline.taker_buy_base_volume)?,
            taker_buy_quote_volume: Quantity::from_literal(&kline.taker_buy_quote_volume)?,
            ts_event: self.nanos(kline.open_time)?,
            ts_init,
        })
    }

    /// Translate a streaming kline, deriving the bar type from its symbol
    /// and interval code.
    ///
    /// # Errors
    ///
    /// - [`NormalizeError::UnsupportedAggregationUnit`] (fatal) for an
    ///   interval unit other than `m`, `h` or `d`.
    /// - [`NormalizeError::InvalidIntervalCode`] for a code without a
    ///   positive step.
    /// - [`NormalizeError::InvalidNumericLiteral`] / [`NormalizeError::InvalidTimestamp`]
    ///   for unparseable values.
    pub fn bar(&self, msg: &KlineMessage, ts_init: UnixNanos) -> Result<Bar, NormalizeError> {
        let kline = &msg.kline;
        let spec = BarSpecification::from_interval(&kline.interval)?;
        let bar_type = BarType::external(self.instrument_id(kline.symbol.as_str()), spec);

        Ok(Bar {
            bar_type,
            open: Price::from_literal(&kline.open)?,
            high: Price::from_literal(&kline.high)?,
            low: Price::from_literal(&kline.low)?,
            close: Price::from_literal(&kline.close)?,
            volume: Quantity::from_literal(&kline.volume)?,
            quote_volume: Quantity::from_literal(&kline.quote_volume)?,
            count: kline.count,
            taker_buy_base_volume: Quantity::from_literal(&kline.taker_buy_base_volume)?,
            taker_buy_quote_volume: Quantity::from_literal(&kline.taker_buy_quote_volume)?,
            ts_event: self.nanos(msg.event_time)?,
            ts_init,
        })
    }
}

fn decimal(literal: &NumericLiteral) -> Result<Decimal, NormalizeError> {
    literal.to_decimal()
}

fn split_level(
    level: &WireLevel,
    side: OrderSide,
    index: usize,
) -> Result<(&NumericLiteral, &NumericLiteral), NormalizeError> {
    match level.as_slice() {
        [price, size] => Ok((price, size)),
        other => Err(NormalizeError::malformed_depth(format!(
            "{} level [{index}] has {} elements, expected 2",
            side_name(side),
            other.len()
        ))),
    }
}

const fn side_name(side: OrderSide) -> &'static str {
    match side {
        OrderSide::Buy => "bid",
        OrderSide::Sell => "ask",
    }
}
