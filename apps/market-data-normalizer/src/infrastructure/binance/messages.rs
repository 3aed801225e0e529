//! Binance Wire Message Types
//!
//! Typed schemas for the REST and WebSocket market data messages this crate
//! translates. One struct per wire format; field names map to Binance's
//! single-letter (stream) or camelCase (REST) keys.
//!
//! Required keys are checked before deserialization so an absent key is
//! reported as [`NormalizeError::MissingField`] naming the key, rather than
//! as an opaque decoder error.
//!
//! # Message Types
//!
//! ## WebSocket streams
//! - `DepthUpdateMessage`: `<symbol>@depth` diff depth
//! - `TickerMessage`: `<symbol>@ticker` 24h rolling statistics
//! - `BookTickerMessage`: `<symbol>@bookTicker` best bid/ask
//! - `TradeMessage`: `<symbol>@trade` raw trades
//! - `KlineMessage`: `<symbol>@kline_<interval>` candlesticks
//!
//! ## REST
//! - `RestTrade`: `GET /api/v3/trades` element
//! - `RestKline`: `GET /api/v3/klines` element (positional array)
//!
//! # References
//!
//! - [WebSocket Streams](https://developers.binance.com/docs/binance-spot-api-docs/web-socket-streams)
//! - [Market Data endpoints](https://developers.binance.com/docs/binance-spot-api-docs/rest-api/market-data-endpoints)

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::shared::{NormalizeError, NumericLiteral, TradeId};

/// A wire schema that can be decoded from a raw JSON value.
pub trait WireMessage: DeserializeOwned {
    /// Message kind used in error reports.
    const KIND: &'static str;

    /// Keys that must be present, as dotted paths (`"k.o"` is key `o` of
    /// the nested object `k`).
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Error for a value that is present but has the wrong shape.
    fn shape_error(reason: String) -> NormalizeError {
        NormalizeError::InvalidFieldType {
            message: Self::KIND,
            reason,
        }
    }

    /// Check required keys, then deserialize.
    fn from_value(value: Value) -> Result<Self, NormalizeError> {
        if !value.is_object() {
            return Err(Self::shape_error("expected a JSON object".to_string()));
        }

        if let Some(field) = Self::REQUIRED_FIELDS
            .iter()
            .find(|field| lookup(&value, field).is_none())
        {
            return Err(NormalizeError::missing(Self::KIND, *field));
        }

        serde_json::from_value(value).map_err(|e| Self::shape_error(e.to_string()))
    }
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
}

/// A venue id sent either as a JSON number or a string, kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    /// Numeric id.
    Number(serde_json::Number),
    /// String id.
    Text(String),
}

impl WireId {
    /// Convert to an opaque trade id without numeric reinterpretation.
    #[must_use]
    pub fn to_trade_id(&self) -> TradeId {
        match self {
            Self::Number(number) => TradeId::new(number.to_string()),
            Self::Text(text) => TradeId::new(text.clone()),
        }
    }
}

// =============================================================================
// WebSocket Stream Messages
// =============================================================================

/// A `(price, size)` level tuple as sent on the wire.
pub type WireLevel = Vec<NumericLiteral>;

/// Diff depth update.
///
/// # Wire Format (JSON)
/// ```json
/// {
///   "e": "depthUpdate",
///   "E": 1672515782136,
///   "s": "BNBBTC",
///   "U": 157,
///   "u": 160,
///   "b": [["0.0024", "10"]],
///   "a": [["0.0026", "100"]]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthUpdateMessage {
    /// Event type (always "depthUpdate")
    #[serde(rename = "e", default)]
    pub event_type: Option<String>,

    /// Event time (ms)
    #[serde(rename = "E")]
    pub event_time: i64,

    /// Symbol
    #[serde(rename = "s", default)]
    pub symbol: Option<String>,

    /// First update id in event
    #[serde(rename = "U", default)]
    pub first_update_id: Option<u64>,

    /// Final update id in event
    #[serde(rename = "u", default)]
    pub final_update_id: Option<u64>,

    /// Bid levels; `None` when the key is absent
    #[serde(rename = "b", default)]
    pub bids: Option<Vec<WireLevel>>,

    /// Ask levels; `None` when the key is absent
    #[serde(rename = "a", default)]
    pub asks: Option<Vec<WireLevel>>,
}

impl WireMessage for DepthUpdateMessage {
    const KIND: &'static str = "depthUpdate";
    const REQUIRED_FIELDS: &'static [&'static str] = &["E"];

    fn shape_error(reason: String) -> NormalizeError {
        NormalizeError::malformed_depth(reason)
    }
}

/// 24h rolling window ticker.
///
/// # Wire Format (JSON)
/// ```json
/// {
///   "e": "24hrTicker", "E": 1672515782136, "s": "BNBBTC",
///   "p": "0.0015", "P": "250.00", "w": "0.0018", "x": "0.0009",
///   "c": "0.0025", "Q": "10", "b": "0.0024", "B": "10",
///   "a": "0.0026", "A": "100", "o": "0.0010", "h": "0.0025",
///   "l": "0.0010", "v": "10000", "q": "18",
///   "O": 0, "C": 86400000, "F": 0, "L": 18150, "n": 18151
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerMessage {
    /// Event type (always "24hrTicker")
    #[serde(rename = "e", default)]
    pub event_type: Option<String>,

    /// Event time (ms)
    #[serde(rename = "E")]
    pub event_time: i64,

    /// Symbol
    #[serde(rename = "s", default)]
    pub symbol: Option<String>,

    /// Price change
    #[serde(rename = "p")]
    pub price_change: NumericLiteral,

    /// Price change percent
    #[serde(rename = "P")]
    pub price_change_percent: NumericLiteral,

    /// Weighted average price
    #[serde(rename = "w")]
    pub weighted_avg_price: NumericLiteral,

    /// First trade price before the window
    #[serde(rename = "x")]
    pub prev_close_price: NumericLiteral,

    /// Last price
    #[serde(rename = "c")]
    pub last_price: NumericLiteral,

    /// Last quantity
    #[serde(rename = "Q")]
    pub last_qty: NumericLiteral,

    /// Best bid price
    #[serde(rename = "b")]
    pub bid_price: NumericLiteral,

    /// Best ask price
    #[serde(rename = "a")]
    pub ask_price: NumericLiteral,

    /// Open price
    #[serde(rename = "o")]
    pub open_price: NumericLiteral,

    /// High price
    #[serde(rename = "h")]
    pub high_price: NumericLiteral,

    /// Low price
    #[serde(rename = "l")]
    pub low_price: NumericLiteral,

    /// Total traded base asset volume
    #[serde(rename = "v")]
    pub volume: NumericLiteral,

    /// Total traded quote asset volume
    #[serde(rename = "q")]
    pub quote_volume: NumericLiteral,

    /// Statistics open time (ms)
    #[serde(rename = "O")]
    pub open_time: i64,

    /// Statistics close time (ms)
    #[serde(rename = "C")]
    pub close_time: i64,

    /// First trade id
    #[serde(rename = "F")]
    pub first_id: i64,

    /// Last trade id
    #[serde(rename = "L")]
    pub last_id: i64,

    /// Total number of trades
    #[serde(rename = "n")]
    pub count: u64,
}

impl WireMessage for TickerMessage {
    const KIND: &'static str = "24hrTicker";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "E", "p", "P", "w", "x", "c", "Q", "b", "a", "o", "h", "l", "v", "q", "O", "C", "F", "L",
        "n",
    ];
}

/// Best bid/ask update. Carries no event time.
///
/// # Wire Format (JSON)
/// ```json
/// {
///   "u": 400900217,
///   "s": "BNBUSDT",
///   "b": "25.35190000",
///   "B": "31.21000000",
///   "a": "25.36520000",
///   "A": "40.66000000"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTickerMessage {
    /// Order book update id
    #[serde(rename = "u", default)]
    pub update_id: Option<u64>,

    /// Symbol
    #[serde(rename = "s", default)]
    pub symbol: Option<String>,

    /// Best bid price
    #[serde(rename = "b")]
    pub bid_price: NumericLiteral,

    /// Best bid quantity
    #[serde(rename = "B")]
    pub bid_qty: NumericLiteral,

    /// Best ask price
    #[serde(rename = "a")]
    pub ask_price: NumericLiteral,

    /// Best ask quantity
    #[serde(rename = "A")]
    pub ask_qty: NumericLiteral,
}

impl WireMessage for BookTickerMessage {
    const KIND: &'static str = "bookTicker";
    const REQUIRED_FIELDS: &'static [&'static str] = &["b", "B", "a", "A"];
}

/// Raw trade.
///
/// # Wire Format (JSON)
/// ```json
/// {
///   "e": "trade",
///   "E": 1672515782136,
///   "s": "BNBBTC",
///   "t": 12345,
///   "p": "0.001",
///   "q": "100",
///   "T": 1672515782136,
///   "m": true,
///   "M": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeMessage {
    /// Event type (always "trade")
    #[serde(rename = "e", default)]
    pub event_type: Option<String>,

    /// Event time (ms)
    #[serde(rename = "E", default)]
    pub event_time: Option<i64>,

    /// Symbol
    #[serde(rename = "s", default)]
    pub symbol: Option<String>,

    /// Trade id
    #[serde(rename = "t")]
    pub trade_id: WireId,

    /// Price
    #[serde(rename = "p")]
    pub price: NumericLiteral,

    /// Quantity
    #[serde(rename = "q")]
    pub quantity: NumericLiteral,

    /// Trade time (ms)
    #[serde(rename = "T")]
    pub trade_time: i64,

    /// Is the buyer the market maker?
    #[serde(rename = "m")]
    pub buyer_is_maker: bool,
}

impl WireMessage for TradeMessage {
    const KIND: &'static str = "trade";
    const REQUIRED_FIELDS: &'static [&'static str] = &["t", "p", "q", "T", "m"];
}

/// Candlestick update envelope.
///
/// # Wire Format (JSON)
/// ```json
/// {
///   "e": "kline",
///   "E": 1672515782136,
///   "s": "BNBBTC",
///   "k": {
///     "t": 1672515780000, "T": 1672515839999, "s": "BNBBTC", "i": "1m",
///     "f": 100, "L": 200, "o": "0.0010", "c": "0.0020", "h": "0.0025",
///     "l": "0.0015", "v": "1000", "n": 100, "x": false, "q": "1.0000",
///     "V": "500", "Q": "0.500", "B": "123456"
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KlineMessage {
    /// Event type (always "kline")
    #[serde(rename = "e", default)]
    pub event_type: Option<String>,

    /// Event time (ms)
    #[serde(rename = "E")]
    pub event_time: i64,

    /// Symbol
    #[serde(rename = "s", default)]
    pub symbol: Option<String>,

    /// Nested kline record
    #[serde(rename = "k")]
    pub kline: KlineData,
}

/// Nested kline record of a [`KlineMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KlineData {
    /// Kline start time (ms)
    #[serde(rename = "t", default)]
    pub start_time: Option<i64>,

    /// Kline close time (ms)
    #[serde(rename = "T", default)]
    pub close_time: Option<i64>,

    /// Symbol
    #[serde(rename = "s")]
    pub symbol: String,

    /// Interval code (e.g. "1m", "4h")
    #[serde(rename = "i")]
    pub interval: String,

    /// Open price
    #[serde(rename = "o")]
    pub open: NumericLiteral,

    /// High price
    #[serde(rename = "h")]
    pub high: NumericLiteral,

    /// Low price
    #[serde(rename = "l")]
    pub low: NumericLiteral,

    /// Close price
    #[serde(rename = "c")]
    pub close: NumericLiteral,

    /// Base asset volume
    #[serde(rename = "v")]
    pub volume: NumericLiteral,

    /// Quote asset volume
    #[serde(rename = "q")]
    pub quote_volume: NumericLiteral,

    /// Number of trades
    #[serde(rename = "n")]
    pub count: u64,

    /// Taker buy base asset volume
    #[serde(rename = "V")]
    pub taker_buy_base_volume: NumericLiteral,

    /// Taker buy quote asset volume
    #[serde(rename = "Q")]
    pub taker_buy_quote_volume: NumericLiteral,

    /// Is this kline closed?
    #[serde(rename = "x", default)]
    pub is_closed: Option<bool>,
}

impl WireMessage for KlineMessage {
    const KIND: &'static str = "kline";
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "E", "k", "k.s", "k.i", "k.o", "k.h", "k.l", "k.c", "k.v", "k.q", "k.n", "k.V", "k.Q",
    ];
}

// =============================================================================
// REST Messages
// =============================================================================

/// Recent trade from `GET /api/v3/trades`.
///
/// # Wire Format (JSON)
/// ```json
/// {
///   "id": 28457,
///   "price": "4.00000100",
///   "qty": "12.00000000",
///   "quoteQty": "48.000012",
///   "time": 1499865549590,
///   "isBuyerMaker": true,
///   "isBestMatch": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestTrade {
    /// Trade id
    pub id: WireId,

    /// Price
    pub price: NumericLiteral,

    /// Quantity
    pub qty: NumericLiteral,

    /// Quote quantity
    #[serde(default)]
    pub quote_qty: Option<NumericLiteral>,

    /// Trade time (ms)
    pub time: i64,

    /// Is the buyer the market maker?
    pub is_buyer_maker: bool,

    /// Was the trade the best price match?
    #[serde(default)]
    pub is_best_match: Option<bool>,
}

impl WireMessage for RestTrade {
    const KIND: &'static str = "rest trade";
    const REQUIRED_FIELDS: &'static [&'static str] = &["id", "price", "qty", "time", "isBuyerMaker"];
}

/// Kline from `GET /api/v3/klines`, decoded from its positional array.
///
/// # Wire Format (JSON)
/// ```json
/// [
///   1499040000000,      // 0: Open time
///   "0.01634790",       // 1: Open
///   "0.80000000",       // 2: High
///   "0.01575800",       // 3: Low
///   "0.01577100",       // 4: Close
///   "148976.11427815",  // 5: Volume
///   1499644799999,      // 6: Close time
///   "2434.19055334",    // 7: Quote asset volume
///   308,                // 8: Number of trades
///   "1756.87402397",    // 9: Taker buy base asset volume
///   "28.46694368",      // 10: Taker buy quote asset volume
///   "0"                 // 11: Unused field, ignored
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>")]
pub struct RestKline {
    /// Open time (ms)
    pub open_time: i64,
    /// Open price
    pub open: NumericLiteral,
    /// High price
    pub high: NumericLiteral,
    /// Low price
    pub low: NumericLiteral,
    /// Close price
    pub close: NumericLiteral,
    /// Base asset volume
    pub volume: NumericLiteral,
    /// Close time (ms)
    pub close_time: i64,
    /// Quote asset volume
    pub quote_volume: NumericLiteral,
    /// Number of trades
    pub count: u64,
    /// Taker buy base asset volume
    pub taker_buy_base_volume: NumericLiteral,
    /// Taker buy quote asset volume
    pub taker_buy_quote_volume: NumericLiteral,
}

impl RestKline {
    const KIND: &'static str = "kline array";

    /// Decode from the positional values. Elements past index 10 are ignored.
    ///
    /// # Errors
    ///
    /// - [`NormalizeError::MissingField`] naming the first absent index.
    /// - [`NormalizeError::InvalidFieldType`] if a time or count is not an integer.
    pub fn from_values(values: &[Value]) -> Result<Self, NormalizeError> {
        let at = |index: usize| {
            values
                .get(index)
                .ok_or_else(|| NormalizeError::missing(Self::KIND, format!("[{index}]")))
        };
        let literal = |index: usize| at(index).map(|value| literal_from(value.clone()));
        let integer = |index: usize| {
            at(index)?.as_i64().ok_or_else(|| NormalizeError::InvalidFieldType {
                message: Self::KIND,
                reason: format!("element [{index}] is not an integer"),
            })
        };
        let unsigned = |index: usize| {
            at(index)?.as_u64().ok_or_else(|| NormalizeError::InvalidFieldType {
                message: Self::KIND,
                reason: format!("element [{index}] is not an unsigned integer"),
            })
        };

        Ok(Self {
            open_time: integer(0)?,
            open: literal(1)?,
            high: literal(2)?,
            low: literal(3)?,
            close: literal(4)?,
            volume: literal(5)?,
            close_time: integer(6)?,
            quote_volume: literal(7)?,
            count: unsigned(8)?,
            taker_buy_base_volume: literal(9)?,
            taker_buy_quote_volume: literal(10)?,
        })
    }
}

impl TryFrom<Vec<Value>> for RestKline {
    type Error = NormalizeError;

    fn try_from(values: Vec<Value>) -> Result<Self, Self::Error> {
        Self::from_values(&values)
    }
}

fn literal_from(value: Value) -> NumericLiteral {
    match value {
        Value::String(text) => NumericLiteral::Text(text),
        Value::Number(number) => NumericLiteral::Number(number),
        other => NumericLiteral::Other(other),
    }
}
