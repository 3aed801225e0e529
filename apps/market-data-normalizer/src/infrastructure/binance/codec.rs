//! Stream Codec Module
//!
//! Decodes raw Binance JSON text into canonical [`MarketDataEvent`]s.
//!
//! - **WebSocket streams**: single event objects, either bare or wrapped in
//!   the combined-stream envelope `{"stream": "<name>", "data": {...}}`.
//!   Dispatch is on the `e` event type. Book ticker messages carry no `e`
//!   and are recognised by their `b`/`B`/`a`/`A` keys.
//! - **REST**: `GET /api/v3/trades` and `GET /api/v3/klines` response arrays.
//!
//! The caller supplies `ts_init`; the codec never reads the clock.

use serde_json::Value;

use crate::domain::market_data::{Bar, BarType, MarketDataEvent, TradeTick};
use crate::domain::shared::{ErrorCategory, InstrumentId, NormalizeError, UnixNanos};
use crate::infrastructure::binance::messages::{
    BookTickerMessage, DepthUpdateMessage, KlineMessage, RestKline, RestTrade, TickerMessage,
    TradeMessage, WireMessage,
};
use crate::infrastructure::binance::parsing::BinanceTranslator;

/// Keys that identify a book ticker message.
const BOOK_TICKER_KEYS: [&str; 4] = ["b", "B", "a", "A"];

/// Codec errors.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not valid JSON.
    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),

    /// The `e` event type is not one this codec translates.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    /// The JSON is valid but not shaped like any stream or REST message.
    #[error("invalid message format: {0}")]
    InvalidFormat(String),

    /// The message was recognised but could not be translated.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

impl CodecError {
    /// Classify this error for the caller's drop-or-crash decision.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Normalize(e) => e.category(),
            Self::Json(_) | Self::UnknownEventType(_) | Self::InvalidFormat(_) => {
                ErrorCategory::PerMessage
            }
        }
    }

    /// Returns true if the process should stop rather than drop the message.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.category(), ErrorCategory::DesignTime)
    }
}

/// Stream event kinds this codec dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    DepthUpdate,
    Ticker,
    BookTicker,
    Trade,
    Kline,
}

impl EventKind {
    fn detect(value: &Value) -> Result<Self, CodecError> {
        match value.get("e") {
            Some(Value::String(event_type)) => match event_type.as_str() {
                "depthUpdate" => Ok(Self::DepthUpdate),
                "24hrTicker" => Ok(Self::Ticker),
                "trade" => Ok(Self::Trade),
                "kline" => Ok(Self::Kline),
                "bookTicker" => Ok(Self::BookTicker),
                other => Err(CodecError::UnknownEventType(other.to_string())),
            },
            Some(other) => Err(CodecError::InvalidFormat(format!(
                "event type `e` is not a string: {other}"
            ))),
            None if BOOK_TICKER_KEYS.iter().all(|key| value.get(key).is_some()) => {
                Ok(Self::BookTicker)
            }
            None => Err(CodecError::InvalidFormat(
                "object has no event type `e` and is not a book ticker".to_string(),
            )),
        }
    }
}

/// JSON codec turning Binance stream and REST payloads into canonical records.
#[derive(Debug, Default, Clone)]
pub struct StreamCodec {
    translator: BinanceTranslator,
}

impl StreamCodec {
    /// Create a codec around a configured translator.
    #[must_use]
    pub const fn new(translator: BinanceTranslator) -> Self {
        Self { translator }
    }

    /// Get the underlying translator.
    #[must_use]
    pub const fn translator(&self) -> &BinanceTranslator {
        &self.translator
    }

    /// Decode one WebSocket text frame into a canonical event.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON, the event type is unknown,
    /// or translation fails. Check [`CodecError::is_fatal`] before dropping.
    pub fn decode(&self, text: &str, ts_init: UnixNanos) -> Result<MarketDataEvent, CodecError> {
        let value: Value = serde_json::from_str(text.trim())?;
        self.decode_value(value, ts_init)
    }

    /// Decode an already-parsed stream message.
    ///
    /// # Errors
    ///
    /// See [`StreamCodec::decode`].
    pub fn decode_value(
        &self,
        value: Value,
        ts_init: UnixNanos,
    ) -> Result<MarketDataEvent, CodecError> {
        let (stream, payload) = unwrap_envelope(value)?;
        let stream = stream.as_deref();
        let kind = EventKind::detect(&payload)?;

        tracing::trace!(?kind, stream, "Decoding stream message");

        let event = match kind {
            EventKind::DepthUpdate => {
                let instrument_id =
                    self.resolve_instrument(&payload, stream, DepthUpdateMessage::KIND)?;
                let msg = DepthUpdateMessage::from_value(payload)?;
                MarketDataEvent::Deltas(self.translator.order_book_deltas(
                    &msg,
                    &instrument_id,
                    ts_init,
                )?)
            }
            EventKind::Ticker => {
                let instrument_id =
                    self.resolve_instrument(&payload, stream, TickerMessage::KIND)?;
                let msg = TickerMessage::from_value(payload)?;
                MarketDataEvent::Ticker(self.translator.ticker(&msg, &instrument_id, ts_init)?)
            }
            EventKind::BookTicker => {
                let instrument_id =
                    self.resolve_instrument(&payload, stream, BookTickerMessage::KIND)?;
                let msg = BookTickerMessage::from_value(payload)?;
                MarketDataEvent::Quote(
                    self.translator
                        .quote_tick(&msg, &instrument_id, ts_init)?,
                )
            }
            EventKind::Trade => {
                let instrument_id =
                    self.resolve_instrument(&payload, stream, TradeMessage::KIND)?;
                let msg = TradeMessage::from_value(payload)?;
                MarketDataEvent::Trade(
                    self.translator
                        .trade_tick(&msg, &instrument_id, ts_init)?,
                )
            }
            EventKind::Kline => {
                let msg = KlineMessage::from_value(payload)?;
                MarketDataEvent::Bar(self.translator.bar(&msg, ts_init)?)
            }
        };

        tracing::debug!(
            kind = event.kind(),
            instrument_id = %event.instrument_id(),
            ts_event = %event.ts_event(),
            "Decoded market data event"
        );

        Ok(event)
    }

    /// Decode a `GET /api/v3/trades` response.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array or any element fails
    /// to translate. No partial result is returned.
    pub fn decode_rest_trades(
        &self,
        text: &str,
        instrument_id: &InstrumentId,
        ts_init: UnixNanos,
    ) -> Result<Vec<TradeTick>, CodecError> {
        let raw_array: Vec<Value> = serde_json::from_str(text.trim())?;

        let ticks = raw_array
            .into_iter()
            .map(|value| {
                let trade = RestTrade::from_value(value)?;
                self.translator
                    .trade_tick_rest(&trade, instrument_id, ts_init)
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = ticks.len(), %instrument_id, "Decoded REST trades");
        Ok(ticks)
    }

    /// Decode a `GET /api/v3/klines` response into bars of `bar_type`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array of arrays or any
    /// element fails to translate. No partial result is returned.
    pub fn decode_rest_klines(
        &self,
        text: &str,
        bar_type: &BarType,
        ts_init: UnixNanos,
    ) -> Result<Vec<Bar>, CodecError> {
        let raw_array: Vec<Value> = serde_json::from_str(text.trim())?;

        let bars = raw_array
            .into_iter()
            .map(|value| {
                let values = match value {
                    Value::Array(values) => values,
                    other => {
                        return Err(CodecError::InvalidFormat(format!(
                            "kline element is not an array: {other}"
                        )));
                    }
                };
                let kline = RestKline::from_values(&values)?;
                Ok(self.translator.bar_rest(bar_type, &kline, ts_init)?)
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = bars.len(), %bar_type, "Decoded REST klines");
        Ok(bars)
    }

    /// Symbol from the message's `s` key, else from the stream name prefix
    /// (`btcusdt@depth` gives `BTCUSDT`).
    fn resolve_instrument(
        &self,
        payload: &Value,
        stream: Option<&str>,
        kind: &'static str,
    ) -> Result<InstrumentId, CodecError> {
        if let Some(symbol) = payload.get("s").and_then(Value::as_str) {
            return Ok(self.translator.instrument_id(symbol));
        }

        stream
            .and_then(|name| name.split_once('@').map(|(symbol, _)| symbol))
            .filter(|symbol| !symbol.is_empty())
            .map(|symbol| self.translator.instrument_id(symbol))
            .ok_or_else(|| NormalizeError::missing(kind, "s").into())
    }
}

/// Split a combined-stream envelope into its stream name and payload.
fn unwrap_envelope(value: Value) -> Result<(Option<String>, Value), CodecError> {
    let Value::Object(mut object) = value else {
        return Err(CodecError::InvalidFormat(
            "expected a JSON object".to_string(),
        ));
    };

    let is_envelope = matches!(object.get("stream"), Some(Value::String(_)))
        && matches!(object.get("data"), Some(Value::Object(_)));

    if is_envelope {
        let stream = object
            .remove("stream")
            .and_then(|v| v.as_str().map(str::to_string));
        let data = object.remove("data").unwrap_or(Value::Null);
        return Ok((stream, data));
    }

    Ok((None, Value::Object(object)))
}
