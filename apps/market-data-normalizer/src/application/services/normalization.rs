//! Normalization Service
//!
//! Feeds raw venue messages through the stream codec and publishes the
//! resulting canonical records to a [`MarketDataSink`]. Per-message
//! failures are counted and reported back; design-time failures and sink
//! failures stop the service.

use thiserror::Error;

use crate::application::ports::{MarketDataSink, SinkError};
use crate::domain::market_data::MarketDataEvent;
use crate::domain::shared::{InstrumentId, UnixNanos};
use crate::infrastructure::binance::{CodecError, StreamCodec};

/// Errors that must stop the service.
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// The codec met a capability it cannot translate.
    #[error("fatal translation error: {0}")]
    Fatal(#[source] CodecError),

    /// The downstream sink failed.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Result of processing one message.
#[derive(Debug)]
pub enum Outcome {
    /// A record was published.
    Published {
        /// Record kind.
        kind: &'static str,
        /// Instrument of the record.
        instrument_id: InstrumentId,
    },
    /// The message was rejected and dropped.
    Rejected(CodecError),
    /// The message was blank and ignored.
    Skipped,
}

/// Running counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationStats {
    /// Records published.
    pub published: u64,
    /// Messages rejected.
    pub rejected: u64,
    /// Blank messages skipped.
    pub skipped: u64,
}

/// Decodes messages and publishes canonical records.
#[derive(Debug)]
pub struct NormalizationService<S> {
    codec: StreamCodec,
    sink: S,
    stats: NormalizationStats,
}

impl<S: MarketDataSink> NormalizationService<S> {
    /// Create a service around a codec and a sink.
    #[must_use]
    pub fn new(codec: StreamCodec, sink: S) -> Self {
        Self {
            codec,
            sink,
            stats: NormalizationStats::default(),
        }
    }

    /// Counters so far.
    #[must_use]
    pub const fn stats(&self) -> NormalizationStats {
        self.stats
    }

    /// Get the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the service and return the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Process one raw message stamped with `ts_init`.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizationError::Fatal`] for design-time translation
    /// errors and [`NormalizationError::Sink`] if publishing fails.
    /// Per-message errors are returned as [`Outcome::Rejected`].
    pub fn process(&mut self, text: &str, ts_init: UnixNanos) -> Result<Outcome, NormalizationError> {
        if text.trim().is_empty() {
            self.stats.skipped += 1;
            return Ok(Outcome::Skipped);
        }

        match self.codec.decode(text, ts_init) {
            Ok(event) => self.publish(&event),
            Err(e) if e.is_fatal() => Err(NormalizationError::Fatal(e)),
            Err(e) => {
                self.stats.rejected += 1;
                Ok(Outcome::Rejected(e))
            }
        }
    }

    /// Flush the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to flush.
    pub fn flush(&mut self) -> Result<(), NormalizationError> {
        Ok(self.sink.flush()?)
    }

    fn publish(&mut self, event: &MarketDataEvent) -> Result<Outcome, NormalizationError> {
        self.sink.publish(event)?;
        self.stats.published += 1;

        Ok(Outcome::Published {
            kind: event.kind(),
            instrument_id: event.instrument_id().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::InMemorySink;

    const TRADE: &str = r#"{"e":"trade","E":1,"s":"BTCUSDT","t":42,"p":"100.5","q":"0.01","T":2000,"m":true}"#;

    fn service() -> NormalizationService<InMemorySink> {
        NormalizationService::new(StreamCodec::default(), InMemorySink::new())
    }

    #[test]
    fn publishes_translated_record() {
        let mut service = service();

        let outcome = service.process(TRADE, UnixNanos::new(5)).unwrap();

        assert!(matches!(outcome, Outcome::Published { kind: "trade", .. }));
        assert_eq!(service.sink().events().len(), 1);
        assert_eq!(service.stats().published, 1);
    }

    #[test]
    fn rejected_message_is_counted_and_not_published() {
        let mut service = service();

        let outcome = service
            .process(r#"{"e":"depthUpdate","E":1,"s":"BTCUSDT","a":[]}"#, UnixNanos::new(5))
            .unwrap();

        assert!(matches!(outcome, Outcome::Rejected(_)));
        assert!(service.sink().events().is_empty());
        assert_eq!(
            service.stats(),
            NormalizationStats {
                published: 0,
                rejected: 1,
                skipped: 0
            }
        );
    }

    #[test]
    fn blank_line_is_skipped() {
        let mut service = service();
        assert!(matches!(service.process("   ", UnixNanos::new(1)).unwrap(), Outcome::Skipped));
        assert_eq!(service.stats().skipped, 1);
    }

    #[test]
    fn design_time_error_stops_service() {
        let mut service = service();
        let text = r#"{"e":"kline","E":1,"s":"BTCUSDT","k":{"s":"BTCUSDT","i":"1w",
            "o":"1","c":"1","h":"1","l":"1","v":"1","n":1,"q":"1","V":"1","Q":"1"}}"#;

        let err = service.process(text, UnixNanos::new(1)).unwrap_err();

        assert!(matches!(err, NormalizationError::Fatal(_)));
        assert!(service.sink().events().is_empty());
    }

    #[test]
    fn into_sink_returns_published_records() {
        let mut service = service();
        service.process(TRADE, UnixNanos::new(1)).unwrap();
        service.process(TRADE, UnixNanos::new(2)).unwrap();

        let sink = service.into_sink();
        assert_eq!(sink.events().len(), 2);
    }
}
