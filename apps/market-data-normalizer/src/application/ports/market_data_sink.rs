//! Market Data Sink Port (Driven Port)
//!
//! Interface for handing canonical records to a downstream consumer
//! (a bus, a queue, an order book builder, a file).

use crate::domain::market_data::MarketDataEvent;

/// Sink error.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Record could not be serialized.
    #[error("market data serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// Underlying writer failed.
    #[error("market data sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for publishing canonical market data records.
pub trait MarketDataSink {
    /// Publish one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be delivered.
    fn publish(&mut self, event: &MarketDataEvent) -> Result<(), SinkError>;

    /// Flush buffered records.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// In-memory sink for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    events: Vec<MarketDataEvent>,
}

impl InMemorySink {
    /// Create an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Records published so far, in order.
    #[must_use]
    pub fn events(&self) -> &[MarketDataEvent] {
        &self.events
    }

    /// Take the published records, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<MarketDataEvent> {
        std::mem::take(&mut self.events)
    }
}

impl MarketDataSink for InMemorySink {
    fn publish(&mut self, event: &MarketDataEvent) -> Result<(), SinkError> {
        self.events.push(event.clone());
        Ok(())
    }
}

impl<S: MarketDataSink + ?Sized> MarketDataSink for &mut S {
    fn publish(&mut self, event: &MarketDataEvent) -> Result<(), SinkError> {
        (**self).publish(event)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::{QuoteTick, TimestampSource};
    use crate::domain::shared::{InstrumentId, Price, Quantity, UnixNanos};

    fn quote(ts: u64) -> MarketDataEvent {
        MarketDataEvent::Quote(QuoteTick {
            instrument_id: "BTCUSDT.BINANCE".parse::<InstrumentId>().unwrap(),
            bid_price: "1.0".parse::<Price>().unwrap(),
            ask_price: "1.1".parse::<Price>().unwrap(),
            bid_size: "2".parse::<Quantity>().unwrap(),
            ask_size: "3".parse::<Quantity>().unwrap(),
            ts_event: UnixNanos::new(ts),
            ts_event_source: TimestampSource::Local,
            ts_init: UnixNanos::new(ts),
        })
    }

    #[test]
    fn in_memory_sink_keeps_order() {
        let mut sink = InMemorySink::new();
        sink.publish(&quote(1)).unwrap();
        sink.publish(&quote(2)).unwrap();

        let ts: Vec<_> = sink.events().iter().map(MarketDataEvent::ts_init).collect();
        assert_eq!(ts, vec![UnixNanos::new(1), UnixNanos::new(2)]);
    }

    #[test]
    fn drain_empties_sink() {
        let mut sink = InMemorySink::new();
        sink.publish(&quote(1)).unwrap();

        assert_eq!(sink.drain().len(), 1);
        assert!(sink.events().is_empty());
        assert!(sink.flush().is_ok());
    }
}
