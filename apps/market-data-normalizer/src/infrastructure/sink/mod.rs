//! JSON Lines Sink Adapter
//!
//! Implements [`MarketDataSink`] by writing one JSON object per record to
//! any [`std::io::Write`]. The record kind is carried in a `type` field:
//!
//! ```json
//! {"type":"trade","instrument_id":{"symbol":"BTCUSDT","venue":"BINANCE"},...}
//! ```

use std::io::Write;

use crate::application::ports::{MarketDataSink, SinkError};
use crate::domain::market_data::MarketDataEvent;

/// Writes canonical records as newline-delimited JSON.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MarketDataSink for JsonLinesSink<W> {
    fn publish(&mut self, event: &MarketDataEvent) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, event).map_err(|e| {
            if e.is_io() {
                SinkError::Io(e.into())
            } else {
                SinkError::Serialization {
                    message: e.to_string(),
                }
            }
        })?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(self.writer.flush()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::binance::StreamCodec;
    use crate::domain::shared::UnixNanos;
    use serde_json::Value;

    #[test]
    fn writes_one_line_per_record() {
        let codec = StreamCodec::default();
        let trade = codec
            .decode(
                r#"{"e":"trade","s":"BTCUSDT","t":42,"p":"100.5","q":"0.01","T":2000,"m":true}"#,
                UnixNanos::new(5000),
            )
            .unwrap();

        let mut sink = JsonLinesSink::new(Vec::new());
        sink.publish(&trade).unwrap();
        sink.publish(&trade).unwrap();
        sink.flush().unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let record: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(record["type"], "trade");
        assert_eq!(record["price"], "100.5");
        assert_eq!(record["size"], "0.01");
        assert_eq!(record["trade_id"], "42");
        assert_eq!(record["aggressor_side"], "SELL");
        assert_eq!(record["ts_event"], 2_000_000_000_u64);
        assert_eq!(record["ts_init"], 5000);
    }

    #[test]
    fn written_record_parses_back() {
        let codec = StreamCodec::default();
        let event = codec
            .decode(
                r#"{"e":"depthUpdate","E":1000,"s":"BTCUSDT","b":[["10.0","1.0"]],"a":[]}"#,
                UnixNanos::new(1),
            )
            .unwrap();

        let mut sink = JsonLinesSink::new(Vec::new());
        sink.publish(&event).unwrap();

        let output = sink.into_inner();
        let parsed: MarketDataEvent = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed, event);
    }
}
