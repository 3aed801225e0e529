//! Binance Market Data Adapters
//!
//! Translates Binance spot market data into canonical records:
//!
//! - **messages**: typed wire schemas (WebSocket and REST)
//! - **parsing**: pure message-to-record translators
//! - **codec**: JSON text decoding and event-type dispatch

pub mod codec;
pub mod messages;
pub mod parsing;

pub use codec::{CodecError, StreamCodec};
pub use messages::*;
pub use parsing::BinanceTranslator;
