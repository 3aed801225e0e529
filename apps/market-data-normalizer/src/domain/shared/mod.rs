//! Shared Domain Types
//!
//! Value objects and errors shared by every translator.

pub mod errors;
pub mod value_objects;

pub use errors::{ErrorCategory, NormalizeError};
pub use value_objects::{
    IdentifierError, InstrumentId, NumericLiteral, Price, Quantity, Symbol, TimestampPolicy,
    TradeId, UnixNanos, Venue, parse_decimal,
};
