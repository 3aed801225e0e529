//! Shared Value Objects
//!
//! Immutable domain types used by every translator.
//! Value objects are compared by value, not identity.

mod decimal;
mod identifiers;
mod timestamp;

pub use decimal::{NumericLiteral, Price, Quantity, parse_decimal};
pub use identifiers::{IdentifierError, InstrumentId, Symbol, TradeId, Venue};
pub use timestamp::{NANOSECONDS_IN_MILLISECOND, TimestampPolicy, UnixNanos};
