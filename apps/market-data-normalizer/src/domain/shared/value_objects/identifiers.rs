//! Venue, symbol and instrument identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error parsing an identifier from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The identifier was empty.
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    /// An instrument id had no `SYMBOL.VENUE` separator.
    #[error("instrument id {0:?} is missing the '.' venue separator")]
    MissingVenue(String),
}

macro_rules! define_code {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        ///
        /// Normalized to uppercase.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new code, normalized to uppercase.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into().to_uppercase())
            }

            /// Get the code string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

define_code!(Venue, "A trading venue (e.g. `BINANCE`).");
define_code!(Symbol, "A venue-local instrument symbol (e.g. `BTCUSDT`).");

/// A venue-qualified instrument identifier, rendered as `SYMBOL.VENUE`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstrumentId {
    /// Venue-local symbol.
    pub symbol: Symbol,
    /// Venue the symbol trades on.
    pub venue: Venue,
}

impl InstrumentId {
    /// Compose an instrument id from its parts.
    #[must_use]
    pub const fn new(symbol: Symbol, venue: Venue) -> Self {
        Self { symbol, venue }
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.symbol, self.venue)
    }
}

impl FromStr for InstrumentId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (symbol, venue) = s
            .rsplit_once('.')
            .ok_or_else(|| IdentifierError::MissingVenue(s.to_string()))?;
        if symbol.is_empty() {
            return Err(IdentifierError::Empty("symbol"));
        }
        if venue.is_empty() {
            return Err(IdentifierError::Empty("venue"));
        }
        Ok(Self::new(Symbol::new(symbol), Venue::new(venue)))
    }
}

/// Venue-assigned trade match id, carried as an opaque string so large
/// numeric ids never pass through a lossy numeric type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(String);

impl TradeId {
    /// Create a trade id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_uppercased() {
        assert_eq!(Symbol::new("btcusdt").as_str(), "BTCUSDT");
        assert_eq!(Venue::from("binance").as_str(), "BINANCE");
    }

    #[test]
    fn instrument_id_display() {
        let id = InstrumentId::new(Symbol::new("ETHUSDT"), Venue::new("BINANCE"));
        assert_eq!(id.to_string(), "ETHUSDT.BINANCE");
    }

    #[test]
    fn instrument_id_parse() {
        let id: InstrumentId = "BTCUSDT.BINANCE".parse().unwrap();
        assert_eq!(id.symbol, Symbol::new("BTCUSDT"));
        assert_eq!(id.venue, Venue::new("BINANCE"));
    }

    #[test]
    fn instrument_id_parse_uses_last_separator() {
        let id: InstrumentId = "BRK.B.NYSE".parse().unwrap();
        assert_eq!(id.symbol.as_str(), "BRK.B");
        assert_eq!(id.venue.as_str(), "NYSE");
    }

    #[test]
    fn instrument_id_parse_errors() {
        assert_eq!(
            "BTCUSDT".parse::<InstrumentId>(),
            Err(IdentifierError::MissingVenue("BTCUSDT".to_string()))
        );
        assert_eq!(
            ".BINANCE".parse::<InstrumentId>(),
            Err(IdentifierError::Empty("symbol"))
        );
        assert_eq!(
            "BTCUSDT.".parse::<InstrumentId>(),
            Err(IdentifierError::Empty("venue"))
        );
    }

    #[test]
    fn trade_id_is_opaque() {
        let id = TradeId::new("18446744073709551615");
        assert_eq!(id.as_str(), "18446744073709551615");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""18446744073709551615""#);
    }
}
