//! Enumerations shared by the canonical market data records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a book level or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    /// Bid side.
    Buy,
    /// Ask side.
    Sell,
}

/// Side of the taker that crossed the spread in a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggressorSide {
    /// A buyer lifted the offer.
    Buy,
    /// A seller hit the bid.
    Sell,
}

impl AggressorSide {
    /// The aggressor is the taker, so a buyer-side maker means a selling aggressor.
    #[must_use]
    pub const fn from_buyer_is_maker(buyer_is_maker: bool) -> Self {
        if buyer_is_maker { Self::Sell } else { Self::Buy }
    }
}

/// What a book delta does to its price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookAction {
    /// Insert or replace the level (size > 0).
    Upsert,
    /// Remove the level entirely (size == 0).
    Remove,
}

/// Granularity of an order book feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookType {
    /// Level 2, market-by-price: one aggregated size per price level.
    #[serde(rename = "L2_MBP")]
    L2Mbp,
}

/// Calendar unit of a bar interval.
///
/// Each variant owns exactly one wire unit code; adding a unit means adding a
/// variant here and an arm to both matches below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BarAggregation {
    /// Minute bars (`m`).
    Minute,
    /// Hour bars (`h`).
    Hour,
    /// Day bars (`d`).
    Day,
}

impl BarAggregation {
    /// Map a wire unit code to an aggregation unit.
    #[must_use]
    pub fn from_unit_code(code: &str) -> Option<Self> {
        match code {
            "m" => Some(Self::Minute),
            "h" => Some(Self::Hour),
            "d" => Some(Self::Day),
            _ => None,
        }
    }

    /// The wire unit code for this aggregation.
    #[must_use]
    pub const fn unit_code(&self) -> &'static str {
        match self {
            Self::Minute => "m",
            Self::Hour => "h",
            Self::Day => "d",
        }
    }

    /// Get the aggregation name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "MINUTE",
            Self::Hour => "HOUR",
            Self::Day => "DAY",
        }
    }
}

impl fmt::Display for BarAggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price a bar is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriceType {
    /// Last traded price.
    Last,
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Last => f.write_str("LAST"),
        }
    }
}

/// Where a bar was aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregationSource {
    /// Pre-aggregated by the venue.
    External,
    /// Built by this system from ticks.
    Internal,
}

impl fmt::Display for AggregationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External => f.write_str("EXTERNAL"),
            Self::Internal => f.write_str("INTERNAL"),
        }
    }
}

/// Origin of a record's `ts_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampSource {
    /// Taken from an event time carried in the wire message.
    Exchange,
    /// The wire format carries no event time; `ts_event` is a copy of `ts_init`.
    Local,
}

impl TimestampSource {
    /// Returns true if `ts_event` is only an approximation.
    #[must_use]
    pub const fn is_approximate(&self) -> bool {
        matches!(self, Self::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(true, AggressorSide::Sell ; "buyer is maker")]
    #[test_case(false, AggressorSide::Buy ; "seller is maker")]
    fn aggressor_is_the_taker(buyer_is_maker: bool, expected: AggressorSide) {
        assert_eq!(AggressorSide::from_buyer_is_maker(buyer_is_maker), expected);
    }

    #[test]
    fn unit_codes_round_trip() {
        for aggregation in [BarAggregation::Minute, BarAggregation::Hour, BarAggregation::Day] {
            assert_eq!(
                BarAggregation::from_unit_code(aggregation.unit_code()),
                Some(aggregation)
            );
        }
    }

    #[test_case("w" ; "week")]
    #[test_case("M" ; "month")]
    #[test_case("s" ; "second")]
    #[test_case("" ; "empty")]
    fn unknown_unit_codes(code: &str) {
        assert_eq!(BarAggregation::from_unit_code(code), None);
    }

    #[test]
    fn book_type_wire_name() {
        assert_eq!(serde_json::to_string(&BookType::L2Mbp).unwrap(), r#""L2_MBP""#);
    }

    #[test]
    fn local_timestamps_are_approximate() {
        assert!(TimestampSource::Local.is_approximate());
        assert!(!TimestampSource::Exchange.is_approximate());
    }
}
