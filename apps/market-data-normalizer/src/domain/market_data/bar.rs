//! OHLCV bars and the bar type they belong to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

use super::enums::{AggregationSource, BarAggregation, PriceType};
use crate::domain::shared::{InstrumentId, NormalizeError, Price, Quantity, UnixNanos};

/// Step, unit and price basis that define how a bar is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarSpecification {
    /// Number of `aggregation` units per bar.
    pub step: NonZeroU32,
    /// Calendar unit.
    pub aggregation: BarAggregation,
    /// Price the bar is built from.
    pub price_type: PriceType,
}

impl BarSpecification {
    /// Create a specification.
    #[must_use]
    pub const fn new(step: NonZeroU32, aggregation: BarAggregation, price_type: PriceType) -> Self {
        Self {
            step,
            aggregation,
            price_type,
        }
    }

    /// Derive a last-price specification from a compact interval code such
    /// as `"1m"`, `"4h"` or `"15m"`.
    ///
    /// # Errors
    ///
    /// - [`NormalizeError::InvalidIntervalCode`] if there is no positive leading step.
    /// - [`NormalizeError::UnsupportedAggregationUnit`] if the trailing unit is not
    ///   one of `m`, `h`, `d`. This is a design-time error.
    pub fn from_interval(interval: &str) -> Result<Self, NormalizeError> {
        let split = interval
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(interval.len());
        let (digits, unit) = interval.split_at(split);

        let invalid = |reason: &str| NormalizeError::InvalidIntervalCode {
            interval: interval.to_string(),
            reason: reason.to_string(),
        };

        if digits.is_empty() {
            return Err(invalid("missing leading step"));
        }
        if unit.is_empty() {
            return Err(invalid("missing unit code"));
        }

        let step = digits
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| invalid("step must be a positive integer"))?;

        let aggregation = BarAggregation::from_unit_code(unit).ok_or_else(|| {
            NormalizeError::UnsupportedAggregationUnit {
                interval: interval.to_string(),
                unit: unit.to_string(),
            }
        })?;

        Ok(Self::new(step, aggregation, PriceType::Last))
    }

    /// Render back to the compact interval code.
    #[must_use]
    pub fn interval(&self) -> String {
        format!("{}{}", self.step, self.aggregation.unit_code())
    }
}

impl fmt::Display for BarSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.step, self.aggregation, self.price_type)
    }
}

/// Instrument, specification and source that together name a bar series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarType {
    /// Instrument the bars describe.
    pub instrument_id: InstrumentId,
    /// Aggregation rule.
    pub spec: BarSpecification,
    /// Who aggregated the bars.
    pub aggregation_source: AggregationSource,
}

impl BarType {
    /// Bar type for bars pre-aggregated by the venue.
    #[must_use]
    pub const fn external(instrument_id: InstrumentId, spec: BarSpecification) -> Self {
        Self {
            instrument_id,
            spec,
            aggregation_source: AggregationSource::External,
        }
    }
}

impl fmt::Display for BarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.instrument_id, self.spec, self.aggregation_source
        )
    }
}

/// One OHLCV bar with the venue's extended volume breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Series this bar belongs to.
    pub bar_type: BarType,
    /// Opening price.
    pub open: Price,
    /// Highest price.
    pub high: Price,
    /// Lowest price.
    pub low: Price,
    /// Closing (or latest) price.
    pub close: Price,
    /// Base asset volume.
    pub volume: Quantity,
    /// Quote asset volume.
    pub quote_volume: Quantity,
    /// Number of trades in the bar.
    pub count: u64,
    /// Base volume bought by takers.
    pub taker_buy_base_volume: Quantity,
    /// Quote volume bought by takers.
    pub taker_buy_quote_volume: Quantity,
    /// Event time at the venue.
    pub ts_event: UnixNanos,
    /// Local processing time.
    pub ts_init: UnixNanos,
}
