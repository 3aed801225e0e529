//! Nanosecond epoch timestamps and millisecond scaling.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::NormalizeError;

/// Nanoseconds in one millisecond.
pub const NANOSECONDS_IN_MILLISECOND: u64 = 1_000_000;

/// A UNIX epoch timestamp with nanosecond resolution.
///
/// Every canonical record carries two of these: `ts_event` (when the event
/// happened at the source) and `ts_init` (when this system observed it).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UnixNanos(u64);

impl UnixNanos {
    /// The epoch itself.
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from raw nanoseconds.
    #[must_use]
    pub const fn new(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Convert an exchange millisecond value with the default policy
    /// (only overflow of the nanosecond width is rejected).
    pub fn from_millis(millis: i64) -> Result<Self, NormalizeError> {
        TimestampPolicy::default().millis_to_nanos(millis)
    }

    /// Get the raw nanosecond count.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UnixNanos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UnixNanos {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<UnixNanos> for u64 {
    fn from(value: UnixNanos) -> Self {
        value.0
    }
}

/// Accepted range for millisecond timestamps taken from wire data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestampPolicy {
    /// Largest accepted millisecond value (`None` = bounded only by overflow).
    pub max_millis: Option<u64>,
}

impl TimestampPolicy {
    /// Create a policy with an explicit upper bound.
    #[must_use]
    pub const fn bounded(max_millis: u64) -> Self {
        Self {
            max_millis: Some(max_millis),
        }
    }

    /// Scale a millisecond epoch value to nanoseconds using integer math.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidTimestamp`] for negative values,
    /// values above `max_millis`, and values whose nanosecond form overflows `u64`.
    pub fn millis_to_nanos(&self, millis: i64) -> Result<UnixNanos, NormalizeError> {
        let Ok(unsigned) = u64::try_from(millis) else {
            return Err(NormalizeError::InvalidTimestamp {
                value: millis,
                reason: "negative epoch value".to_string(),
            });
        };

        if let Some(max) = self.max_millis
            && unsigned > max
        {
            return Err(NormalizeError::InvalidTimestamp {
                value: millis,
                reason: format!("exceeds configured bound of {max} ms"),
            });
        }

        unsigned
            .checked_mul(NANOSECONDS_IN_MILLISECOND)
            .map(UnixNanos)
            .ok_or_else(|| NormalizeError::InvalidTimestamp {
                value: millis,
                reason: "overflows nanosecond range".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_maps_to_zero() {
        assert_eq!(UnixNanos::from_millis(0).unwrap(), UnixNanos::ZERO);
    }

    #[test]
    fn scales_exactly() {
        assert_eq!(
            UnixNanos::from_millis(1_000).unwrap(),
            UnixNanos::new(1_000_000_000)
        );
        assert_eq!(
            UnixNanos::from_millis(1_499_865_549_590).unwrap().as_u64(),
            1_499_865_549_590_000_000
        );
    }

    #[test]
    fn rejects_negative() {
        let err = UnixNanos::from_millis(-1).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidTimestamp { value: -1, .. }));
    }

    #[test]
    fn rejects_overflow() {
        let err = UnixNanos::from_millis(i64::MAX).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidTimestamp { .. }));
    }

    #[test]
    fn largest_representable_value_is_accepted() {
        let max = i64::try_from(u64::MAX / NANOSECONDS_IN_MILLISECOND).unwrap();
        assert!(UnixNanos::from_millis(max).is_ok());
        assert!(UnixNanos::from_millis(max + 1).is_err());
    }

    #[test]
    fn bounded_policy() {
        let policy = TimestampPolicy::bounded(10_000);
        assert!(policy.millis_to_nanos(10_000).is_ok());
        assert!(policy.millis_to_nanos(10_001).is_err());
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&UnixNanos::new(5000)).unwrap();
        assert_eq!(json, "5000");
    }

    proptest! {
        #[test]
        fn scaling_is_monotonic(a in 0i64..=18_446_744_073_709, b in 0i64..=18_446_744_073_709) {
            prop_assume!(a < b);
            let na = UnixNanos::from_millis(a).unwrap();
            let nb = UnixNanos::from_millis(b).unwrap();
            prop_assert!(na < nb);
        }

        #[test]
        fn scaling_is_exact(ms in 0i64..=18_446_744_073_709) {
            let nanos = UnixNanos::from_millis(ms).unwrap().as_u64();
            prop_assert_eq!(nanos / NANOSECONDS_IN_MILLISECOND, ms.unsigned_abs());
            prop_assert_eq!(nanos % NANOSECONDS_IN_MILLISECOND, 0);
        }
    }
}
