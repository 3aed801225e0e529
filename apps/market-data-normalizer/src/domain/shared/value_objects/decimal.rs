//! Exact decimal prices and quantities parsed from wire literals.
//!
//! Venues send prices and sizes as JSON strings (`"0.00000001"`), which are
//! parsed straight into [`Decimal`] from their textual form, never through
//! `f64`. Any literal that would need rounding to fit is rejected instead.
//!
//! Bare JSON integers within `i64`/`u64` are accepted. Bare fractional or
//! out-of-range numbers are rejected: `serde_json` has already stored them as
//! `f64`, so their wire text is gone.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::NormalizeError;

/// Largest fractional scale a [`Decimal`] can hold.
const MAX_SCALE: u32 = 28;

/// A numeric value exactly as it appeared on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericLiteral {
    /// String-encoded number (the usual encoding for prices and sizes).
    Text(String),
    /// Bare JSON number.
    Number(serde_json::Number),
    /// Any other JSON value; always rejected when parsed.
    Other(serde_json::Value),
}

impl NumericLiteral {
    /// Parse into an exact decimal.
    pub fn to_decimal(&self) -> Result<Decimal, NormalizeError> {
        match self {
            Self::Text(text) => parse_decimal(text),
            Self::Number(number) if number.is_f64() => Err(NormalizeError::InvalidNumericLiteral {
                literal: number.to_string(),
                reason: "bare fractional or out-of-range number is not exactly representable"
                    .to_string(),
            }),
            Self::Number(number) => parse_decimal(&number.to_string()),
            Self::Other(value) => Err(NormalizeError::InvalidNumericLiteral {
                literal: value.to_string(),
                reason: "expected a string or number".to_string(),
            }),
        }
    }
}

impl From<&str> for NumericLiteral {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NumericLiteral {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for NumericLiteral {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// Parse a decimal literal without loss of precision.
///
/// Accepts plain (`"100.5"`) and scientific (`"1e-8"`) notation.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidNumericLiteral`] for empty input,
/// non-numeric content, or values that do not fit a 96-bit mantissa with at
/// most 28 fractional digits.
pub fn parse_decimal(literal: &str) -> Result<Decimal, NormalizeError> {
    let invalid = |reason: &str| NormalizeError::InvalidNumericLiteral {
        literal: literal.to_string(),
        reason: reason.to_string(),
    };

    if literal.is_empty() {
        return Err(invalid("empty literal"));
    }
    if !is_well_formed(literal) {
        return Err(invalid("not a decimal literal"));
    }

    match literal.split_once(['e', 'E']) {
        None => Decimal::from_str_exact(literal).map_err(|e| invalid(&e.to_string())),
        Some((mantissa, exponent)) => {
            let mantissa = Decimal::from_str_exact(mantissa).map_err(|e| invalid(&e.to_string()))?;
            let exponent: i32 = exponent
                .parse()
                .map_err(|_| invalid("malformed exponent"))?;
            apply_exponent(mantissa, exponent).ok_or_else(|| invalid("exceeds decimal precision"))
        }
    }
}

/// Checks `[+-]digits[.digits][(e|E)[+-]digits]`, with at least one mantissa
/// digit. `Decimal::from_str_exact` alone also accepts `_` separators.
fn is_well_formed(literal: &str) -> bool {
    let bytes = literal.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let mut digits = 0usize;
    let mut seen_point = false;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        i += 1;
    }
    if digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i == start {
            return false;
        }
    }

    i == bytes.len()
}

fn apply_exponent(mut value: Decimal, exponent: i32) -> Option<Decimal> {
    if exponent < 0 {
        let scale = value.scale().checked_add(exponent.unsigned_abs())?;
        if scale > MAX_SCALE {
            return None;
        }
        value.set_scale(scale).ok()?;
        return Some(value);
    }

    if value.is_zero() {
        return Some(value);
    }
    if exponent > 2 * MAX_SCALE as i32 {
        return None;
    }
    for _ in 0..exponent {
        value = value.checked_mul(Decimal::TEN)?;
    }
    Some(value)
}

/// An exact price. May be negative (spreads, price changes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parse a price from a wire literal.
    pub fn from_literal(literal: &NumericLiteral) -> Result<Self, NormalizeError> {
        literal.to_decimal().map(Self)
    }

    /// Get the inner decimal.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Price {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s).map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// An exact, non-negative size or volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    /// Zero quantity.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a quantity from a decimal.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidNumericLiteral`] if the value is negative.
    pub fn new(value: Decimal) -> Result<Self, NormalizeError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(NormalizeError::InvalidNumericLiteral {
                literal: value.to_string(),
                reason: "quantity cannot be negative".to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Parse a quantity from a wire literal.
    pub fn from_literal(literal: &NumericLiteral) -> Result<Self, NormalizeError> {
        Self::new(literal.to_decimal()?)
    }

    /// Get the inner decimal.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns true if this quantity is exactly zero (at any scale).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if this quantity is greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl FromStr for Quantity {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_decimal(s)?)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = NormalizeError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("0.00000001", Decimal::new(1, 8) ; "smallest satoshi")]
    #[test_case("100.5", Decimal::new(1005, 1) ; "simple fraction")]
    #[test_case("4.00000100", Decimal::new(400_000_100, 8) ; "trailing zeros")]
    #[test_case("-0.75", Decimal::new(-75, 2) ; "negative")]
    #[test_case("42", Decimal::new(42, 0) ; "integer")]
    #[test_case("1e-8", Decimal::new(1, 8) ; "scientific negative exponent")]
    #[test_case("2.5E3", Decimal::new(2500, 0) ; "scientific positive exponent")]
    fn parses_exactly(literal: &str, expected: Decimal) {
        assert_eq!(parse_decimal(literal).unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("abc" ; "letters")]
    #[test_case("1.2.3" ; "two points")]
    #[test_case("1e" ; "dangling exponent")]
    #[test_case("1e-40" ; "too many fractional digits")]
    #[test_case("0.00000000000000000000000000001" ; "29 fractional digits")]
    #[test_case("99999999999999999999999999999999" ; "mantissa overflow")]
    #[test_case("1_000" ; "digit separator")]
    #[test_case("1_0.5" ; "separator before point")]
    #[test_case("1e_3" ; "separator in exponent")]
    #[test_case("." ; "lone point")]
    #[test_case("-" ; "lone sign")]
    #[test_case(" 1" ; "leading space")]
    #[test_case("0x10" ; "hex")]
    fn rejects(literal: &str) {
        let err = parse_decimal(literal).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidNumericLiteral { .. }), "{literal}");
    }

    #[test]
    fn trailing_zeros_are_preserved() {
        assert_eq!(parse_decimal("1.00000000").unwrap().to_string(), "1.00000000");
    }

    #[test]
    fn literal_from_json_string_and_number() {
        let text: NumericLiteral = serde_json::from_str(r#""0.01""#).unwrap();
        let number: NumericLiteral = serde_json::from_str("308").unwrap();
        assert_eq!(text.to_decimal().unwrap(), Decimal::new(1, 2));
        assert_eq!(number.to_decimal().unwrap(), Decimal::new(308, 0));
    }

    #[test]
    fn signed_and_point_edge_forms_parse() {
        assert_eq!(parse_decimal("+1.5").unwrap(), Decimal::new(15, 1));
        assert_eq!(parse_decimal("2.5e+1").unwrap(), Decimal::new(25, 0));
    }

    #[test_case("0.12345678901234567891" ; "more than 17 significant digits")]
    #[test_case("123456789012345678901234" ; "integer beyond u64")]
    #[test_case("100.5" ; "short fraction")]
    #[test_case("1e-8" ; "scientific")]
    fn bare_fractional_or_wide_number_is_rejected(json: &str) {
        let literal: NumericLiteral = serde_json::from_str(json).unwrap();
        let err = literal.to_decimal().unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidNumericLiteral { .. }), "{json}");
    }

    #[test_case("0", Decimal::ZERO ; "zero")]
    #[test_case("-42", Decimal::new(-42, 0) ; "negative integer")]
    #[test_case("18446744073709551615", Decimal::from(u64::MAX) ; "u64 max")]
    fn bare_integer_number_is_exact(json: &str, expected: Decimal) {
        let literal: NumericLiteral = serde_json::from_str(json).unwrap();
        assert_eq!(literal.to_decimal().unwrap(), expected);
    }

    #[test]
    fn literal_of_wrong_type_is_rejected() {
        let literal: NumericLiteral = serde_json::from_str("true").unwrap();
        assert!(matches!(
            literal.to_decimal(),
            Err(NormalizeError::InvalidNumericLiteral { .. })
        ));
    }

    #[test]
    fn quantity_rejects_negative() {
        assert!("-1.0".parse::<Quantity>().is_err());
        assert!("-0".parse::<Quantity>().unwrap().is_zero());
    }

    #[test]
    fn quantity_zero_at_any_scale() {
        let q: Quantity = "0.00000000".parse().unwrap();
        assert!(q.is_zero());
        assert!(!q.is_positive());
    }

    #[test]
    fn quantity_deserialization_keeps_non_negative_invariant() {
        let q: Quantity = serde_json::from_str(r#""1.50""#).unwrap();
        assert_eq!(q.to_string(), "1.50");
        assert!(serde_json::from_str::<Quantity>(r#""-0.1""#).is_err());
        assert_eq!(serde_json::to_string(&q).unwrap(), r#""1.50""#);
    }

    #[test]
    fn price_serializes_as_string() {
        let price: Price = "10.0".parse().unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), r#""10.0""#);
    }

    proptest! {
        #[test]
        fn decimal_round_trip(mantissa in any::<i64>(), scale in 0u32..=18) {
            let literal = Decimal::new(mantissa, scale).to_string();
            let parsed = parse_decimal(&literal).unwrap();
            prop_assert_eq!(parsed.to_string(), literal);
        }
    }
}
