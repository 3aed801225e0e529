//! Translation Property Tests
//!
//! Laws that must hold for every valid input, checked with proptest.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use market_data_normalizer::infrastructure::binance::{DepthUpdateMessage, WireMessage};
use market_data_normalizer::{
    AggressorSide, BinanceTranslator, BookAction, CodecError, InstrumentId, MarketDataEvent,
    NormalizeError, OrderSide, Price, Quantity, StreamCodec, TimestampPolicy, UnixNanos,
};

/// A `(price, size)` level with a positive price and a size that is zero
/// about a quarter of the time.
fn level() -> impl Strategy<Value = (String, String)> {
    let price = (1i64..=10_000_000, 0u32..=8).prop_map(|(m, s)| Decimal::new(m, s).to_string());
    let size = prop_oneof![
        1 => (0u32..=8).prop_map(|s| Decimal::new(0, s).to_string()),
        3 => (1i64..=1_000_000_000, 0u32..=8).prop_map(|(m, s)| Decimal::new(m, s).to_string()),
    ];
    (price, size)
}

fn levels_json(levels: &[(String, String)]) -> Value {
    Value::Array(
        levels
            .iter()
            .map(|(p, s)| json!([p, s]))
            .collect(),
    )
}

proptest! {
    #[test]
    fn depth_batch_preserves_count_order_and_action(
        bids in prop::collection::vec(level(), 0..20),
        asks in prop::collection::vec(level(), 0..20),
        event_ms in 0i64..=4_102_444_800_000,
        ts_init in any::<u64>(),
    ) {
        let msg = DepthUpdateMessage::from_value(json!({
            "E": event_ms,
            "b": levels_json(&bids),
            "a": levels_json(&asks),
        }))
        .unwrap();
        let instrument_id: InstrumentId = "BTCUSDT.BINANCE".parse().unwrap();

        let batch = BinanceTranslator::default()
            .order_book_deltas(&msg, &instrument_id, UnixNanos::new(ts_init))
            .unwrap();

        prop_assert_eq!(batch.len(), bids.len() + asks.len());

        let (bid_deltas, ask_deltas) = batch.deltas.split_at(bids.len());
        prop_assert!(bid_deltas.iter().all(|d| d.side == OrderSide::Buy));
        prop_assert!(ask_deltas.iter().all(|d| d.side == OrderSide::Sell));

        let wire = bids.iter().chain(asks.iter());
        for (delta, (price, size)) in batch.deltas.iter().zip(wire) {
            prop_assert_eq!(delta.price, price.parse::<Price>().unwrap());
            prop_assert_eq!(delta.size, size.parse::<Quantity>().unwrap());
            prop_assert_eq!(delta.action == BookAction::Remove, delta.size.is_zero());
            prop_assert_eq!(delta.ts_event, batch.ts_event);
            prop_assert_eq!(delta.ts_init, UnixNanos::new(ts_init));
        }

        prop_assert_eq!(batch.ts_event.as_u64(), u64::try_from(event_ms).unwrap() * 1_000_000);
    }

    #[test]
    fn wire_literals_survive_translation_exactly(
        mantissa in 0i64..=i64::MAX,
        scale in 0u32..=18,
    ) {
        let literal = Decimal::new(mantissa, scale).to_string();
        let text = json!({
            "e": "trade", "s": "BTCUSDT", "t": 1,
            "p": literal, "q": literal, "T": 1, "m": false
        })
        .to_string();

        let event = StreamCodec::default().decode(&text, UnixNanos::new(1)).unwrap();
        let MarketDataEvent::Trade(tick) = event else {
            panic!("expected trade");
        };

        prop_assert_eq!(tick.price.to_string(), literal.clone());
        prop_assert_eq!(tick.size.to_string(), literal);
    }

    #[test]
    fn bare_integer_literals_survive_translation_exactly(price in any::<u64>(), size in any::<u64>()) {
        let text = format!(
            r#"{{"e":"trade","s":"BTCUSDT","t":1,"p":{price},"q":{size},"T":1,"m":false}}"#
        );

        let event = StreamCodec::default().decode(&text, UnixNanos::new(1)).unwrap();
        let MarketDataEvent::Trade(tick) = event else {
            panic!("expected trade");
        };

        prop_assert_eq!(tick.price.to_string(), price.to_string());
        prop_assert_eq!(tick.size.to_string(), size.to_string());
    }

    #[test]
    fn bare_fractional_literals_are_rejected(
        mantissa in 0i64..=i64::MAX,
        scale in 1u32..=18,
        on_price in any::<bool>(),
    ) {
        let literal = Decimal::new(mantissa, scale).to_string();
        let (price, size) = if on_price { (literal.as_str(), r#""1""#) } else { (r#""1""#, literal.as_str()) };
        let text = format!(
            r#"{{"e":"trade","s":"BTCUSDT","t":1,"p":{price},"q":{size},"T":1,"m":false}}"#
        );

        let err = StreamCodec::default().decode(&text, UnixNanos::new(1)).unwrap_err();

        prop_assert!(
            matches!(err, CodecError::Normalize(NormalizeError::InvalidNumericLiteral { .. })),
            "{literal}: {err:?}"
        );
    }

    #[test]
    fn event_time_scaling_is_monotonic(a in 0i64..=1_000_000_000_000, b in 0i64..=1_000_000_000_000) {
        let policy = TimestampPolicy::default();
        let (na, nb) = (policy.millis_to_nanos(a).unwrap(), policy.millis_to_nanos(b).unwrap());

        prop_assert_eq!(a.cmp(&b), na.cmp(&nb));
    }

    #[test]
    fn aggressor_follows_maker_flag(buyer_is_maker in any::<bool>()) {
        let text = json!({
            "e": "trade", "s": "BTCUSDT", "t": 7, "p": "1", "q": "1", "T": 1,
            "m": buyer_is_maker
        })
        .to_string();

        let event = StreamCodec::default().decode(&text, UnixNanos::new(1)).unwrap();
        let MarketDataEvent::Trade(tick) = event else {
            panic!("expected trade");
        };

        let expected = if buyer_is_maker { AggressorSide::Sell } else { AggressorSide::Buy };
        prop_assert_eq!(tick.aggressor_side, expected);
    }

    #[test]
    fn translation_is_deterministic(
        bids in prop::collection::vec(level(), 0..5),
        ts_init in any::<u64>(),
    ) {
        let text = json!({"e": "depthUpdate", "E": 1, "s": "BTCUSDT", "b": levels_json(&bids), "a": []})
            .to_string();
        let codec = StreamCodec::default();

        let first = codec.decode(&text, UnixNanos::new(ts_init)).unwrap();
        let second = codec.decode(&text, UnixNanos::new(ts_init)).unwrap();

        prop_assert_eq!(first, second);
    }
}

#[test]
fn zero_millis_maps_to_zero_nanos() {
    assert_eq!(TimestampPolicy::default().millis_to_nanos(0).unwrap(), UnixNanos::ZERO);
}

#[test]
fn tiny_fraction_is_kept() {
    let price: Price = "0.00000001".parse().unwrap();
    assert_eq!(price.to_string(), "0.00000001");
}
