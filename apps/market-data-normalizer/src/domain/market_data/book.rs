//! Order book deltas.

use serde::{Deserialize, Serialize};

use super::enums::{BookAction, BookType, OrderSide};
use crate::domain::shared::{InstrumentId, Price, Quantity, UnixNanos};

/// A single change to one price level of an order book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookDelta {
    /// Instrument the book belongs to.
    pub instrument_id: InstrumentId,
    /// Book granularity.
    pub book_type: BookType,
    /// Bid (`Buy`) or ask (`Sell`) side.
    pub side: OrderSide,
    /// Upsert or remove. Always agrees with `size`.
    pub action: BookAction,
    /// Level price.
    pub price: Price,
    /// New aggregate size at the level (zero for removals).
    pub size: Quantity,
    /// Event time at the venue.
    pub ts_event: UnixNanos,
    /// Local processing time.
    pub ts_init: UnixNanos,
}

impl OrderBookDelta {
    /// Build a level-2 delta, deriving the action from the size.
    #[must_use]
    pub fn level(
        instrument_id: InstrumentId,
        side: OrderSide,
        price: Price,
        size: Quantity,
        ts_event: UnixNanos,
        ts_init: UnixNanos,
    ) -> Self {
        let action = if size.is_zero() {
            BookAction::Remove
        } else {
            BookAction::Upsert
        };

        Self {
            instrument_id,
            book_type: BookType::L2Mbp,
            side,
            action,
            price,
            size,
            ts_event,
            ts_init,
        }
    }
}

/// An ordered batch of deltas from one venue message.
///
/// Bid deltas come first, then ask deltas, each in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookDeltas {
    /// Instrument the book belongs to.
    pub instrument_id: InstrumentId,
    /// Book granularity.
    pub book_type: BookType,
    /// Deltas in application order.
    pub deltas: Vec<OrderBookDelta>,
    /// First venue update id covered by this batch, if the venue sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_update_id: Option<u64>,
    /// Final venue update id covered by this batch, if the venue sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_update_id: Option<u64>,
    /// Event time shared by every delta.
    pub ts_event: UnixNanos,
    /// Local processing time shared by every delta.
    pub ts_init: UnixNanos,
}

impl OrderBookDeltas {
    /// Number of deltas in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Returns true if the batch carries no deltas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Iterate over the deltas for one side, in wire order.
    pub fn side(&self, side: OrderSide) -> impl Iterator<Item = &OrderBookDelta> {
        self.deltas.iter().filter(move |delta| delta.side == side)
    }
}
