//! Order domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flashdeal_core::{OrderId, OrderStatus};

use super::CartItem;

/// A placed order.
///
/// `items` is a snapshot of the cart at placement time and `total` is
/// computed once from that snapshot; neither is ever recomputed, even if the
/// catalog's idea of a deal were to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Time-derived order ID.
    pub id: OrderId,
    /// Snapshot of the cart items at placement time.
    pub items: Vec<CartItem>,
    /// Sum of sale price times quantity over the snapshot.
    pub total: Decimal,
    /// Settlement status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total units across all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
