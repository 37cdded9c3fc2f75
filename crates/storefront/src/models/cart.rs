//! Cart item domain type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Deal;

/// A deal in the cart with a quantity counter.
///
/// Identity is the underlying deal ID; the store merges duplicate adds into
/// one item by incrementing `quantity`, so at most one item per deal exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// The deal being purchased.
    pub deal: Deal,
    /// Number of units, always >= 1.
    pub quantity: u32,
}

impl CartItem {
    /// Create a cart item for a single unit of `deal`.
    #[must_use]
    pub const fn single(deal: Deal) -> Self {
        Self { deal, quantity: 1 }
    }

    /// Sale price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.deal.price.sale * Decimal::from(self.quantity)
    }
}
