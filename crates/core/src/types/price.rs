//! Deal pricing with decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pricing for a flash deal.
///
/// The discount `rate` is seed data carried for display. It is not
/// recomputed from `original` and `sale` at read time; the seed values
/// occasionally round differently than a fresh computation would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealPrice {
    /// Price before the deal, in USD.
    pub original: Decimal,
    /// Deal price, in USD.
    pub sale: Decimal,
    /// Advertised discount percentage (0-100).
    pub rate: u8,
}

impl DealPrice {
    /// Create a new deal price.
    #[must_use]
    pub const fn new(original: Decimal, sale: Decimal, rate: u8) -> Self {
        Self {
            original,
            sale,
            rate,
        }
    }

    /// Whether the discount is steep enough to badge on deal cards.
    #[must_use]
    pub const fn is_hot(&self) -> bool {
        self.rate >= 50
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hot_threshold() {
        let half_off = DealPrice::new(Decimal::from(100), Decimal::from(50), 50);
        assert!(half_off.is_hot());

        let modest = DealPrice::new(Decimal::from(100), Decimal::from(60), 40);
        assert!(!modest.is_hot());
    }

    #[test]
    fn test_rate_is_not_recomputed() {
        // Seed data ships rate = 44 for 799 -> 449 even though a fresh
        // computation rounds to 43.8%. The struct carries it verbatim.
        let price = DealPrice::new(Decimal::from(799), Decimal::from(449), 44);
        assert_eq!(price.rate, 44);
    }
}
