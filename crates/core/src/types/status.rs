//! Status enums for deals, inventory, and orders.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a flash deal.
///
/// Seed data tags each deal with a status; the catalog never rederives it
/// from the start/end timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    /// Deal has not started yet.
    Upcoming,
    /// Deal is live and purchasable.
    Active,
    /// Deal sold through before its end time.
    #[serde(rename = "soldout")]
    SoldOut,
    /// Deal window has closed.
    Ended,
}

impl DealStatus {
    /// Whether buy/add-to-cart actions are available.
    #[must_use]
    pub const fn is_purchasable(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Coarse inventory bucket for a deal.
///
/// Presentation-level only; there are no real stock counts behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryLevel {
    High,
    Mid,
    Low,
}

/// Lifecycle status of a placed order.
///
/// Orders are created `Processing` and flipped to `Confirmed` by a deferred
/// task. `Failed` exists in the model but no code path produces it; the mock
/// settlement never declines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Processing,
    Confirmed,
    Failed,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_is_purchasable() {
        assert!(DealStatus::Active.is_purchasable());
        assert!(!DealStatus::Upcoming.is_purchasable());
        assert!(!DealStatus::SoldOut.is_purchasable());
        assert!(!DealStatus::Ended.is_purchasable());
    }

    #[test]
    fn test_deal_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&DealStatus::SoldOut).unwrap(),
            "\"soldout\""
        );
        assert_eq!(
            serde_json::from_str::<DealStatus>("\"upcoming\"").unwrap(),
            DealStatus::Upcoming
        );
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Processing);
    }
}
