//! Flash deal domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flashdeal_core::{DealId, DealPrice, DealStatus, InventoryLevel};

/// A time-boxed discounted product.
///
/// Deals are static seed data, immutable for the process lifetime. The
/// status tag and the start/end window are seeded together; nothing
/// rederives one from the other at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    /// Unique deal ID.
    pub id: DealId,
    /// Product title.
    pub title: String,
    /// Short tagline shown under the title.
    pub subtitle: Option<String>,
    /// Product image URL.
    pub image: String,
    /// Original/sale pricing with the advertised discount rate.
    pub price: DealPrice,
    /// Lifecycle status tag.
    pub status: DealStatus,
    /// When the deal window opens.
    pub starts_at: DateTime<Utc>,
    /// When the deal window closes.
    pub ends_at: DateTime<Utc>,
    /// Coarse inventory bucket for the stock meter.
    pub inventory_level: InventoryLevel,
    /// Category name used by the catalog filter.
    pub category: String,
    /// Longer marketing copy for the detail page.
    pub description: Option<String>,
    /// Bullet-point product specs.
    pub specs: Vec<String>,
}

impl Deal {
    /// The countdown target for this deal: start time while upcoming, end
    /// time otherwise.
    #[must_use]
    pub const fn countdown_target(&self) -> DateTime<Utc> {
        match self.status {
            DealStatus::Upcoming => self.starts_at,
            _ => self.ends_at,
        }
    }
}
