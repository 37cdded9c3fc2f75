//! Static deal catalog.
//!
//! The catalog is the storefront's entire product source: a fixed list of
//! seed deals built relative to process start time so the seeded status tags
//! line up with their start/end windows. All accessors are pure reads;
//! absence is `None` or an empty list, never an error.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use flashdeal_core::{DealId, DealPrice, DealStatus, InventoryLevel};

use crate::models::Deal;

/// Sentinel category meaning "no filter".
pub const ALL_CATEGORIES: &str = "All";

/// The static deal catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    deals: Vec<Deal>,
    categories: Vec<&'static str>,
}

impl Catalog {
    /// Build the seed catalog with deal windows anchored to `now`.
    #[must_use]
    pub fn seed(now: DateTime<Utc>) -> Self {
        let rows = vec![
            SeedDeal {
                id: "1",
                title: "Wireless Noise-Cancelling Headphones",
                subtitle: Some("Premium audio experience"),
                image: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=800&q=80",
                original: 299,
                sale: 89,
                rate: 70,
                status: DealStatus::Active,
                starts_in_minutes: -120,
                ends_in_minutes: 180,
                inventory_level: InventoryLevel::Low,
                category: "Electronics",
                description: Some(
                    "Experience premium sound with active noise cancelling, 30-hour battery \
                     life, and a comfortable over-ear design.",
                ),
                specs: &[
                    "Active noise cancelling",
                    "30-hour battery",
                    "Bluetooth 5.0",
                    "Foldable design",
                ],
            },
            SeedDeal {
                id: "2",
                title: "4K Smart TV 55\"",
                subtitle: Some("Ultra HD entertainment"),
                image: "https://images.unsplash.com/photo-1593359677879-a4bb92f829d1?w=800&q=80",
                original: 799,
                sale: 449,
                rate: 44,
                status: DealStatus::Active,
                starts_in_minutes: -60,
                ends_in_minutes: 300,
                inventory_level: InventoryLevel::Mid,
                category: "Electronics",
                description: Some(
                    "Stunning 4K UHD display with HDR support, smart features, and immersive \
                     sound.",
                ),
                specs: &[
                    "55\" 4K UHD display",
                    "HDR10+",
                    "Smart TV platform",
                    "Voice control",
                ],
            },
            SeedDeal {
                id: "3",
                title: "Mechanical Gaming Keyboard",
                subtitle: Some("RGB backlight, Cherry MX switches"),
                image: "https://images.unsplash.com/photo-1587829741301-dc798b83add3?w=800&q=80",
                original: 159,
                sale: 79,
                rate: 50,
                status: DealStatus::Active,
                starts_in_minutes: -30,
                ends_in_minutes: 120,
                inventory_level: InventoryLevel::High,
                category: "Gaming",
                description: Some(
                    "Professional gaming keyboard with Cherry MX switches and customizable RGB \
                     lighting.",
                ),
                specs: &[
                    "Cherry MX switches",
                    "RGB backlight",
                    "Aluminum frame",
                    "Programmable keys",
                ],
            },
            SeedDeal {
                id: "4",
                title: "Smartwatch Pro Series 7",
                subtitle: Some("Health & fitness tracker"),
                image: "https://images.unsplash.com/photo-1579586337278-3befd40fd17a?w=800&q=80",
                original: 399,
                sale: 249,
                rate: 38,
                status: DealStatus::Upcoming,
                starts_in_minutes: 120,
                ends_in_minutes: 480,
                inventory_level: InventoryLevel::High,
                category: "Wearables",
                description: Some(
                    "Advanced health monitoring, GPS, water resistance, and all-day battery.",
                ),
                specs: &[
                    "Heart rate monitor",
                    "GPS tracking",
                    "Water resistant",
                    "2-day battery",
                ],
            },
            SeedDeal {
                id: "5",
                title: "Premium Coffee Maker",
                subtitle: Some("Barista-grade coffee at home"),
                image: "https://images.unsplash.com/photo-1517668808822-9ebb02f2a0e6?w=800&q=80",
                original: 249,
                sale: 149,
                rate: 40,
                status: DealStatus::SoldOut,
                starts_in_minutes: -240,
                ends_in_minutes: 60,
                inventory_level: InventoryLevel::Low,
                category: "Home",
                description: Some(
                    "Professional-grade espresso machine with milk frother and programmable \
                     settings.",
                ),
                specs: &[
                    "15-bar pressure",
                    "Milk frother",
                    "Programmable",
                    "Stainless steel",
                ],
            },
            SeedDeal {
                id: "6",
                title: "Wireless Gaming Mouse",
                subtitle: Some("Ultra-lightweight design"),
                image: "https://images.unsplash.com/photo-1527864550417-7fd91fc51a46?w=800&q=80",
                original: 129,
                sale: 69,
                rate: 47,
                status: DealStatus::Ended,
                starts_in_minutes: -600,
                ends_in_minutes: -60,
                inventory_level: InventoryLevel::Mid,
                category: "Gaming",
                description: Some(
                    "High-precision wireless gaming mouse with customizable DPI and RGB lighting.",
                ),
                specs: &["20,000 DPI", "Wireless", "70g weight", "RGB lighting"],
            },
            SeedDeal {
                id: "7",
                title: "Portable Bluetooth Speaker",
                subtitle: Some("360\u{b0} sound, waterproof"),
                image: "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=800&q=80",
                original: 149,
                sale: 79,
                rate: 47,
                status: DealStatus::Active,
                starts_in_minutes: -60,
                ends_in_minutes: 240,
                inventory_level: InventoryLevel::Mid,
                category: "Audio",
                description: Some(
                    "Powerful portable speaker with 360\u{b0} sound, waterproof design, and \
                     12-hour battery.",
                ),
                specs: &[
                    "360\u{b0} sound",
                    "IPX7 waterproof",
                    "12-hour battery",
                    "Bluetooth 5.0",
                ],
            },
            SeedDeal {
                id: "8",
                title: "Professional Drone with 4K Camera",
                subtitle: Some("Aerial photography made easy"),
                image: "https://images.unsplash.com/photo-1473968512647-3e447244af8f?w=800&q=80",
                original: 899,
                sale: 549,
                rate: 39,
                status: DealStatus::Upcoming,
                starts_in_minutes: 60,
                ends_in_minutes: 360,
                inventory_level: InventoryLevel::High,
                category: "Photography",
                description: Some(
                    "Advanced drone with 4K camera, GPS, obstacle avoidance, and 25-minute \
                     flight time.",
                ),
                specs: &[
                    "4K camera",
                    "GPS navigation",
                    "Obstacle avoidance",
                    "25min flight time",
                ],
            },
        ];
        let deals = rows.into_iter().map(|row| row.build(now)).collect();

        Self {
            deals,
            categories: vec![
                ALL_CATEGORIES,
                "Electronics",
                "Gaming",
                "Wearables",
                "Home",
                "Audio",
                "Photography",
            ],
        }
    }

    /// Look up a deal by ID.
    #[must_use]
    pub fn by_id(&self, id: &DealId) -> Option<&Deal> {
        self.deals.iter().find(|deal| &deal.id == id)
    }

    /// All deals with the given status, in catalog order.
    #[must_use]
    pub fn by_status(&self, status: DealStatus) -> Vec<&Deal> {
        self.deals
            .iter()
            .filter(|deal| deal.status == status)
            .collect()
    }

    /// All deals in the given category, in catalog order.
    ///
    /// [`ALL_CATEGORIES`] means no filter.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Deal> {
        self.deals
            .iter()
            .filter(|deal| category == ALL_CATEGORIES || deal.category == category)
            .collect()
    }

    /// Every deal, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Deal] {
        &self.deals
    }

    /// Category names for the filter bar, sentinel first.
    #[must_use]
    pub fn categories(&self) -> &[&'static str] {
        &self.categories
    }
}

/// Seed row shorthand; windows are minute offsets from the anchor time.
struct SeedDeal {
    id: &'static str,
    title: &'static str,
    subtitle: Option<&'static str>,
    image: &'static str,
    original: i64,
    sale: i64,
    rate: u8,
    status: DealStatus,
    starts_in_minutes: i64,
    ends_in_minutes: i64,
    inventory_level: InventoryLevel,
    category: &'static str,
    description: Option<&'static str>,
    specs: &'static [&'static str],
}

impl SeedDeal {
    fn build(self, now: DateTime<Utc>) -> Deal {
        Deal {
            id: DealId::from(self.id),
            title: self.title.to_owned(),
            subtitle: self.subtitle.map(str::to_owned),
            image: self.image.to_owned(),
            price: DealPrice::new(
                Decimal::from(self.original),
                Decimal::from(self.sale),
                self.rate,
            ),
            status: self.status,
            starts_at: now + Duration::minutes(self.starts_in_minutes),
            ends_at: now + Duration::minutes(self.ends_in_minutes),
            inventory_level: self.inventory_level,
            category: self.category.to_owned(),
            description: self.description.map(str::to_owned),
            specs: self.specs.iter().map(|&s| s.to_owned()).collect(),
        }
    }
}
