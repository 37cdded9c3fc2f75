//! Presentation mappings for templates.
//!
//! Pure functions that turn domain enums into the labels, colors, and meter
//! widths the templates render. Colors are CSS custom properties defined in
//! `static/css/main.css`.

use rust_decimal::Decimal;

use flashdeal_core::{DealStatus, InventoryLevel, OrderStatus};

/// Label and colors for a deal status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub fg: &'static str,
    pub bg: &'static str,
}

/// Width and colors for a stock meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockMeter {
    pub percent: u8,
    pub color: &'static str,
    pub label: &'static str,
}

/// Badge for a deal's lifecycle status.
#[must_use]
pub const fn status_badge(status: DealStatus) -> StatusBadge {
    match status {
        DealStatus::Upcoming => StatusBadge {
            label: "Coming Soon",
            fg: "var(--fd-info-700)",
            bg: "var(--fd-info-100)",
        },
        DealStatus::Active => StatusBadge {
            label: "Live Now",
            fg: "var(--fd-success-700)",
            bg: "var(--fd-success-100)",
        },
        DealStatus::SoldOut => StatusBadge {
            label: "Sold Out",
            fg: "var(--fd-neutral-700)",
            bg: "var(--fd-neutral-100)",
        },
        DealStatus::Ended => StatusBadge {
            label: "Ended",
            fg: "var(--fd-danger-700)",
            bg: "var(--fd-danger-100)",
        },
    }
}

/// Meter for a deal's remaining inventory.
///
/// The widths are fixed per level; the storefront never exposes exact stock
/// counts.
#[must_use]
pub const fn stock_meter(level: InventoryLevel) -> StockMeter {
    match level {
        InventoryLevel::High => StockMeter {
            percent: 75,
            color: "var(--fd-success-500)",
            label: "In stock",
        },
        InventoryLevel::Mid => StockMeter {
            percent: 40,
            color: "var(--fd-warning-500)",
            label: "Selling fast",
        },
        InventoryLevel::Low => StockMeter {
            percent: 15,
            color: "var(--fd-danger-500)",
            label: "Almost gone",
        },
    }
}

/// Badge for an order's settlement status.
#[must_use]
pub const fn order_status_badge(status: OrderStatus) -> StatusBadge {
    match status {
        OrderStatus::Processing => StatusBadge {
            label: "Processing",
            fg: "var(--fd-warning-700)",
            bg: "var(--fd-warning-100)",
        },
        OrderStatus::Confirmed => StatusBadge {
            label: "Confirmed",
            fg: "var(--fd-success-700)",
            bg: "var(--fd-success-100)",
        },
        OrderStatus::Failed => StatusBadge {
            label: "Failed",
            fg: "var(--fd-danger-700)",
            bg: "var(--fd-danger-100)",
        },
    }
}

/// Format a decimal amount as a dollar price.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("${amount:.2}")
}
