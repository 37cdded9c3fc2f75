//! FlashDeal Core - Shared types library.
//!
//! This crate provides common types used across all FlashDeal components:
//! - `storefront` - Public-facing flash-deal site
//! - `integration-tests` - End-to-end HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no session state. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`countdown`] - Countdown derivation for deal start/end timestamps

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod countdown;
pub mod types;

pub use countdown::Countdown;
pub use types::*;
