//! Session-related types.
//!
//! The session cookie only carries the key of the per-session store; user,
//! cart, and orders live in the store itself.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the UUID identifying this session's store.
    pub const STORE_KEY: &str = "store_key";
}
