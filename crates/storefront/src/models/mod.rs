//! Domain types for the storefront.
//!
//! These are validated in-memory objects; there is no database layer behind
//! them.

pub mod cart;
pub mod deal;
pub mod order;
pub mod session;
pub mod user;

pub use cart::CartItem;
pub use deal::Deal;
pub use order::Order;
pub use user::User;
