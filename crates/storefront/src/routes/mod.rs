//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (live deals + banner)
//! GET  /health                 - Health check
//!
//! # Deals
//! GET  /deals                  - Deal listing (category/status filters)
//! GET  /deals/:id              - Deal detail
//! GET  /deals/:id/countdown    - Countdown fragment (HTMX, polls every 1s)
//!
//! # Cart (HTMX fragments)
//! POST /cart/add               - Add deal (returns count badge, triggers cart-updated)
//! POST /cart/remove            - Remove deal (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Checkout page (requires login, non-empty cart)
//! POST /checkout               - Place order, redirect to the order page
//!
//! # Orders (requires login)
//! GET  /orders                 - Order history
//! GET  /orders/:id             - Order detail
//! GET  /orders/:id/status      - Order status fragment (HTMX, polls while processing)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod deals;
pub mod home;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the deal routes router.
pub fn deal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(deals::index))
        .route("/{id}", get(deals::show))
        .route("/{id}/countdown", get(deals::countdown))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", get(orders::status))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Deal routes
        .nest("/deals", deal_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::submit))
        // Order routes
        .nest("/orders", order_routes())
        // Auth routes
        .nest("/auth", auth_routes())
}
