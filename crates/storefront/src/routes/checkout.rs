//! Checkout route handlers.
//!
//! Checkout is a mock: a synthetic payment delay, then the order is placed
//! against the session store. Shipping is display-only and never part of
//! the stored order total.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::existing_session_store;
use crate::presentation::format_money;
use crate::routes::cart::CartView;
use crate::state::AppState;
use crate::store::StoreError;

/// Orders over this subtotal ship free.
const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Flat shipping rate below the free-shipping threshold ($9.99).
const FLAT_SHIPPING: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub shipping: String,
    pub free_shipping: bool,
    pub total: String,
    pub error: Option<String>,
    pub user_name: Option<String>,
}

/// Empty-cart checkout page template.
///
/// Carries the transient error code so an empty-cart submission still
/// surfaces its message after the redirect.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/empty.html")]
pub struct CheckoutEmptyTemplate {
    pub error: Option<String>,
    pub user_name: Option<String>,
}

/// Display the checkout page.
///
/// Guests are redirected to login; an empty cart gets its own page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MessageQuery>,
) -> Result<Response, AppError> {
    let Some(store) = existing_session_store(&state, &session).await? else {
        return Ok(Redirect::to("/auth/login?return_to=%2Fcheckout").into_response());
    };
    let snapshot = store.snapshot();

    let Some(user) = snapshot.user.clone() else {
        return Ok(Redirect::to("/auth/login?return_to=%2Fcheckout").into_response());
    };

    if snapshot.cart.is_empty() {
        return Ok(CheckoutEmptyTemplate {
            error: query.error,
            user_name: Some(user.name),
        }
        .into_response());
    }

    let subtotal = snapshot.subtotal();
    let free_shipping = subtotal > FREE_SHIPPING_THRESHOLD;
    let shipping = if free_shipping {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING
    };

    Ok(CheckoutTemplate {
        cart: CartView::from_snapshot(&snapshot),
        shipping: format_money(shipping),
        free_shipping,
        total: format_money(subtotal + shipping),
        error: query.error,
        user_name: Some(user.name),
    }
    .into_response())
}

/// Handle checkout submission.
///
/// Applies the synthetic payment delay, places the order, clears the cart,
/// and redirects to the order page.
#[instrument(skip(state, session))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let Some(store) = existing_session_store(&state, &session).await? else {
        return Ok(Redirect::to("/auth/login?return_to=%2Fcheckout").into_response());
    };
    let snapshot = store.snapshot();

    if snapshot.user.is_none() {
        return Ok(Redirect::to("/auth/login?return_to=%2Fcheckout").into_response());
    }

    // Synthetic payment-processing latency
    tokio::time::sleep(state.config().delays.checkout()).await;

    let order = match store.place_order(snapshot.cart) {
        Ok(order) => order,
        Err(StoreError::EmptyCart) => {
            return Ok(Redirect::to("/checkout?error=empty").into_response());
        }
        Err(StoreError::DealUnavailable(_)) => {
            return Ok(Redirect::to("/checkout?error=unavailable").into_response());
        }
        Err(e) => return Err(e.into()),
    };

    store.clear_cart();
    tracing::info!(order_id = %order.id, total = %order.total, "order placed");

    Ok(Redirect::to(&format!("/orders/{}", order.id)).into_response())
}
