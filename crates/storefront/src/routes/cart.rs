//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart lives in the per-session store; these handlers return the
//! fragments the page swaps in.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use flashdeal_core::DealId;

use crate::error::AppError;
use crate::middleware::existing_session_store;
use crate::models::CartItem;
use crate::presentation::format_money;
use crate::state::AppState;
use crate::store::StoreSnapshot;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub deal_id: String,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            deal_id: item.deal.id.to_string(),
            title: item.deal.title.clone(),
            image: item.deal.image.clone(),
            quantity: item.quantity,
            price: format_money(item.deal.price.sale),
            line_price: format_money(item.line_total()),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Build the cart view from a store snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &StoreSnapshot) -> Self {
        Self {
            items: snapshot.cart.iter().map(CartItemView::from).collect(),
            subtotal: format_money(snapshot.subtotal()),
            item_count: snapshot.cart_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub deal_id: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub deal_id: String,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Add a deal to the cart (HTMX).
///
/// Guests are redirected to login with a return path back to the deal.
/// Returns the cart count badge with a `cart-updated` trigger.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let deal_id = DealId::from(form.deal_id);

    // A store only ever holds a user after login, so a guest keeps no store.
    let store = match existing_session_store(&state, &session).await? {
        Some(store) if store.snapshot().user.is_some() => store,
        _ => {
            let return_to = urlencoding::encode(&format!("/deals/{deal_id}")).into_owned();
            return Ok((
                AppendHeaders([(
                    "HX-Redirect",
                    format!("/auth/login?return_to={return_to}"),
                )]),
                "",
            )
                .into_response());
        }
    };

    let Some(deal) = state.catalog().by_id(&deal_id) else {
        return Err(AppError::NotFound(format!("deal {deal_id}")));
    };
    if !deal.status.is_purchasable() {
        return Err(AppError::BadRequest(
            "This deal is no longer available".to_string(),
        ));
    }

    store.add_to_cart(deal.clone());
    let count = store.snapshot().cart_count();
    tracing::debug!(deal_id = %deal_id, count, "added to cart");

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Remove a deal from the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response, AppError> {
    let Some(store) = existing_session_store(&state, &session).await? else {
        return Ok(CartItemsTemplate {
            cart: CartView::from_snapshot(&StoreSnapshot::default()),
        }
        .into_response());
    };
    store.remove_from_cart(&DealId::from(form.deal_id));

    let cart = CartView::from_snapshot(&store.snapshot());
    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response())
}

/// Empty the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let Some(store) = existing_session_store(&state, &session).await? else {
        return Ok(CartItemsTemplate {
            cart: CartView::from_snapshot(&StoreSnapshot::default()),
        }
        .into_response());
    };
    store.clear_cart();

    let cart = CartView::from_snapshot(&store.snapshot());
    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response())
}

/// Get the cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let count = existing_session_store(&state, &session)
        .await?
        .map_or(0, |store| store.snapshot().cart_count());
    Ok(CartCountTemplate { count })
}
