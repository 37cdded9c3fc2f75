//! Order route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use flashdeal_core::{OrderId, OrderStatus};

use crate::error::AppError;
use crate::filters;
use crate::middleware::existing_session_store;
use crate::models::Order;
use crate::presentation::{StatusBadge, format_money, order_status_badge};
use crate::routes::cart::CartItemView;
use crate::routes::deals::NotFoundTemplate;
use crate::state::AppState;

/// Order display data for the history list.
#[derive(Clone)]
pub struct OrderRowView {
    pub id: String,
    pub placed_at: String,
    pub item_count: u32,
    pub total: String,
    pub badge: StatusBadge,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            placed_at: order.created_at.format("%b %-d, %Y %H:%M").to_string(),
            item_count: order.item_count(),
            total: format_money(order.total),
            badge: order_status_badge(order.status),
        }
    }
}

/// Order display data for the detail page.
#[derive(Clone)]
pub struct OrderDetailView {
    pub row: OrderRowView,
    pub items: Vec<CartItemView>,
    /// Whether the page polls the status fragment.
    pub processing: bool,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        Self {
            row: OrderRowView::from(order),
            items: order.items.iter().map(CartItemView::from).collect(),
            processing: order.status == OrderStatus::Processing,
        }
    }
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub orders: Vec<OrderRowView>,
    pub user_name: Option<String>,
}

/// Order detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub order: OrderDetailView,
    pub user_name: Option<String>,
}

/// Order status fragment template (for HTMX).
///
/// The fragment polls itself while the order is processing and stops once
/// it settles.
#[derive(Template, WebTemplate)]
#[template(path = "partials/order_status.html")]
pub struct OrderStatusTemplate {
    pub order_id: String,
    pub badge: StatusBadge,
    pub processing: bool,
}

/// Display the order history page.
///
/// Orders are listed newest first.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let Some(store) = existing_session_store(&state, &session).await? else {
        return Ok(Redirect::to("/auth/login?return_to=%2Forders").into_response());
    };
    let snapshot = store.snapshot();

    let Some(user) = snapshot.user else {
        return Ok(Redirect::to("/auth/login?return_to=%2Forders").into_response());
    };

    let orders = snapshot.orders.iter().rev().map(OrderRowView::from).collect();

    Ok(OrdersIndexTemplate {
        orders,
        user_name: Some(user.name),
    }
    .into_response())
}

/// Display the order detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(store) = existing_session_store(&state, &session).await? else {
        return Ok(Redirect::to("/auth/login?return_to=%2Forders").into_response());
    };
    let snapshot = store.snapshot();

    let Some(user) = snapshot.user else {
        return Ok(Redirect::to("/auth/login?return_to=%2Forders").into_response());
    };

    let Some(order) = store.order(&OrderId::from(id)) else {
        return Ok(NotFoundTemplate {
            message: "This order does not exist.".to_string(),
            user_name: Some(user.name),
        }
        .into_response());
    };

    Ok(OrderShowTemplate {
        order: OrderDetailView::from(&order),
        user_name: Some(user.name),
    }
    .into_response())
}

/// Display the order status fragment (for HTMX).
#[instrument(skip(state, session))]
pub async fn status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(store) = existing_session_store(&state, &session).await? else {
        return Err(AppError::NotFound("order".to_string()));
    };

    let Some(order) = store.order(&OrderId::from(id)) else {
        return Err(AppError::NotFound("order".to_string()));
    };

    Ok(OrderStatusTemplate {
        order_id: order.id.to_string(),
        badge: order_status_badge(order.status),
        processing: order.status == OrderStatus::Processing,
    }
    .into_response())
}
