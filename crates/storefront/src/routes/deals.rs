//! Deal route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use flashdeal_core::{Countdown, DealId, DealStatus};

use crate::catalog::ALL_CATEGORIES;
use crate::error::AppError;
use crate::filters;
use crate::middleware::existing_session_store;
use crate::models::Deal;
use crate::presentation::{StatusBadge, StockMeter, format_money, status_badge, stock_meter};
use crate::state::AppState;

/// Deal display data for card grids.
#[derive(Clone)]
pub struct DealCardView {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: String,
    pub category: String,
    pub original_price: String,
    pub sale_price: String,
    pub rate: u8,
    pub is_hot: bool,
    pub badge: StatusBadge,
    pub stock: StockMeter,
    pub is_purchasable: bool,
    /// Whether the card polls the countdown fragment (upcoming/active only).
    pub has_countdown: bool,
}

impl DealCardView {
    /// Build the card view for a deal.
    #[must_use]
    pub fn from_deal(deal: &Deal) -> Self {
        Self {
            id: deal.id.to_string(),
            title: deal.title.clone(),
            subtitle: deal.subtitle.clone(),
            image: deal.image.clone(),
            category: deal.category.clone(),
            original_price: format_money(deal.price.original),
            sale_price: format_money(deal.price.sale),
            rate: deal.price.rate,
            is_hot: deal.price.is_hot(),
            badge: status_badge(deal.status),
            stock: stock_meter(deal.inventory_level),
            is_purchasable: deal.status.is_purchasable(),
            has_countdown: matches!(deal.status, DealStatus::Upcoming | DealStatus::Active),
        }
    }
}

/// Deal display data for the detail page.
#[derive(Clone)]
pub struct DealDetailView {
    pub card: DealCardView,
    pub description: Option<String>,
    pub specs: Vec<String>,
    pub savings: String,
}

impl DealDetailView {
    /// Build the detail view for a deal.
    #[must_use]
    pub fn from_deal(deal: &Deal) -> Self {
        Self {
            card: DealCardView::from_deal(deal),
            description: deal.description.clone(),
            specs: deal.specs.clone(),
            savings: format_money(deal.price.original - deal.price.sale),
        }
    }
}

/// Deal listing filter parameters.
#[derive(Debug, Deserialize)]
pub struct DealFilterQuery {
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Countdown fragment parameters.
#[derive(Debug, Deserialize)]
pub struct CountdownQuery {
    pub variant: Option<String>,
}

/// Deal listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "deals/index.html")]
pub struct DealsIndexTemplate {
    pub deals: Vec<DealCardView>,
    pub categories: Vec<String>,
    pub selected_category: String,
    pub user_name: Option<String>,
}

/// Deal detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "deals/show.html")]
pub struct DealShowTemplate {
    pub deal: DealDetailView,
    pub user_name: Option<String>,
}

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub message: String,
    pub user_name: Option<String>,
}

/// Countdown fragment template (for HTMX).
///
/// The fragment carries its own polling attributes; an expired render omits
/// them, which stops the 1-second poll.
#[derive(Template, WebTemplate)]
#[template(path = "partials/countdown.html")]
pub struct CountdownTemplate {
    pub deal_id: String,
    pub countdown: Countdown,
    pub expired: bool,
    pub banner: bool,
    /// Heading for the banner variant ("Starts in" or "Ends in").
    pub heading: &'static str,
}

/// Parse a status filter value; unknown values mean no filter.
fn parse_status(value: &str) -> Option<DealStatus> {
    match value {
        "upcoming" => Some(DealStatus::Upcoming),
        "active" => Some(DealStatus::Active),
        "soldout" => Some(DealStatus::SoldOut),
        "ended" => Some(DealStatus::Ended),
        _ => None,
    }
}

/// Resolve the session user's display name for the nav.
///
/// Read-only; a guest without a session store stays storeless.
async fn nav_user(state: &AppState, session: &Session) -> Result<Option<String>, AppError> {
    let Some(store) = existing_session_store(state, session).await? else {
        return Ok(None);
    };
    Ok(store.snapshot().user.map(|u| u.name))
}

/// Display the deal listing page.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DealFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let category = query
        .category
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());
    let status = query.status.as_deref().and_then(parse_status);

    let deals = state
        .catalog()
        .by_category(&category)
        .into_iter()
        .filter(|deal| status.is_none_or(|s| deal.status == s))
        .map(DealCardView::from_deal)
        .collect();

    Ok(DealsIndexTemplate {
        deals,
        categories: state
            .catalog()
            .categories()
            .iter()
            .map(|&c| c.to_string())
            .collect(),
        selected_category: category,
        user_name: nav_user(&state, &session).await?,
    })
}

/// Display the deal detail page.
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let user_name = nav_user(&state, &session).await?;

    let Some(deal) = state.catalog().by_id(&DealId::from(id)) else {
        return Ok(NotFoundTemplate {
            message: "This deal does not exist or has been removed.".to_string(),
            user_name,
        }
        .into_response());
    };

    Ok(DealShowTemplate {
        deal: DealDetailView::from_deal(deal),
        user_name,
    }
    .into_response())
}

/// Display the countdown fragment (for HTMX).
///
/// Polled every second; an upcoming deal counts down to its start, anything
/// else to its end. Past-target renders clamp to zero and stop polling.
pub async fn countdown(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<CountdownQuery>,
) -> Result<Response, AppError> {
    let Some(deal) = state.catalog().by_id(&DealId::from(id)) else {
        return Err(AppError::NotFound("deal".to_string()));
    };

    let countdown = Countdown::remaining(deal.countdown_target(), Utc::now());
    let heading = match deal.status {
        DealStatus::Upcoming => "Starts in",
        _ => "Ends in",
    };

    Ok(CountdownTemplate {
        deal_id: deal.id.to_string(),
        expired: countdown.is_zero(),
        countdown,
        banner: query.variant.as_deref() == Some("banner"),
        heading,
    }
    .into_response())
}
