//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;

use flashdeal_core::DealStatus;

use crate::error::AppError;
use crate::filters;
use crate::middleware::existing_session_store;
use crate::routes::deals::DealCardView;
use crate::state::AppState;

/// Home page template.
///
/// The banner features the live deal ending soonest; the grid shows every
/// live deal.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub banner: Option<DealCardView>,
    pub deals: Vec<DealCardView>,
    pub user_name: Option<String>,
}

/// Display the home page.
pub async fn home(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user_name = existing_session_store(&state, &session)
        .await?
        .and_then(|store| store.snapshot().user.map(|u| u.name));

    let active = state.catalog().by_status(DealStatus::Active);
    let banner = active
        .iter()
        .min_by_key(|deal| deal.ends_at)
        .map(|deal| DealCardView::from_deal(deal));
    let deals = active.into_iter().map(DealCardView::from_deal).collect();

    Ok(HomeTemplate {
        banner,
        deals,
        user_name,
    })
}
