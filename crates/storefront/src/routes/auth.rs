//! Authentication route handlers.
//!
//! Login and signup are mock flows: a synthetic latency, light validation,
//! then a placeholder identity is minted into the session store. No
//! credentials are stored or verified.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{existing_session_store, session_store};
use crate::state::AppState;
use crate::store::StoreError;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub return_to: Option<String>,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub return_to: Option<String>,
}

/// Query parameters for error display and post-login return.
#[derive(Debug, Deserialize)]
pub struct AuthQuery {
    pub error: Option<String>,
    pub return_to: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub return_to: Option<String>,
    pub user_name: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub return_to: Option<String>,
    pub user_name: Option<String>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Sanitize a post-login return path.
///
/// Only same-site absolute paths are honored; anything else falls back to
/// the home page.
fn safe_return_to(return_to: Option<&str>) -> String {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}

/// Build a redirect back to an auth page with an error code.
fn auth_error_redirect(page: &str, error: &str, return_to: Option<&str>) -> Response {
    let mut target = format!("/auth/{page}?error={error}");
    if let Some(path) = return_to {
        target.push_str("&return_to=");
        target.push_str(&urlencoding::encode(path));
    }
    Redirect::to(&target).into_response()
}

/// Map a store validation failure to an error code for the query string.
const fn error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::InvalidEmail(_) => "email",
        StoreError::InvalidCredentials => "credentials",
        StoreError::EmptyName => "name",
        StoreError::EmptyCart | StoreError::DealUnavailable(_) => "failed",
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<AuthQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        return_to: query.return_to,
        user_name: None,
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let store = session_store(&state, &session).await?;

    // Synthetic authentication latency
    tokio::time::sleep(state.config().delays.auth()).await;

    match store.login(&form.email, &form.password) {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user logged in");
            Ok(Redirect::to(&safe_return_to(form.return_to.as_deref())).into_response())
        }
        Err(e) => Ok(auth_error_redirect(
            "login",
            error_code(&e),
            form.return_to.as_deref(),
        )),
    }
}

/// Display the registration page.
pub async fn register_page(Query(query): Query<AuthQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error,
        return_to: query.return_to,
        user_name: None,
    }
}

/// Handle registration form submission.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let store = session_store(&state, &session).await?;

    // Synthetic authentication latency
    tokio::time::sleep(state.config().delays.auth()).await;

    match store.signup(&form.name, &form.email, &form.password) {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user registered");
            Ok(Redirect::to(&safe_return_to(form.return_to.as_deref())).into_response())
        }
        Err(e) => Ok(auth_error_redirect(
            "register",
            error_code(&e),
            form.return_to.as_deref(),
        )),
    }
}

/// Handle logout.
///
/// Clears the user and cart; order history stays with the session store.
#[instrument(skip(state, session))]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    if let Some(store) = existing_session_store(&state, &session).await? {
        store.logout();
        tracing::info!("user logged out");
    }

    Ok(Redirect::to("/").into_response())
}
