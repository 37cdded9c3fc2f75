//! Session middleware configuration.
//!
//! Sets up signed in-memory sessions using tower-sessions. The session
//! cookie carries only the UUID of this session's store; the store itself
//! lives in the [`crate::store::StoreRegistry`].

use std::time::Duration;

use secrecy::ExposeSecret;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer, cookie::Key};
use uuid::Uuid;

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::models::session::keys;
use crate::state::AppState;
use crate::store::Store;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "fd_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// The inactivity window as a std `Duration`, for the store sweeper.
///
/// A store idle this long belongs to a session the cookie layer has already
/// expired, so sweeping it cannot strand a live visitor.
pub const SESSION_IDLE_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Create the session layer with an in-memory store.
///
/// Cookies are signed with a key derived from the configured session
/// secret; the config loader guarantees the secret covers a full key.
#[must_use]
pub fn create_session_layer(
    config: &StorefrontConfig,
) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let store = MemoryStore::default();

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    let key = Key::from(config.session_secret.expose_secret().as_bytes());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}

/// Resolve the session's store, minting a store key on first use.
///
/// Only mutating handlers call this; read-only pages go through
/// [`existing_session_store`] so that plain browsing never allocates a store.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn session_store(state: &AppState, session: &Session) -> Result<Store, AppError> {
    let key = match session.get::<Uuid>(keys::STORE_KEY).await? {
        Some(key) => key,
        None => {
            let key = Uuid::new_v4();
            session.insert(keys::STORE_KEY, key).await?;
            key
        }
    };

    Ok(state.stores().get_or_create(key))
}

/// Resolve the session's store without creating one.
///
/// Returns `None` when the session carries no store key yet, which is every
/// cookie-less guest request.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn existing_session_store(
    state: &AppState,
    session: &Session,
) -> Result<Option<Store>, AppError> {
    let Some(key) = session.get::<Uuid>(keys::STORE_KEY).await? else {
        return Ok(None);
    };
    Ok(Some(state.stores().get_or_create(key)))
}
