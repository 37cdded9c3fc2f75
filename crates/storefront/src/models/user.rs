//! User domain type.

use serde::{Deserialize, Serialize};

use flashdeal_core::{Email, UserId};

/// The signed-in user for a session.
///
/// Login and signup mint this with a fixed placeholder identity; absence
/// means "guest". There is no account database behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Placeholder user ID (always 1 in the mock flows).
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email as entered at login/signup.
    pub email: Email,
}
