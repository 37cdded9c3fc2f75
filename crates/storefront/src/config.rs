//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FLASHDEAL_BASE_URL` - Public URL for the storefront
//! - `FLASHDEAL_SESSION_SECRET` - Session signing secret (min 64 chars, high entropy)
//!
//! ## Optional
//! - `FLASHDEAL_HOST` - Bind address (default: 127.0.0.1)
//! - `FLASHDEAL_PORT` - Listen port (default: 3000)
//! - `FLASHDEAL_AUTH_DELAY_MS` - Synthetic login/signup latency (default: 1000)
//! - `FLASHDEAL_CHECKOUT_DELAY_MS` - Synthetic payment-processing latency (default: 2000)
//! - `FLASHDEAL_CONFIRMATION_DELAY_MS` - Delay before a placed order flips to
//!   confirmed (default: 2000)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Session cookies are signed, so the secret must cover a full signing key.
const MIN_SESSION_SECRET_LENGTH: usize = 64;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Session signing secret. Must be at least
    /// [`MIN_SESSION_SECRET_LENGTH`] bytes; the session layer derives its
    /// cookie signing key from it.
    pub session_secret: SecretString,
    /// Synthetic latency applied to mock operations
    pub delays: DelayConfig,
}

/// Synthetic latency for the mock flows.
///
/// There is no real network or payment gateway behind login, checkout, or
/// order settlement; these delays stand in for them and are tunable so tests
/// can run them at zero.
#[derive(Debug, Clone)]
pub struct DelayConfig {
    /// Login/signup latency in milliseconds.
    pub auth_ms: u64,
    /// Checkout payment-processing latency in milliseconds.
    pub checkout_ms: u64,
    /// Delay before a placed order transitions to confirmed, in milliseconds.
    pub confirmation_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            auth_ms: 1_000,
            checkout_ms: 2_000,
            confirmation_ms: 2_000,
        }
    }
}

impl DelayConfig {
    /// No synthetic latency at all. Intended for tests.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            auth_ms: 0,
            checkout_ms: 0,
            confirmation_ms: 0,
        }
    }

    /// Login/signup latency as a [`Duration`].
    #[must_use]
    pub const fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }

    /// Checkout latency as a [`Duration`].
    #[must_use]
    pub const fn checkout(&self) -> Duration {
        Duration::from_millis(self.checkout_ms)
    }

    /// Order confirmation delay as a [`Duration`].
    #[must_use]
    pub const fn confirmation(&self) -> Duration {
        Duration::from_millis(self.confirmation_ms)
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the session secret fails validation (length, placeholder
    /// detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("FLASHDEAL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("FLASHDEAL_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("FLASHDEAL_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("FLASHDEAL_PORT".to_string(), e.to_string()))?;

        let base_url = get_required_env("FLASHDEAL_BASE_URL")?;
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("FLASHDEAL_BASE_URL".to_string(), e.to_string())
        })?;

        let session_secret = get_validated_secret("FLASHDEAL_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "FLASHDEAL_SESSION_SECRET")?;

        let delays = DelayConfig {
            auth_ms: get_millis_or_default("FLASHDEAL_AUTH_DELAY_MS", 1_000)?,
            checkout_ms: get_millis_or_default("FLASHDEAL_CHECKOUT_DELAY_MS", 2_000)?,
            confirmation_ms: get_millis_or_default("FLASHDEAL_CONFIRMATION_DELAY_MS", 2_000)?,
        };

        Ok(Self {
            host,
            port,
            base_url,
            session_secret,
            delays,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a millisecond duration variable with a default value.
fn get_millis_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Validate that the session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
