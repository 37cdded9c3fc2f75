//! Integration test harness for FlashDeal.
//!
//! Drives the full storefront router in-process via `tower::ServiceExt`,
//! with no listening socket. The harness keeps the session cookie between
//! requests so multi-step flows (login, cart, checkout) work like a browser.
//!
//! ```rust,ignore
//! let mut app = TestApp::new();
//! let response = app.get("/health").await;
//! assert_eq!(response.status(), StatusCode::OK);
//! ```

// Test-support crate; unwraps are assertions here.
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use secrecy::SecretString;
use tower::ServiceExt;

use flashdeal_storefront::config::{DelayConfig, StorefrontConfig};
use flashdeal_storefront::state::AppState;

/// High-entropy session secret for tests. Long enough to derive a full
/// cookie signing key.
const TEST_SESSION_SECRET: &str =
    "k9Qw3ErT7uYpAsdF2gHj4kLzXcVb6nM8q1wE5rT9yU3iO7pLsD4fG6hJ8kZxCvB0";

/// Confirmation delay used by tests, in milliseconds. Long enough to
/// observe the processing state, short enough to wait out.
pub const TEST_CONFIRMATION_DELAY_MS: u64 = 50;

/// In-process storefront with a browser-like cookie jar.
pub struct TestApp {
    router: Router,
    state: AppState,
    cookie: Option<String>,
}

impl TestApp {
    /// Build the storefront with zero auth/checkout latency and a short
    /// confirmation delay.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from(TEST_SESSION_SECRET),
            delays: DelayConfig {
                confirmation_ms: TEST_CONFIRMATION_DELAY_MS,
                ..DelayConfig::none()
            },
        };

        let state = AppState::new(config);
        Self {
            router: flashdeal_storefront::app(state.clone()),
            state,
            cookie: None,
        }
    }

    /// The application state behind the router, for registry assertions.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> Response<Body> {
        let request = self
            .request_builder(path)
            .method("GET")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a POST request with a form-encoded body.
    pub async fn post_form(&mut self, path: &str, body: &str) -> Response<Body> {
        let request = self
            .request_builder(path)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    fn request_builder(&self, path: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self.router.clone().oneshot(request).await.unwrap();

        // Keep the session cookie like a browser would
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let value = set_cookie.to_str().unwrap();
            if let Some(pair) = value.split(';').next() {
                self.cookie = Some(pair.to_string());
            }
        }

        response
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a response body to a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
