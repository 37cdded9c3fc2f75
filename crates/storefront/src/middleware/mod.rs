//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Session layer (tower-sessions with in-memory store, signed cookies)

pub mod session;

pub use session::{create_session_layer, existing_session_store, session_store};
