//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::middleware::session::SESSION_IDLE_WINDOW;
use crate::store::StoreRegistry;

/// How often the background sweeper scans the registry for idle stores.
const STORE_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the seeded deal catalog, and the per-session store
/// registry.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    stores: StoreRegistry,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The catalog is seeded once at startup; deal windows are anchored to
    /// the current time so the seeded status tags line up.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = Catalog::seed(Utc::now());
        let stores = StoreRegistry::new(config.delays.confirmation());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                stores,
            }),
        }
    }

    /// Start the background task that evicts stores whose session has
    /// expired.
    ///
    /// Must be called from within a Tokio runtime. The task runs for the
    /// life of the process.
    pub fn start_store_sweeper(&self) {
        let stores = self.inner.stores.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(STORE_SWEEP_INTERVAL);
            interval.tick().await;
            loop {
                interval.tick().await;
                let evicted = stores.sweep(SESSION_IDLE_WINDOW);
                if evicted > 0 {
                    tracing::info!(evicted, "swept idle session stores");
                }
            }
        });
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the deal catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the session store registry.
    #[must_use]
    pub fn stores(&self) -> &StoreRegistry {
        &self.inner.stores
    }
}
