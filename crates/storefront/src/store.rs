//! Per-session cart/order store.
//!
//! Each browser session owns one [`Store`]: the current user, the cart, and
//! the order history. The store is an explicit context object handed out by
//! the [`StoreRegistry`] on [`crate::state::AppState`] - there is no global
//! singleton. Readers get immutable [`StoreSnapshot`] copies; every mutation
//! goes through one locked entry point on `Store`.
//!
//! Order confirmation is a deferred task: `place_order` returns the order in
//! `Processing` state and a background task flips the stored copy to
//! `Confirmed` after the configured delay. The store retains the task
//! handles so [`Store::shutdown`] can abort anything still pending when the
//! session is torn down.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::task::JoinHandle;
use uuid::Uuid;

use flashdeal_core::{DealId, Email, EmailError, OrderId, OrderStatus, UserId};

use crate::models::{CartItem, Deal, Order, User};

/// The placeholder identity minted by the mock login/signup flows.
const PLACEHOLDER_USER_ID: UserId = UserId::new(1);
const PLACEHOLDER_USER_NAME: &str = "John Doe";

/// Errors from store operations.
///
/// The mock flows accept almost anything; these are the few validation
/// failures that do exist.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The password was empty.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The display name was empty at signup.
    #[error("name cannot be empty")]
    EmptyName,

    /// An order was placed with no items.
    #[error("cart is empty")]
    EmptyCart,

    /// An order contained a deal that is no longer purchasable.
    #[error("deal {0} is no longer available")]
    DealUnavailable(DealId),
}

/// Immutable copy of a store's state for readers.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub user: Option<User>,
    pub cart: Vec<CartItem>,
    pub orders: Vec<Order>,
}

impl StoreSnapshot {
    /// Total units across the cart.
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.cart.iter().map(|item| item.quantity).sum()
    }

    /// Sum of sale price times quantity over the cart.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.iter().map(CartItem::line_total).sum()
    }
}

#[derive(Default)]
struct StoreState {
    user: Option<User>,
    cart: Vec<CartItem>,
    orders: Vec<Order>,
}

/// One session's cart/order store.
///
/// Cheaply cloneable; clones share the same underlying state.
#[derive(Clone)]
pub struct Store {
    state: Arc<Mutex<StoreState>>,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
    confirmation_delay: Duration,
}

impl Store {
    /// Create an empty store whose deferred confirmations fire after
    /// `confirmation_delay`.
    #[must_use]
    pub fn new(confirmation_delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
            pending: Arc::new(Mutex::new(Vec::new())),
            confirmation_delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Immutable snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.lock();
        StoreSnapshot {
            user: state.user.clone(),
            cart: state.cart.clone(),
            orders: state.orders.clone(),
        }
    }

    /// Look up an order by ID.
    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<Order> {
        self.lock().orders.iter().find(|o| &o.id == id).cloned()
    }

    /// Sign in with the fixed placeholder identity and the given email.
    ///
    /// # Errors
    ///
    /// Rejects a structurally invalid email or an empty password. There is
    /// no credential verification beyond that.
    pub fn login(&self, email: &str, password: &str) -> Result<User, StoreError> {
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(StoreError::InvalidCredentials);
        }

        let user = User {
            id: PLACEHOLDER_USER_ID,
            name: PLACEHOLDER_USER_NAME.to_owned(),
            email,
        };
        self.lock().user = Some(user.clone());
        Ok(user)
    }

    /// Create an account with the given display name and sign in.
    ///
    /// # Errors
    ///
    /// Rejects an empty name, a structurally invalid email, or an empty
    /// password. No account is actually persisted anywhere.
    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(StoreError::InvalidCredentials);
        }

        let user = User {
            id: PLACEHOLDER_USER_ID,
            name: name.trim().to_owned(),
            email,
        };
        self.lock().user = Some(user.clone());
        Ok(user)
    }

    /// Clear the current user and empty the cart.
    ///
    /// Order history survives logout; only a new session starts without it.
    pub fn logout(&self) {
        let mut state = self.lock();
        state.user = None;
        state.cart.clear();
    }

    /// Add one unit of `deal` to the cart.
    ///
    /// A deal already in the cart has its quantity incremented; item order
    /// is preserved and new items append at the end.
    pub fn add_to_cart(&self, deal: Deal) {
        let mut state = self.lock();
        if let Some(item) = state.cart.iter_mut().find(|item| item.deal.id == deal.id) {
            item.quantity += 1;
        } else {
            state.cart.push(CartItem::single(deal));
        }
    }

    /// Remove the cart item for `deal_id`. A no-op for an absent ID.
    pub fn remove_from_cart(&self, deal_id: &DealId) {
        self.lock().cart.retain(|item| &item.deal.id != deal_id);
    }

    /// Empty the cart unconditionally.
    pub fn clear_cart(&self) {
        self.lock().cart.clear();
    }

    /// Place an order for `items`.
    ///
    /// The total is computed once from the snapshot; the order is appended
    /// in `Processing` state and a deferred task flips it to `Confirmed`
    /// after the configured delay. The returned order is the `Processing`
    /// copy - re-read the store to observe the transition.
    ///
    /// # Errors
    ///
    /// `EmptyCart` for an empty item list; `DealUnavailable` when any item's
    /// deal is not active.
    pub fn place_order(&self, items: Vec<CartItem>) -> Result<Order, StoreError> {
        if items.is_empty() {
            return Err(StoreError::EmptyCart);
        }
        if let Some(item) = items.iter().find(|i| !i.deal.status.is_purchasable()) {
            return Err(StoreError::DealUnavailable(item.deal.id.clone()));
        }

        let placed_at = Utc::now();
        let order = Order {
            id: OrderId::from_placement_time(placed_at),
            total: items.iter().map(CartItem::line_total).sum(),
            items,
            status: OrderStatus::Processing,
            created_at: placed_at,
        };

        self.lock().orders.push(order.clone());
        self.schedule_confirmation(order.id.clone());

        Ok(order)
    }

    /// Spawn the deferred confirmation for `id` and retain its handle.
    fn schedule_confirmation(&self, id: OrderId) {
        let state = Arc::clone(&self.state);
        let delay = self.confirmation_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(order) = state.orders.iter_mut().find(|o| o.id == id) {
                order.status = OrderStatus::Confirmed;
                tracing::info!(order_id = %id, "order confirmed");
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    /// Abort any pending confirmations.
    ///
    /// Called when the owning session is torn down; a dead session must not
    /// mutate state afterwards.
    pub fn shutdown(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        for handle in pending.drain(..) {
            handle.abort();
        }
    }
}

struct RegistryEntry {
    store: Store,
    last_seen: Instant,
}

/// All live session stores, keyed by the UUID kept in each session cookie.
///
/// Every access refreshes the entry's last-seen time; the background sweeper
/// started by [`crate::state::AppState::start_store_sweeper`] evicts entries
/// that outlive the session inactivity window.
#[derive(Clone)]
pub struct StoreRegistry {
    stores: Arc<Mutex<HashMap<Uuid, RegistryEntry>>>,
    confirmation_delay: Duration,
}

impl StoreRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new(confirmation_delay: Duration) -> Self {
        Self {
            stores: Arc::new(Mutex::new(HashMap::new())),
            confirmation_delay,
        }
    }

    /// Get the store for `key`, creating it on first use.
    #[must_use]
    pub fn get_or_create(&self, key: Uuid) -> Store {
        let mut stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = stores.entry(key).or_insert_with(|| RegistryEntry {
            store: Store::new(self.confirmation_delay),
            last_seen: Instant::now(),
        });
        entry.last_seen = Instant::now();
        entry.store.clone()
    }

    /// Tear down the store for `key`, aborting its pending confirmations.
    pub fn evict(&self, key: Uuid) {
        let entry = self
            .stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        if let Some(entry) = entry {
            entry.store.shutdown();
        }
    }

    /// Evict every store idle for at least `max_idle`, returning the count.
    ///
    /// Sessions past their inactivity expiry can never present their store
    /// key again, so their stores are dead weight.
    pub fn sweep(&self, max_idle: Duration) -> usize {
        let idle: Vec<Uuid> = {
            let stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);
            stores
                .iter()
                .filter(|(_, entry)| entry.last_seen.elapsed() >= max_idle)
                .map(|(key, _)| *key)
                .collect()
        };
        for key in &idle {
            self.evict(*key);
        }
        idle.len()
    }

    /// Number of live session stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no session store exists yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use flashdeal_core::{DealPrice, DealStatus, InventoryLevel};

    fn deal(id: &str, sale: i64, status: DealStatus) -> Deal {
        let now = Utc::now();
        Deal {
            id: DealId::from(id),
            title: format!("Deal {id}"),
            subtitle: None,
            image: String::new(),
            price: DealPrice::new(Decimal::from(sale * 2), Decimal::from(sale), 50),
            status,
            starts_at: now - ChronoDuration::hours(1),
            ends_at: now + ChronoDuration::hours(1),
            inventory_level: InventoryLevel::High,
            category: "Electronics".to_owned(),
            specs: Vec::new(),
            description: None,
        }
    }

    fn store() -> Store {
        Store::new(Duration::from_millis(20))
    }

    #[test]
    fn test_login_accepts_any_credentials() {
        let store = store();
        let user = store.login("shopper@example.com", "hunter2").unwrap();
        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email.as_str(), "shopper@example.com");
        assert!(store.snapshot().user.is_some());
    }

    #[test]
    fn test_login_rejects_bad_email_and_empty_password() {
        let store = store();
        assert!(matches!(
            store.login("not-an-email", "pw"),
            Err(StoreError::InvalidEmail(_))
        ));
        assert!(matches!(
            store.login("a@b.c", ""),
            Err(StoreError::InvalidCredentials)
        ));
        assert!(store.snapshot().user.is_none());
    }

    #[test]
    fn test_signup_uses_given_name() {
        let store = store();
        let user = store.signup("Jane Doe", "jane@example.com", "pw").unwrap();
        assert_eq!(user.name, "Jane Doe");

        assert!(matches!(
            store.signup("   ", "jane@example.com", "pw"),
            Err(StoreError::EmptyName)
        ));
    }

    #[test]
    fn test_duplicate_add_increments_quantity() {
        let store = store();
        store.add_to_cart(deal("1", 89, DealStatus::Active));
        store.add_to_cart(deal("1", 89, DealStatus::Active));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.cart.len(), 1);
        assert_eq!(snapshot.cart.first().unwrap().quantity, 2);
        assert_eq!(snapshot.cart_count(), 2);
    }

    #[test]
    fn test_add_preserves_order_and_appends() {
        let store = store();
        store.add_to_cart(deal("1", 89, DealStatus::Active));
        store.add_to_cart(deal("2", 449, DealStatus::Active));
        store.add_to_cart(deal("1", 89, DealStatus::Active));

        let cart = store.snapshot().cart;
        let ids: Vec<&str> = cart.iter().map(|i| i.deal.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let store = store();
        store.add_to_cart(deal("1", 89, DealStatus::Active));
        store.remove_from_cart(&DealId::from("missing"));
        assert_eq!(store.snapshot().cart.len(), 1);

        store.remove_from_cart(&DealId::from("1"));
        assert!(store.snapshot().cart.is_empty());
    }

    #[test]
    fn test_clear_cart() {
        let store = store();
        store.add_to_cart(deal("1", 89, DealStatus::Active));
        store.add_to_cart(deal("2", 449, DealStatus::Active));
        store.clear_cart();
        assert!(store.snapshot().cart.is_empty());
    }

    #[tokio::test]
    async fn test_place_order_total() {
        let store = store();
        store.add_to_cart(deal("1", 89, DealStatus::Active));
        store.add_to_cart(deal("2", 449, DealStatus::Active));
        store.add_to_cart(deal("2", 449, DealStatus::Active));

        let order = store.place_order(store.snapshot().cart).unwrap();
        assert_eq!(order.total, Decimal::from(987));
        assert_eq!(order.item_count(), 3);
    }

    #[tokio::test]
    async fn test_place_order_rejects_empty_and_unavailable() {
        let store = store();
        assert!(matches!(
            store.place_order(Vec::new()),
            Err(StoreError::EmptyCart)
        ));

        store.add_to_cart(deal("5", 149, DealStatus::SoldOut));
        assert!(matches!(
            store.place_order(store.snapshot().cart),
            Err(StoreError::DealUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_order_confirms_after_delay() {
        let store = store();
        store.add_to_cart(deal("1", 89, DealStatus::Active));

        let order = store.place_order(store.snapshot().cart).unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(
            store.order(&order.id).unwrap().status,
            OrderStatus::Processing
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(
            store.order(&order.id).unwrap().status,
            OrderStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn test_shutdown_aborts_pending_confirmation() {
        let store = store();
        store.add_to_cart(deal("1", 89, DealStatus::Active));

        let order = store.place_order(store.snapshot().cart).unwrap();
        store.shutdown();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(
            store.order(&order.id).unwrap().status,
            OrderStatus::Processing
        );
    }

    #[tokio::test]
    async fn test_logout_keeps_orders() {
        let store = store();
        store.login("shopper@example.com", "pw").unwrap();
        store.add_to_cart(deal("1", 89, DealStatus::Active));
        store.place_order(store.snapshot().cart).unwrap();

        store.logout();

        let snapshot = store.snapshot();
        assert!(snapshot.user.is_none());
        assert!(snapshot.cart.is_empty());
        assert_eq!(snapshot.orders.len(), 1);
    }

    #[tokio::test]
    async fn test_registry_returns_same_store_per_key() {
        let registry = StoreRegistry::new(Duration::from_millis(20));
        let key = Uuid::new_v4();

        let store = registry.get_or_create(key);
        store.add_to_cart(deal("1", 89, DealStatus::Active));

        let again = registry.get_or_create(key);
        assert_eq!(again.snapshot().cart.len(), 1);

        let other = registry.get_or_create(Uuid::new_v4());
        assert!(other.snapshot().cart.is_empty());
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_registry_evict_shuts_store_down() {
        let registry = StoreRegistry::new(Duration::from_millis(20));
        let key = Uuid::new_v4();

        let store = registry.get_or_create(key);
        store.add_to_cart(deal("1", 89, DealStatus::Active));
        let order = store.place_order(store.snapshot().cart).unwrap();

        registry.evict(key);
        tokio::time::sleep(Duration::from_millis(100)).await;

        // The evicted session's pending confirmation never fired.
        assert_eq!(
            store.order(&order.id).unwrap().status,
            OrderStatus::Processing
        );
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_evicts_idle_stores() {
        let registry = StoreRegistry::new(Duration::from_millis(20));
        let store = registry.get_or_create(Uuid::new_v4());
        store.add_to_cart(deal("1", 89, DealStatus::Active));
        let order = store.place_order(store.snapshot().cart).unwrap();

        let evicted = registry.sweep(Duration::ZERO);
        assert_eq!(evicted, 1);
        assert!(registry.is_empty());

        // Eviction also aborted the swept store's pending confirmation.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(
            store.order(&order.id).unwrap().status,
            OrderStatus::Processing
        );
    }

    #[tokio::test]
    async fn test_sweep_keeps_recently_seen_stores() {
        let registry = StoreRegistry::new(Duration::from_millis(20));
        let key = Uuid::new_v4();
        registry.get_or_create(key).add_to_cart(deal("1", 89, DealStatus::Active));

        assert_eq!(registry.sweep(Duration::from_secs(60)), 0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_or_create(key).snapshot().cart.len(), 1);
    }
}
