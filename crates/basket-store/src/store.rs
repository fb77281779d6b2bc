//! # Cart Store
//!
//! The authoritative in-memory cart and its persisted mirror.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action                Store Operation          Effect               │
//! │  ─────────                ───────────────          ──────               │
//! │                                                                         │
//! │  App start ─────────────► open() / hydrate() ────► seed cart from slot  │
//! │                                                                         │
//! │  Tap product ───────────► add_to_cart() ─────────► append or qty + 1    │
//! │                                                                         │
//! │  Tap "+" ───────────────► increment() ───────────► qty + 1              │
//! │                                                                         │
//! │  Tap "-" ───────────────► decrement() ───────────► qty - 1, 0 removes   │
//! │                                                                         │
//! │  Render cart ───────────► items() ───────────────► (read-only snapshot) │
//! │                                                                         │
//! │  Every mutation: commit in memory under the lock, then mirror the      │
//! │  POST-mutation snapshot to the key-value slot.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mirror Consistency
//! Each mutation serializes the snapshot taken *after* its in-memory commit,
//! so an awaited mutation leaves the slot equal to memory. (The system this
//! replaces captured the pre-mutation list and so persisted one step behind;
//! that race was an accident of its state handling, not a contract, and is
//! deliberately not reproduced.)
//!
//! A failed mirror write is handed back to the caller as an error while the
//! in-memory cart keeps the mutated state: memory is authoritative for the
//! session, the slot catches up on the next successful write.

use std::sync::{Arc, Mutex};

use tracing::{debug, error, warn};

use basket_core::{Cart, CartItem, Product, CART_STORAGE_KEY};

use crate::error::{StoreError, StoreResult};
use crate::kv::KvStore;

/// The cart state container.
///
/// Owns the in-memory [`Cart`] behind a mutex and mirrors every mutation
/// into the injected [`KvStore`] under [`CART_STORAGE_KEY`].
///
/// ## Construction
/// The persistence dependency is injected at construction via
/// [`CartStore::open`], which also performs the one-time hydration. There is
/// no ambient registry to look the store up in; consumers receive an
/// explicit reference (typically an `Arc<CartStore>`).
///
/// ## Thread Safety
/// Callers are expected to be a single UI event loop, but the store is
/// `Send + Sync` so the surrounding shell can manage it like any other piece
/// of shared state. The in-memory update happens synchronously under the
/// lock; only the mirror write awaits I/O, and the lock is never held across
/// that await.
pub struct CartStore {
    /// Injected persistence backend.
    kv: Arc<dyn KvStore>,

    /// The authoritative in-memory cart.
    cart: Mutex<Cart>,
}

impl CartStore {
    /// Opens the store over the given key-value backend and hydrates it.
    ///
    /// ## Hydration
    /// Runs exactly once, here:
    /// - Empty slot → the cart starts empty
    /// - Valid blob → the cart is replaced wholesale with the persisted items
    /// - Corrupt blob → warning logged, cart starts empty (recoverable)
    /// - Read failure → error logged, cart starts empty and stays usable;
    ///   memory is authoritative for the session
    pub async fn open(kv: Arc<dyn KvStore>) -> Self {
        let store = CartStore {
            kv,
            cart: Mutex::new(Cart::new()),
        };

        if let Err(e) = store.hydrate().await {
            // Non-fatal: the UI gets an empty, fully functional cart.
            error!(error = %e, "Cart hydration failed, starting empty");
        }

        store
    }

    /// Re-reads the persisted slot and replaces the in-memory cart with it.
    ///
    /// Called once by [`CartStore::open`]; exposed so a shell can force a
    /// re-read. Idempotent: hydrating twice from the same slot yields the
    /// same cart.
    ///
    /// A missing slot leaves the current cart untouched; a corrupt blob
    /// resets to empty and reports success (the failure is logged, not
    /// propagated, so startup never hard-fails on bad data).
    pub async fn hydrate(&self) -> StoreResult<()> {
        let blob = self.kv.get(CART_STORAGE_KEY).await?;

        let Some(blob) = blob else {
            debug!("No persisted cart, keeping current state");
            return Ok(());
        };

        match serde_json::from_str::<Vec<CartItem>>(&blob) {
            Ok(items) => {
                debug!(count = items.len(), "Hydrated cart from storage");
                *self.lock_cart() = Cart::from_items(items);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Persisted cart is corrupt, falling back to empty");
                *self.lock_cart() = Cart::new();
                Ok(())
            }
        }
    }

    /// Adds a product to the cart and mirrors the result.
    ///
    /// An id already in the cart behaves exactly like [`CartStore::increment`]
    /// (no duplicate entry); a new id is appended with quantity 1. The
    /// in-memory update takes effect immediately; the returned future
    /// resolves once the mirror write finished.
    pub async fn add_to_cart(&self, product: Product) -> StoreResult<()> {
        debug!(id = %product.id, "add_to_cart");

        let snapshot = {
            let mut cart = self.lock_cart();
            cart.add(product);
            cart.items.clone()
        };

        self.persist(&snapshot).await
    }

    /// Increments the quantity of the entry matching `id` by 1.
    ///
    /// Unknown ids leave the cart unchanged, but the mirror write still
    /// occurs (the slot always tracks whatever the in-memory cart is).
    pub async fn increment(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "increment");

        let snapshot = {
            let mut cart = self.lock_cart();
            cart.increment(id);
            cart.items.clone()
        };

        self.persist(&snapshot).await
    }

    /// Decrements the quantity of the entry matching `id` by 1.
    ///
    /// An entry reaching quantity 0 is removed; unknown ids are a silent
    /// no-op. The mirror write always occurs.
    pub async fn decrement(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "decrement");

        let snapshot = {
            let mut cart = self.lock_cart();
            cart.decrement(id);
            cart.items.clone()
        };

        self.persist(&snapshot).await
    }

    /// Returns a read-only snapshot of the current cart items.
    pub fn items(&self) -> Vec<CartItem> {
        self.lock_cart().items.clone()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = store.with_cart(|cart| cart.total_quantity());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.lock_cart())
    }

    /// Serializes a snapshot and overwrites the persisted slot.
    async fn persist(&self, items: &[CartItem]) -> StoreResult<()> {
        let blob = serde_json::to_string(items).map_err(StoreError::Corrupt)?;

        if let Err(e) = self.kv.set(CART_STORAGE_KEY, &blob).await {
            // Memory keeps the mutated state; the slot is stale until the
            // next successful write. The caller decides how to surface this.
            error!(error = %e, "Mirror write failed, in-memory cart is ahead of storage");
            return Err(e);
        }

        Ok(())
    }

    fn lock_cart(&self) -> std::sync::MutexGuard<'_, Cart> {
        self.cart.lock().expect("Cart mutex poisoned")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;

    fn test_product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {}", id),
            image_url: format!("https://cdn.example/{}.png", id),
            price,
        }
    }

    /// Parses the persisted slot back into items, panicking on a missing or
    /// corrupt blob. Test-only convenience.
    async fn mirror_items(kv: &MemoryKvStore) -> Vec<CartItem> {
        let blob = kv
            .get(CART_STORAGE_KEY)
            .await
            .unwrap()
            .expect("mirror slot is empty");
        serde_json::from_str(&blob).unwrap()
    }

    #[tokio::test]
    async fn test_open_with_empty_slot_starts_empty() {
        let kv = Arc::new(MemoryKvStore::new());
        let store = CartStore::open(kv).await;

        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn test_open_hydrates_persisted_items() {
        let blob = r#"[{"id":"p1","title":"T","imageUrl":"u","price":10.0,"quantity":2}]"#;
        let kv = Arc::new(MemoryKvStore::with_entry(CART_STORAGE_KEY, blob));

        let store = CartStore::open(kv).await;

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "p1");
        assert_eq!(items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_open_with_corrupt_blob_falls_back_to_empty() {
        let kv = Arc::new(MemoryKvStore::with_entry(CART_STORAGE_KEY, "not json"));

        let store = CartStore::open(kv.clone()).await;

        // Recoverable: empty cart, store fully usable afterwards
        assert!(store.items().is_empty());
        store.add_to_cart(test_product("p1", 10.0)).await.unwrap();
        assert_eq!(store.items().len(), 1);
    }

    #[tokio::test]
    async fn test_hydrate_is_idempotent() {
        let blob = r#"[{"id":"p1","title":"T","imageUrl":"u","price":10.0,"quantity":3}]"#;
        let kv = Arc::new(MemoryKvStore::with_entry(CART_STORAGE_KEY, blob));

        let store = CartStore::open(kv).await;
        let first = store.items();

        store.hydrate().await.unwrap();
        assert_eq!(store.items(), first);
    }

    #[tokio::test]
    async fn test_add_mirrors_post_mutation_state() {
        let kv = Arc::new(MemoryKvStore::new());
        let store = CartStore::open(kv.clone()).await;

        store.add_to_cart(test_product("p1", 10.0)).await.unwrap();

        // The slot reflects the cart as of the mutation that wrote it,
        // not the state one step behind.
        assert_eq!(mirror_items(&kv).await, store.items());
    }

    #[tokio::test]
    async fn test_add_twice_increments_in_memory_and_mirror() {
        let kv = Arc::new(MemoryKvStore::new());
        let store = CartStore::open(kv.clone()).await;

        store.add_to_cart(test_product("p1", 10.0)).await.unwrap();
        store.add_to_cart(test_product("p1", 10.0)).await.unwrap();

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(mirror_items(&kv).await, items);
    }

    #[tokio::test]
    async fn test_increment_unknown_id_still_writes_mirror() {
        let kv = Arc::new(MemoryKvStore::new());
        let store = CartStore::open(kv.clone()).await;

        store.increment("absent-id").await.unwrap();

        // Cart unchanged, but the slot now mirrors the (empty) cart.
        assert!(store.items().is_empty());
        assert_eq!(mirror_items(&kv).await, Vec::<CartItem>::new());
    }

    #[tokio::test]
    async fn test_decrement_to_zero_removes_from_memory_and_mirror() {
        let kv = Arc::new(MemoryKvStore::new());
        let store = CartStore::open(kv.clone()).await;

        store.add_to_cart(test_product("p1", 10.0)).await.unwrap();
        store.increment("p1").await.unwrap();

        store.decrement("p1").await.unwrap();
        assert_eq!(store.items()[0].quantity, 1);

        store.decrement("p1").await.unwrap();
        assert!(store.items().is_empty());
        assert_eq!(mirror_items(&kv).await, Vec::<CartItem>::new());
    }

    #[tokio::test]
    async fn test_decrement_absent_id_on_empty_cart_is_silent() {
        let kv = Arc::new(MemoryKvStore::new());
        let store = CartStore::open(kv.clone()).await;

        store.decrement("absent-id").await.unwrap();
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn test_restart_round_trip() {
        let kv = Arc::new(MemoryKvStore::new());

        let store = CartStore::open(kv.clone()).await;
        store.add_to_cart(test_product("p1", 10.0)).await.unwrap();
        store.add_to_cart(test_product("p2", 5.5)).await.unwrap();
        store.increment("p2").await.unwrap();
        let before = store.items();
        drop(store);

        // Same backend, fresh store: simulates a process restart.
        let reopened = CartStore::open(kv).await;
        assert_eq!(reopened.items(), before);
    }

    #[tokio::test]
    async fn test_failed_write_surfaces_error_and_memory_stays_ahead() {
        let kv = Arc::new(MemoryKvStore::new());
        let store = CartStore::open(kv.clone()).await;

        store.add_to_cart(test_product("p1", 10.0)).await.unwrap();

        kv.set_fail_writes(true);
        let err = store.increment("p1").await.unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed(_)));

        // Memory took the mutation; the mirror is one write behind.
        assert_eq!(store.items()[0].quantity, 2);
        assert_eq!(mirror_items(&kv).await[0].quantity, 1);

        // Next successful write catches the mirror up.
        kv.set_fail_writes(false);
        store.increment("p1").await.unwrap();
        assert_eq!(mirror_items(&kv).await, store.items());
    }

    #[tokio::test]
    async fn test_with_cart_reads_under_the_lock() {
        let kv = Arc::new(MemoryKvStore::new());
        let store = CartStore::open(kv).await;

        store.add_to_cart(test_product("p1", 10.0)).await.unwrap();
        store.add_to_cart(test_product("p2", 5.5)).await.unwrap();

        let (count, total) = store.with_cart(|c| (c.item_count(), c.total_quantity()));
        assert_eq!(count, 2);
        assert_eq!(total, 2);
    }
}
