//! # Cart Store
//!
//! Owns the current cart, serialises every mutation, mirrors each accepted
//! change into the persistence slot and publishes the new snapshot.
//!
//! ## Mutation Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Mutation (mutation lock held)                    │
//! │                                                                         │
//! │   read snapshot ──► stock check ──► (product fetch) ──► transition      │
//! │        │               │ CatalogService    │                 │          │
//! │        │               ▼                   ▼                 ▼          │
//! │        │         OutOfStock /        Catalog error     encode + write   │
//! │        │         Catalog error                          to the slot     │
//! │        │               │                   │                 │          │
//! │        │               └─────────┬─────────┘                 ▼          │
//! │        │                         ▼                     watch::send      │
//! │        │              one Notifier message             (publish)        │
//! │        │              cart left untouched                               │
//! │        ▼                                                                │
//! │   readers never take the lock: cart() / subscribe() see the last       │
//! │   published snapshot                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lock is held across catalog calls, so two `add(id)` calls racing on
//! the same product always see each other's result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rocketshoes_core::validation::validate_amount;
use rocketshoes_core::{Cart, LineItem, ProductId, DEFAULT_CART_KEY};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::catalog::CatalogService;
use crate::config::{CartConfig, Messages};
use crate::error::{CartError, CartOperation, CartResult, CatalogError};
use crate::notifier::Notifier;
use crate::slot::{decode_cart, encode_cart, PersistenceSlot};

/// Shared handle injected into every cart consumer.
pub type CartHandle = Arc<CartStore>;

// =============================================================================
// Snapshot
// =============================================================================

/// A published state of the cart.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    pub cart: Arc<Cart>,
    /// Incremented on every accepted mutation. The loaded cart is revision 0.
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
}

impl CartSnapshot {
    fn initial(cart: Cart) -> Self {
        CartSnapshot {
            cart: Arc::new(cart),
            revision: 0,
            updated_at: Utc::now(),
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Store-level settings taken from [`CartConfig`].
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub storage_key: String,
    pub messages: Messages,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            storage_key: DEFAULT_CART_KEY.to_string(),
            messages: Messages::default(),
        }
    }
}

impl From<&CartConfig> for StoreSettings {
    fn from(config: &CartConfig) -> Self {
        StoreSettings {
            storage_key: config.storage.key.clone(),
            messages: config.messages.clone(),
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// The cart store.
///
/// Created once at application start with [`CartStore::open`] and shared as a
/// [`CartHandle`].
pub struct CartStore {
    catalog: Arc<dyn CatalogService>,
    slot: Arc<dyn PersistenceSlot>,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
    messages: Messages,
    state: watch::Sender<CartSnapshot>,
    mutation: Mutex<()>,
}

impl CartStore {
    /// Opens the store, restoring whatever cart the slot holds.
    ///
    /// An unreadable or malformed slot is logged and the store starts empty.
    /// The slot is left as is until the next accepted mutation.
    pub fn open(
        catalog: Arc<dyn CatalogService>,
        slot: Arc<dyn PersistenceSlot>,
        notifier: Arc<dyn Notifier>,
        settings: StoreSettings,
    ) -> CartHandle {
        let cart = Self::restore(slot.as_ref(), &settings.storage_key);
        info!(
            key = %settings.storage_key,
            lines = cart.len(),
            "Cart store opened"
        );

        let (state, _) = watch::channel(CartSnapshot::initial(cart));

        Arc::new(CartStore {
            catalog,
            slot,
            notifier,
            storage_key: settings.storage_key,
            messages: settings.messages,
            state,
            mutation: Mutex::new(()),
        })
    }

    fn restore(slot: &dyn PersistenceSlot, key: &str) -> Cart {
        match slot.read(key) {
            Ok(Some(bytes)) => match decode_cart(&bytes) {
                Ok(cart) => cart,
                Err(e) => {
                    warn!(key = %key, error = %e, "Stored cart is unreadable, starting empty");
                    Cart::new()
                }
            },
            Ok(None) => {
                debug!(key = %key, "No stored cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read stored cart, starting empty");
                Cart::new()
            }
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current cart.
    pub fn cart(&self) -> Arc<Cart> {
        Arc::clone(&self.state.borrow().cart)
    }

    /// Current snapshot, including its revision.
    pub fn snapshot(&self) -> CartSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver observing every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.state.subscribe()
    }

    /// Slot key the cart is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Checks whether the catalog can cover `requested` units of a product.
    pub async fn has_available_stock(&self, id: ProductId, requested: u32) -> CartResult<bool> {
        let stock = self.catalog.stock(id).await?;
        Ok(stock.covers(requested))
    }

    async fn ensure_stock(&self, id: ProductId, requested: u32) -> CartResult<()> {
        let stock = self.catalog.stock(id).await?;
        if stock.covers(requested) {
            Ok(())
        } else {
            Err(CartError::OutOfStock {
                product_id: id,
                available: stock.amount,
                requested,
            })
        }
    }

    // =========================================================================
    // Typed Mutations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// A new product is fetched from the catalog and appended with amount 1;
    /// an existing line is incremented in place.
    pub async fn try_add(&self, id: ProductId) -> CartResult<CartSnapshot> {
        let _guard = self.mutation.lock().await;
        debug!(product_id = %id, "add");

        let current = self.cart();
        let requested = validate_amount(i64::from(current.amount_of(id)) + 1)
            .map_err(CartError::Validation)?;

        self.ensure_stock(id, requested).await?;

        let next = if current.contains(id) {
            current.with_incremented(id)?
        } else {
            let product = self.catalog.product(id).await?;
            if product.id != id {
                return Err(CatalogError::Decode(format!(
                    "asked for product {}, catalog answered with {}",
                    id, product.id
                ))
                .into());
            }
            current.with_appended(LineItem::from_product(&product, 1))?
        };

        self.commit(CartOperation::Add, next)
    }

    /// Removes the line of a product.
    pub async fn try_remove(&self, id: ProductId) -> CartResult<CartSnapshot> {
        let _guard = self.mutation.lock().await;
        debug!(product_id = %id, "remove");

        let next = self.cart().without(id)?;
        self.commit(CartOperation::Remove, next)
    }

    /// Sets the amount of a line already in the cart.
    ///
    /// Returns `Ok(None)` when `amount <= 0`: the request is ignored without
    /// touching the catalog, the slot or the subscribers.
    pub async fn try_update_amount(
        &self,
        id: ProductId,
        amount: i64,
    ) -> CartResult<Option<CartSnapshot>> {
        if amount <= 0 {
            debug!(product_id = %id, amount, "update_amount ignored");
            return Ok(None);
        }
        let amount = validate_amount(amount).map_err(CartError::Validation)?;

        let _guard = self.mutation.lock().await;
        debug!(product_id = %id, amount, "update_amount");

        self.ensure_stock(id, amount).await?;

        let next = self.cart().with_amount(id, amount)?;
        self.commit(CartOperation::UpdateAmount, next).map(Some)
    }

    /// Persists `next`, then publishes it. Caller holds the mutation lock.
    fn commit(&self, operation: CartOperation, next: Cart) -> CartResult<CartSnapshot> {
        let bytes = encode_cart(&next)?;
        self.slot.write(&self.storage_key, &bytes)?;

        let snapshot = CartSnapshot {
            cart: Arc::new(next),
            revision: self.state.borrow().revision + 1,
            updated_at: Utc::now(),
        };
        self.state.send_replace(snapshot.clone());

        info!(
            %operation,
            revision = snapshot.revision,
            lines = snapshot.cart.len(),
            "Cart updated"
        );
        Ok(snapshot)
    }

    // =========================================================================
    // UI Boundary
    // =========================================================================

    /// Adds one unit of a product, notifying the user on failure.
    pub async fn add(&self, id: ProductId) {
        if let Err(e) = self.try_add(id).await {
            self.report(CartOperation::Add, &e);
        }
    }

    /// Removes a product, notifying the user on failure.
    pub async fn remove(&self, id: ProductId) {
        if let Err(e) = self.try_remove(id).await {
            self.report(CartOperation::Remove, &e);
        }
    }

    /// Sets a product's amount, notifying the user on failure.
    pub async fn update_amount(&self, id: ProductId, amount: i64) {
        if let Err(e) = self.try_update_amount(id, amount).await {
            self.report(CartOperation::UpdateAmount, &e);
        }
    }

    fn report(&self, operation: CartOperation, error: &CartError) {
        let message = error.user_message(operation, &self.messages);
        warn!(
            %operation,
            kind = ?error.kind(),
            error = %error,
            "Cart operation failed"
        );
        self.notifier.error(message);
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.storage_key)
            .field("revision", &self.state.borrow().revision)
            .finish_non_exhaustive()
    }
}
