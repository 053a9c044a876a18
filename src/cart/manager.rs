//! Cart manager: in-memory cart mirrored to a storage slot
//!
//! The in-memory cart is authoritative for the session. Every mutation is
//! written through to storage; a failed write is reported back to the caller
//! as a warning and never undoes the mutation.

use tracing::{debug, warn};

use super::state::{self, QuantityChange};
use super::totals::{compute_totals, Totals};
use super::CartLine;
use crate::catalog::Product;
use crate::storage::{CartStorage, StorageError};

/// Storage key holding the serialized cart
pub const CART_STORAGE_KEY: &str = "cart";

/// Outcome of a cart mutation
#[derive(Debug)]
pub struct CartUpdate<T> {
    /// What the operation produced
    pub value: T,
    /// Set when the cart changed in memory but could not be persisted
    pub warning: Option<StorageError>,
}

impl<T> CartUpdate<T> {
    /// Whether the change reached storage
    pub fn is_persisted(&self) -> bool {
        self.warning.is_none()
    }
}

/// Owns the cart for one session
#[derive(Debug)]
pub struct CartManager<S> {
    storage: S,
    lines: Vec<CartLine>,
}

impl<S: CartStorage> CartManager<S> {
    /// Loads the cart from `storage`
    ///
    /// A missing, unreadable, or corrupt slot gives an empty cart. Loaded
    /// lines are normalized so a hand-edited slot cannot break invariants.
    pub fn hydrate(storage: S) -> Self {
        let lines = match storage.load(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => state::normalize(lines),
                Err(e) => {
                    warn!(error = %e, "stored cart is unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("no stored cart, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "cart storage unavailable, starting empty");
                Vec::new()
            }
        };

        debug!(lines = lines.len(), "cart hydrated");
        Self { storage, lines }
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: u64) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The backing store
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Adds one unit of `product` and returns the resulting line
    pub fn add_item(&mut self, product: &Product) -> CartUpdate<CartLine> {
        let line = state::add(&mut self.lines, product).clone();
        debug!(id = line.id, quantity = line.quantity, "added to cart");
        self.persisted(line)
    }

    /// Removes the line for `id`, returning it if it was in the cart
    pub fn remove_item(&mut self, id: u64) -> CartUpdate<Option<CartLine>> {
        let removed = state::remove(&mut self.lines, id);
        debug!(id, removed = removed.is_some(), "remove from cart");
        self.persisted(removed)
    }

    /// Sets the quantity of the line for `id`
    ///
    /// Zero or less behaves like [`remove_item`](Self::remove_item). An id not
    /// in the cart is ignored.
    pub fn set_quantity(&mut self, id: u64, quantity: i64) -> CartUpdate<QuantityChange> {
        if quantity <= 0 {
            let removed = self.remove_item(id);
            return CartUpdate {
                value: removed
                    .value
                    .map_or(QuantityChange::Unchanged, QuantityChange::Removed),
                warning: removed.warning,
            };
        }

        match state::set_quantity(&mut self.lines, id, quantity) {
            QuantityChange::Unchanged => CartUpdate {
                value: QuantityChange::Unchanged,
                warning: None,
            },
            change => self.persisted(change),
        }
    }

    /// Empties the cart
    ///
    /// Asking the user first is the caller's job.
    pub fn clear(&mut self) -> CartUpdate<()> {
        self.lines.clear();
        debug!("cart cleared");
        self.persisted(())
    }

    /// Total units in the cart, for badge display
    pub fn item_count(&self) -> u64 {
        state::item_count(&self.lines)
    }

    pub fn compute_totals(&self) -> Totals {
        compute_totals(&self.lines)
    }

    fn persisted<T>(&self, value: T) -> CartUpdate<T> {
        CartUpdate {
            value,
            warning: self.persist().err(),
        }
    }

    /// Writes the whole cart to its slot
    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.lines)
            .map_err(|e| StorageError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

        self.storage.save(CART_STORAGE_KEY, &json).inspect_err(|e| {
            warn!(error = %e, "failed to persist cart, keeping it in memory");
        })
    }
}
