//! The shopping cart.
//!
//! Lines are kept in insertion order with at most one line per product id.
//! Quantity changes and removal are addressed by position in that order, as
//! rendered; callers holding an id use [`Cart::position`] first.
//!
//! Every mutation writes the whole cart to the `cart` slot. Storage failures
//! are logged and never surface to callers.

use std::sync::Arc;

use shopfront_core::{CartLine, Price, Product, ProductId};
use tracing::{debug, warn};

use crate::storage::{Slot, Storage, keys};

/// Ordered cart lines backed by a storage slot.
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    slot: Slot,
}

impl Cart {
    /// Load the cart from storage.
    ///
    /// Absent or corrupt data gives an empty cart. Duplicate lines for one
    /// product are merged, keeping the first position and summing quantities.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let slot = Slot::new(storage, keys::CART);
        let lines = merge_duplicates(slot.load());
        debug!(lines = lines.len(), "Cart loaded");
        Self { lines, slot }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Position of the line for `id`.
    #[must_use]
    pub fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|line| &line.product.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Add one unit of `product`, returning the line's new quantity.
    ///
    /// Increments the existing line for this id, or appends a new line holding
    /// a copy of the product.
    pub fn add(&mut self, product: &Product) -> u32 {
        let quantity = if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.increment();
            line.quantity()
        } else {
            self.lines.push(CartLine::new(product.clone()));
            1
        };
        debug!(id = %product.id, quantity, "Added to cart");
        self.persist();
        quantity
    }

    /// Add one unit to the line at `index`.
    ///
    /// Returns `None` and changes nothing when `index` is out of range.
    pub fn increase(&mut self, index: usize) -> Option<&CartLine> {
        self.lines.get_mut(index)?.increment();
        self.persist();
        self.lines.get(index)
    }

    /// Remove one unit from the line at `index`, never going below 1.
    ///
    /// Returns `None` and changes nothing when `index` is out of range.
    pub fn decrease(&mut self, index: usize) -> Option<&CartLine> {
        self.lines.get_mut(index)?.decrement();
        self.persist();
        self.lines.get(index)
    }

    /// Remove and return the line at `index`.
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        if index >= self.lines.len() {
            return None;
        }
        let removed = self.lines.remove(index);
        debug!(id = %removed.product.id, "Removed from cart");
        self.persist();
        Some(removed)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Sum of line subtotals; lines without a price count as zero.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity()))
    }

    fn persist(&self) {
        if let Err(e) = self.slot.save(&self.lines) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}

fn merge_duplicates(stored: Vec<CartLine>) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());
    for line in stored {
        if let Some(existing) = lines.iter_mut().find(|l| l.product.id == line.product.id) {
            warn!(id = %line.product.id, "Merging duplicate cart line");
            let quantity = existing.quantity().saturating_add(line.quantity());
            *existing = CartLine::with_quantity(existing.product.clone(), quantity);
        } else {
            lines.push(line);
        }
    }
    lines
}
