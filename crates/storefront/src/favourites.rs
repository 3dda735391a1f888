//! Favourite products.

use std::collections::HashSet;
use std::sync::Arc;

use shopfront_core::{Product, ProductId};
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::storage::{Slot, Storage, keys};

/// Outcome of [`Favourites::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The product was added.
    Added,
    /// The product was removed.
    Removed,
    /// The id is not in the catalog; nothing changed.
    Unknown,
}

/// Favourite products, unique by id, in the order they were added.
#[derive(Debug)]
pub struct Favourites {
    items: Vec<Product>,
    slot: Slot,
}

impl Favourites {
    /// Load favourites from storage, dropping repeated ids.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let slot = Slot::new(storage, keys::FAVOURITES);
        let stored: Vec<Product> = slot.load();
        let total = stored.len();

        let mut seen = HashSet::new();
        let items: Vec<Product> = stored
            .into_iter()
            .filter(|p| seen.insert(p.id.clone()))
            .collect();
        if items.len() < total {
            warn!(dropped = total - items.len(), "Dropped duplicate favourites");
        }

        Self { items, slot }
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == id)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Flip membership of the catalog product `id`.
    ///
    /// Only products present in `catalog` can be favourited; an unknown id
    /// leaves the collection and storage untouched.
    pub fn toggle(&mut self, catalog: &Catalog, id: &ProductId) -> Toggle {
        let Some(product) = catalog.get(id) else {
            debug!(%id, "Ignoring favourite toggle for unknown product");
            return Toggle::Unknown;
        };

        let outcome = if self.contains(id) {
            self.items.retain(|p| &p.id != id);
            Toggle::Removed
        } else {
            self.items.push(product.clone());
            Toggle::Added
        };

        debug!(%id, ?outcome, "Toggled favourite");
        if let Err(e) = self.slot.save(&self.items) {
            warn!(error = %e, "Failed to persist favourites");
        }
        outcome
    }
}
