//! Session state owned by the presentation layer.
//!
//! A [`Session`] holds everything one storefront session works with: the
//! catalog, the cart, the favourites and the active filter. The presentation
//! layer calls its operations in response to user events, subscribes to
//! [`StateChange`] notifications, and renders from [`Session::snapshot`].

use std::sync::Arc;

use shopfront_core::{CartLine, Product, ProductId};
use tracing::debug;

use crate::cart::Cart;
use crate::catalog::{Catalog, CatalogStore};
use crate::config::ShopConfig;
use crate::error::{self, Result};
use crate::favourites::{Favourites, Toggle};
use crate::filter::ProductFilter;
use crate::storage::{FileStorage, Storage};
use crate::views::{CartView, ProductCardView, StorefrontView};

/// Notification sent to listeners after the session changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// A catalog was loaded.
    CatalogLoaded { products: usize },
    /// Loading the catalog failed; the session continues with an empty one.
    CatalogUnavailable,
    /// The filter selection changed.
    FilterApplied { matches: usize },
    /// A cart line for this product changed or was removed.
    CartUpdated { id: ProductId },
    /// Every cart line was removed.
    CartCleared,
    /// This product was added to or removed from the favourites.
    FavouritesUpdated { id: ProductId },
}

type Listener = Box<dyn Fn(&StateChange) + Send>;

/// State for one storefront session.
pub struct Session {
    catalog: Catalog,
    cart: Cart,
    favourites: Favourites,
    filter: ProductFilter,
    listeners: Vec<Listener>,
}

impl Session {
    /// Start a session with an empty catalog, restoring the cart and
    /// favourites from `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            catalog: Catalog::default(),
            cart: Cart::load(storage.clone()),
            favourites: Favourites::load(storage),
            filter: ProductFilter::default(),
            listeners: Vec::new(),
        }
    }

    /// Start a session and load its catalog.
    ///
    /// A catalog failure is reported and leaves the catalog empty.
    pub async fn open(store: &CatalogStore, storage: Arc<dyn Storage>) -> Self {
        let mut session = Self::new(storage);
        session.load_catalog(store).await;
        session
    }

    /// Start a session from configuration, using file-backed storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be opened. Catalog
    /// failures do not fail the session.
    pub async fn from_config(config: &ShopConfig) -> Result<Self> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&config.storage_dir)?);
        let store = CatalogStore::new(config.catalog.clone(), storage.clone());
        Ok(Self::open(&store, storage).await)
    }

    /// Register a listener for state changes.
    pub fn subscribe(&mut self, listener: impl Fn(&StateChange) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Fetch the catalog from `store`, replacing the current one on success.
    ///
    /// Returns whether a catalog was loaded.
    pub async fn load_catalog(&mut self, store: &CatalogStore) -> bool {
        match store.load().await {
            Ok(catalog) => {
                self.set_catalog(catalog);
                true
            }
            Err(e) => {
                error::report(&e, "catalog load");
                self.emit(&StateChange::CatalogUnavailable);
                false
            }
        }
    }

    /// Replace the catalog. Stored cart lines and favourites keep their own
    /// copies and are not affected.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.emit(&StateChange::CatalogLoaded {
            products: self.catalog.len(),
        });
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn favourites(&self) -> &Favourites {
        &self.favourites
    }

    #[must_use]
    pub const fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Set the category and search selectors and return the matches.
    pub fn apply_filter(&mut self, category: Option<&str>, search: Option<&str>) -> Vec<&Product> {
        self.filter = ProductFilter::new(category, search);
        let matches = self.filter.apply(self.catalog.products()).len();
        debug!(filter = ?self.filter, matches, "Filter applied");
        self.emit(&StateChange::FilterApplied { matches });
        self.visible_products()
    }

    /// Catalog products matching the active filter.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.apply(self.catalog.products())
    }

    /// Add one unit of the catalog product `id` to the cart.
    ///
    /// Returns the line's new quantity, or `None` for an id not in the catalog.
    pub fn add_to_cart(&mut self, id: &ProductId) -> Option<u32> {
        let product = self.catalog.get(id)?;
        let quantity = self.cart.add(product);
        let product_id = id.to_string();
        error::add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product_id.as_str())]),
        );
        self.emit(&StateChange::CartUpdated { id: id.clone() });
        Some(quantity)
    }

    /// Add one unit to the cart line at `index`.
    pub fn increase_quantity(&mut self, index: usize) -> Option<u32> {
        let (id, quantity) = self
            .cart
            .increase(index)
            .map(|line| (line.product.id.clone(), line.quantity()))?;
        self.emit(&StateChange::CartUpdated { id });
        Some(quantity)
    }

    /// Remove one unit from the cart line at `index`, keeping at least one.
    pub fn decrease_quantity(&mut self, index: usize) -> Option<u32> {
        let (id, quantity) = self
            .cart
            .decrease(index)
            .map(|line| (line.product.id.clone(), line.quantity()))?;
        self.emit(&StateChange::CartUpdated { id });
        Some(quantity)
    }

    /// Remove the cart line at `index`.
    pub fn remove_from_cart(&mut self, index: usize) -> Option<CartLine> {
        let removed = self.cart.remove(index)?;
        let id = removed.product.id.clone();
        let product_id = id.to_string();
        error::add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", product_id.as_str())]),
        );
        self.emit(&StateChange::CartUpdated { id });
        Some(removed)
    }

    /// Remove every cart line.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.emit(&StateChange::CartCleared);
    }

    /// Flip favourite membership of the catalog product `id`.
    pub fn toggle_favourite(&mut self, id: &ProductId) -> Toggle {
        let outcome = self.favourites.toggle(&self.catalog, id);
        if outcome != Toggle::Unknown {
            let product_id = id.to_string();
            error::add_breadcrumb(
                "favourites",
                "Toggled favourite",
                Some(&[("product_id", product_id.as_str())]),
            );
            self.emit(&StateChange::FavouritesUpdated { id: id.clone() });
        }
        outcome
    }

    /// Build a render snapshot of the whole session.
    #[must_use]
    pub fn snapshot(&self) -> StorefrontView {
        let card = |product: &Product| {
            ProductCardView::new(
                product,
                self.cart.contains(&product.id),
                self.favourites.contains(&product.id),
            )
        };

        StorefrontView {
            products: self.visible_products().into_iter().map(card).collect(),
            categories: self
                .catalog
                .categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
            category: self.filter.category().map(str::to_string),
            search: self.filter.search().map(str::to_string),
            cart: CartView::from(&self.cart),
            favourites: self.favourites.items().iter().map(card).collect(),
            favourites_count: self.favourites.count(),
        }
    }

    fn emit(&self, change: &StateChange) {
        for listener in &self.listeners {
            listener(change);
        }
    }
}
