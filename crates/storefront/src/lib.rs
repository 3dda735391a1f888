//! Shopfront library.
//!
//! Client-side storefront state: a catalog loaded once per session, product
//! filtering by category and search text, and a cart and favourites list that
//! persist to durable key-value storage after every change.
//!
//! # Modules
//!
//! - [`storage`] - Durable slots (`products`, `cart`, `favourites`)
//! - [`catalog`] - Catalog source and one-shot loading
//! - [`filter`] - Category and search filtering
//! - [`cart`] - Cart lines, quantities and totals
//! - [`favourites`] - Favourite products
//! - [`state`] - The per-session state object and change notifications
//! - [`views`] - Render snapshots for the presentation layer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favourites;
pub mod filter;
pub mod state;
pub mod storage;
pub mod views;

pub use cart::Cart;
pub use catalog::{Catalog, CatalogError, CatalogSource, CatalogStore};
pub use config::{ConfigError, ShopConfig};
pub use error::ShopError;
pub use favourites::{Favourites, Toggle};
pub use filter::ProductFilter;
pub use state::{Session, StateChange};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use views::StorefrontView;
