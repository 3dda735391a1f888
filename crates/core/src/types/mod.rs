//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod cart_line;
pub mod id;
pub mod price;
pub mod product;

pub use cart_line::CartLine;
pub use id::ProductId;
pub use price::{Price, PriceError};
pub use product::Product;
