//! Command implementations. Each returns the text to print.

pub mod cart;
pub mod favourites;
pub mod products;
