//! Cart commands.
//!
//! Cart lines are addressed by position; these commands take a product id and
//! resolve it to the line holding that product.

use shopfront::Session;
use shopfront_core::ProductId;

use crate::render;

/// Show cart lines and totals.
pub fn show(session: &Session) -> String {
    render::cart(&session.snapshot().cart)
}

/// Add one unit of a catalog product.
pub fn add(session: &mut Session, id: &ProductId) -> String {
    match session.add_to_cart(id) {
        Some(quantity) => {
            tracing::info!(product_id = %id, quantity, "Added to cart");
            format!("Added {id} (quantity {quantity})\n{}", show(session))
        }
        None => not_in_catalog(id),
    }
}

/// Add one unit to an existing cart line.
pub fn increase(session: &mut Session, id: &ProductId) -> String {
    let Some(index) = session.cart().position(id) else {
        return not_in_cart(id);
    };
    match session.increase_quantity(index) {
        Some(quantity) => format!("{id} quantity is now {quantity}\n{}", show(session)),
        None => not_in_cart(id),
    }
}

/// Remove one unit from an existing cart line, keeping at least one.
pub fn decrease(session: &mut Session, id: &ProductId) -> String {
    let Some(index) = session.cart().position(id) else {
        return not_in_cart(id);
    };
    match session.decrease_quantity(index) {
        Some(quantity) => format!("{id} quantity is now {quantity}\n{}", show(session)),
        None => not_in_cart(id),
    }
}

/// Remove a product's line from the cart.
pub fn remove(session: &mut Session, id: &ProductId) -> String {
    let Some(index) = session.cart().position(id) else {
        return not_in_cart(id);
    };
    match session.remove_from_cart(index) {
        Some(line) => format!(
            "Removed {}\n{}",
            line.product.display_name(),
            show(session)
        ),
        None => not_in_cart(id),
    }
}

/// Remove every cart line.
pub fn clear(session: &mut Session) -> String {
    session.clear_cart();
    show(session)
}

fn not_in_catalog(id: &ProductId) -> String {
    tracing::warn!(product_id = %id, "Product not in catalog");
    format!("No product with id {id}")
}

fn not_in_cart(id: &ProductId) -> String {
    tracing::warn!(product_id = %id, "Product not in cart");
    format!("Product {id} is not in the cart")
}
