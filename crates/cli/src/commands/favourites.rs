//! Favourites commands.

use shopfront::{Session, Toggle};
use shopfront_core::ProductId;

use crate::render;

/// List favourites.
pub fn show(session: &Session) -> String {
    render::favourites(&session.snapshot())
}

/// Add or remove a catalog product from the favourites.
pub fn toggle(session: &mut Session, id: &ProductId) -> String {
    let outcome = session.toggle_favourite(id);
    let count = session.favourites().count();
    match outcome {
        Toggle::Added => format!("Added {id} to favourites ({count} total)"),
        Toggle::Removed => format!("Removed {id} from favourites ({count} total)"),
        Toggle::Unknown => {
            tracing::warn!(product_id = %id, "Product not in catalog");
            format!("No product with id {id}")
        }
    }
}
