//! Product listing commands.

use shopfront::Session;

use crate::render;

/// List products matching the category and search selectors.
pub fn list(session: &mut Session, category: Option<&str>, search: Option<&str>) -> String {
    let matches = session.apply_filter(category, search).len();
    tracing::debug!(matches, "Listing products");
    render::products(&session.snapshot())
}

/// List catalog categories.
pub fn categories(session: &Session) -> String {
    render::categories(&session.snapshot())
}
