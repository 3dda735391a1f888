//! Plain-text rendering of storefront snapshots.

use shopfront::views::{CartItemView, CartView, ProductCardView, StorefrontView};

/// Product listing with the active selectors and a cart summary.
pub fn products(view: &StorefrontView) -> String {
    let mut lines = vec![selection(view)];
    match view.empty_message() {
        Some(message) => lines.push(message.to_string()),
        None => lines.extend(view.products.iter().map(product_card)),
    }
    lines.push(String::new());
    lines.push(summary(view));
    lines.join("\n")
}

/// Category navigation entries, marking the active one.
pub fn categories(view: &StorefrontView) -> String {
    let active = view.category.as_deref();
    let all = if active.is_none() { "* All" } else { "  All" };

    std::iter::once(all.to_string())
        .chain(view.categories.iter().map(|category| {
            let marker = if active == Some(category.to_lowercase().as_str()) {
                '*'
            } else {
                ' '
            };
            format!("{marker} {category}")
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cart lines followed by the subtotal.
pub fn cart(view: &CartView) -> String {
    if let Some(message) = view.empty_message() {
        return message.to_string();
    }

    let mut lines: Vec<String> = view.items.iter().map(cart_item).collect();
    lines.push(format!(
        "Subtotal: {} ({} {})",
        view.subtotal,
        view.item_count,
        plural(view.item_count as usize, "item", "items")
    ));
    lines.join("\n")
}

/// Favourite products, or a placeholder when there are none.
pub fn favourites(view: &StorefrontView) -> String {
    if view.favourites.is_empty() {
        return "No favourites yet".to_string();
    }

    let mut lines: Vec<String> = view.favourites.iter().map(product_card).collect();
    lines.push(format!(
        "{} {}",
        view.favourites_count,
        plural(view.favourites_count, "favourite", "favourites")
    ));
    lines.join("\n")
}

/// One-line header badge counts.
pub fn summary(view: &StorefrontView) -> String {
    format!(
        "Cart: {} {} ({}) | Favourites: {}",
        view.cart.item_count,
        plural(view.cart.item_count as usize, "item", "items"),
        view.cart.subtotal,
        view.favourites_count
    )
}

fn selection(view: &StorefrontView) -> String {
    let mut line = format!(
        "Showing {} {}",
        view.products.len(),
        plural(view.products.len(), "product", "products")
    );
    if let Some(category) = &view.category {
        line.push_str(" in ");
        line.push_str(category);
    }
    if let Some(search) = &view.search {
        line.push_str(" matching \"");
        line.push_str(search);
        line.push('"');
    }
    line
}

fn product_card(card: &ProductCardView) -> String {
    let mut line = format!("[{}] {} ({}) {}", card.id, card.name, card.category, card.price);
    if let Some(old_price) = &card.old_price {
        line.push_str(" was ");
        line.push_str(old_price);
    }
    line.push_str("  [");
    line.push_str(card.cart_label());
    line.push(']');
    if card.is_favourite {
        line.push_str(" [favourite]");
    }
    line
}

fn cart_item(item: &CartItemView) -> String {
    format!(
        "{}. [{}] {} x{} @ {} = {}",
        item.index + 1,
        item.id,
        item.title,
        item.quantity,
        item.price,
        item.line_price
    )
}

const fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
