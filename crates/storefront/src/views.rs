//! Display snapshots for the presentation layer.
//!
//! Views are plain data built from the session after every change. They carry
//! formatted prices and membership flags so a renderer never has to consult
//! the cart or favourites itself.

use shopfront_core::{CartLine, Product, ProductId};

use crate::cart::Cart;

/// Shown instead of a product list when a filter matches nothing.
pub const NO_PRODUCTS_MESSAGE: &str = "No products found matching your criteria";

/// Shown instead of cart lines when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// Product card display data.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    pub alt: String,
    pub category: String,
    pub image: String,
    pub price: String,
    pub old_price: Option<String>,
    pub in_cart: bool,
    pub is_favourite: bool,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, in_cart: bool, is_favourite: bool) -> Self {
        Self {
            id: product.id.clone(),
            name: product.display_name().to_string(),
            alt: product.alt_text().to_string(),
            category: product.display_category().to_string(),
            image: product.display_image().to_string(),
            price: product.price().display(),
            old_price: product.old_price.map(|p| p.display()),
            in_cart,
            is_favourite,
        }
    }

    /// Label for the add-to-cart button.
    #[must_use]
    pub const fn cart_label(&self) -> &'static str {
        if self.in_cart { "Added" } else { "Add to cart" }
    }
}

/// Cart line display data.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemView {
    /// Position in the cart, used to address quantity changes and removal.
    pub index: usize,
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl CartItemView {
    #[must_use]
    pub fn new(index: usize, line: &CartLine) -> Self {
        Self {
            index,
            id: line.product.id.clone(),
            title: line.product.display_name().to_string(),
            image: line.product.display_image().to_string(),
            quantity: line.quantity(),
            price: line.product.price().display(),
            line_price: line.subtotal().display(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Placeholder text when there is nothing to list.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_CART_MESSAGE)
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(index, line)| CartItemView::new(index, line))
                .collect(),
            subtotal: cart.total().display(),
            item_count: cart.count(),
        }
    }
}

/// Everything needed to render the storefront.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontView {
    /// Products matching the active filter, in catalog order.
    pub products: Vec<ProductCardView>,
    /// Category navigation entries.
    pub categories: Vec<String>,
    /// Active category selector, normalized.
    pub category: Option<String>,
    /// Active search phrase, normalized.
    pub search: Option<String>,
    pub cart: CartView,
    pub favourites: Vec<ProductCardView>,
    pub favourites_count: usize,
}

impl StorefrontView {
    /// Placeholder text when the filter matched nothing.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        self.products.is_empty().then_some(NO_PRODUCTS_MESSAGE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use shopfront_core::Price;

    use super::*;
    use crate::storage::{MemoryStorage, Storage};

    #[test]
    fn test_product_card_fallbacks() {
        let card = ProductCardView::new(&Product::new(1), false, false);

        assert_eq!(card.name, "Unnamed Product");
        assert_eq!(card.alt, "Product");
        assert_eq!(card.category, "Uncategorized");
        assert_eq!(card.image, "img/placeholder.png");
        assert_eq!(card.price, "$0.00");
        assert_eq!(card.old_price, None);
        assert_eq!(card.cart_label(), "Add to cart");
    }

    #[test]
    fn test_product_card_full() {
        let mut product = Product::new(1)
            .with_name("Shoe")
            .with_category("Footwear")
            .with_price(20);
        product.old_price = Some(Price::from(25));
        product.image = Some("img/shoe.png".to_string());

        let card = ProductCardView::new(&product, true, true);

        assert_eq!(card.alt, "Shoe");
        assert_eq!(card.image, "img/shoe.png");
        assert_eq!(card.price, "$20.00");
        assert_eq!(card.old_price.as_deref(), Some("$25.00"));
        assert_eq!(card.cart_label(), "Added");
    }

    #[test]
    fn test_cart_view() {
        let mut cart = Cart::load(Arc::new(MemoryStorage::new()));
        assert_eq!(CartView::from(&cart), CartView::empty());
        assert_eq!(CartView::empty().empty_message(), Some(EMPTY_CART_MESSAGE));

        let shoe = Product::new(1).with_name("Shoe").with_price(10);
        let shirt = Product::new(2).with_name("Shirt").with_price(5);
        cart.add(&shoe);
        cart.add(&shoe);
        cart.add(&shirt);

        let view = CartView::from(&cart);

        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$25.00");
        assert_eq!(view.items[0].line_price, "$20.00");
        assert_eq!(view.items[1].index, 1);
        assert_eq!(view.items[1].price, "$5.00");
        assert_eq!(view.empty_message(), None);
    }

    #[test]
    fn test_cart_view_of_oversized_stored_cart() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                crate::storage::keys::CART,
                r#"[{"id":1,"name":"Crate","price":1e20,"quantity":4000000000}]"#,
            )
            .unwrap();

        let view = CartView::from(&Cart::load(storage));

        assert_eq!(view.item_count, 4_000_000_000);
        assert_eq!(view.subtotal, "$79228162514264337593543950335.00");
        assert_eq!(view.items[0].line_price, view.subtotal);
    }
}
