//! End-to-end storefront flows: browse, filter, fill the cart, favourite.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::{Arc, Mutex};

use shopfront::{Session, StateChange, Toggle};
use shopfront_core::ProductId;
use shopfront_integration_tests::TestContext;

const TWO_PRODUCTS: &str = r#"[
    {"id": 1, "name": "Shoe", "category": "Footwear", "price": 20},
    {"id": 2, "name": "Shirt", "category": "Apparel", "price": 10}
]"#;

fn names(session: &Session) -> Vec<String> {
    session
        .snapshot()
        .products
        .into_iter()
        .map(|card| card.name)
        .collect()
}

#[tokio::test]
async fn test_filter_two_product_catalog() {
    let ctx = TestContext::with_catalog(TWO_PRODUCTS).unwrap();
    let mut session = Session::from_config(&ctx.config()).await.unwrap();

    session.apply_filter(Some("footwear"), Some(""));
    assert_eq!(names(&session), vec!["Shoe"]);

    session.apply_filter(Some(""), Some("sh"));
    assert_eq!(names(&session), vec!["Shoe", "Shirt"]);

    session.apply_filter(Some("apparel"), Some("sh"));
    assert_eq!(names(&session), vec!["Shirt"]);

    session.apply_filter(Some("apparel"), Some("shoe"));
    assert!(names(&session).is_empty());
}

#[tokio::test]
async fn test_snapshot_fallbacks_and_synonyms() {
    let ctx = TestContext::new().unwrap();
    let session = Session::from_config(&ctx.config()).await.unwrap();
    let view = session.snapshot();

    assert_eq!(view.categories, vec!["Footwear", "Tops"]);

    let shirt = &view.products[1];
    assert_eq!(shirt.category, "Tops");
    assert_eq!(shirt.price, "$15.50");
    assert_eq!(shirt.image, "img/placeholder.png");

    let unnamed = &view.products[3];
    assert_eq!(unnamed.name, "Unnamed Product");
    assert_eq!(unnamed.alt, "Product");
    assert_eq!(unnamed.category, "Uncategorized");

    let shoe = &view.products[0];
    assert_eq!(shoe.image, "img/shoe.png");
    assert_eq!(shoe.old_price.as_deref(), Some("$25.00"));
}

#[tokio::test]
async fn test_shopping_flow_updates_snapshot() {
    let ctx = TestContext::new().unwrap();
    let mut session = Session::from_config(&ctx.config()).await.unwrap();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    session.subscribe(move |change| sink.lock().unwrap().push(change.clone()));

    session.apply_filter(Some("FOOTWEAR"), None);
    assert_eq!(names(&session), vec!["Shoe", "Sandal"]);

    session.add_to_cart(&ProductId::from(1));
    session.add_to_cart(&ProductId::from(3));
    session.add_to_cart(&ProductId::from(1));
    assert_eq!(session.toggle_favourite(&ProductId::from(3)), Toggle::Added);

    let view = session.snapshot();
    assert!(view.products.iter().all(|card| card.in_cart));
    assert_eq!(view.products[0].cart_label(), "Added");
    assert!(view.products[1].is_favourite);
    assert_eq!(view.cart.item_count, 3);
    assert_eq!(view.cart.subtotal, "$52.00");
    assert_eq!(view.cart.items[0].line_price, "$40.00");
    assert_eq!(view.favourites_count, 1);

    // Quantity never drops below one; removal is explicit.
    session.decrease_quantity(0);
    session.decrease_quantity(0);
    assert_eq!(session.cart().lines()[0].quantity(), 1);

    let removed = session.remove_from_cart(0).unwrap();
    assert_eq!(removed.product.id, ProductId::from(1));
    assert!(!session.cart().contains(&ProductId::from(1)));

    session.clear_cart();
    assert_eq!(session.snapshot().cart.empty_message(), Some("Your cart is empty"));

    let events = events.lock().unwrap();
    assert_eq!(events[0], StateChange::FilterApplied { matches: 2 });
    assert_eq!(events.last(), Some(&StateChange::CartCleared));
    assert!(events.contains(&StateChange::FavouritesUpdated {
        id: ProductId::from(3)
    }));
}

#[tokio::test]
async fn test_unknown_references_are_no_ops() {
    let ctx = TestContext::new().unwrap();
    let mut session = Session::from_config(&ctx.config()).await.unwrap();
    session.add_to_cart(&ProductId::from(1));

    assert_eq!(session.add_to_cart(&ProductId::from(99)), None);
    assert_eq!(session.toggle_favourite(&ProductId::from(99)), Toggle::Unknown);
    assert_eq!(session.increase_quantity(5), None);
    assert_eq!(session.decrease_quantity(5), None);
    assert!(session.remove_from_cart(5).is_none());

    assert_eq!(session.cart().count(), 1);
    assert_eq!(session.favourites().count(), 0);
}
