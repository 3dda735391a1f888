//! Integration tests for cart and favourites persistence on disk.
//!
//! Each test opens a session against a temporary storage directory, mutates
//! it, then opens a second session on the same directory and checks what
//! was restored.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use shopfront::Session;
use shopfront_core::ProductId;
use shopfront_integration_tests::TestContext;

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_survives_new_session() {
    let ctx = TestContext::new().unwrap();

    {
        let mut session = Session::from_config(&ctx.config()).await.unwrap();
        session.add_to_cart(&ProductId::from(1));
        session.add_to_cart(&ProductId::from(1));
        session.add_to_cart(&ProductId::from(2));
    }

    let session = Session::from_config(&ctx.config()).await.unwrap();
    let cart = session.cart();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.count(), 3);
    assert_eq!(cart.total().display(), "$55.50");
    assert_eq!(cart.lines()[0].quantity(), 2);
    assert_eq!(cart.lines()[1].product.display_name(), "Shirt");
}

#[tokio::test]
async fn test_cart_file_is_array_of_lines() {
    let ctx = TestContext::new().unwrap();
    let mut session = Session::from_config(&ctx.config()).await.unwrap();
    session.add_to_cart(&ProductId::from(2));

    let stored = std::fs::read_to_string(ctx.storage_dir().join("cart.json")).unwrap();
    let lines: serde_json::Value = serde_json::from_str(&stored).unwrap();

    assert_eq!(lines.as_array().unwrap().len(), 1);
    let line = &lines[0];
    assert_eq!(line["id"], 2);
    assert_eq!(line["quantity"], 1);
    assert_eq!(line["catetory"], "Tops");
    assert_eq!(line["sku"], "SH-2");
}

#[tokio::test]
async fn test_every_mutation_is_written() {
    let ctx = TestContext::new().unwrap();
    let mut session = Session::from_config(&ctx.config()).await.unwrap();
    let cart_file = ctx.storage_dir().join("cart.json");

    session.add_to_cart(&ProductId::from(1));
    let index = session.cart().position(&ProductId::from(1)).unwrap();
    session.increase_quantity(index);
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&cart_file).unwrap()).unwrap();
    assert_eq!(stored[0]["quantity"], 2);

    session.remove_from_cart(index);
    assert_eq!(std::fs::read_to_string(&cart_file).unwrap().trim(), "[]");
}

#[tokio::test]
async fn test_corrupt_cart_reads_as_empty() {
    let ctx = TestContext::new().unwrap();
    std::fs::create_dir_all(ctx.storage_dir()).unwrap();
    std::fs::write(ctx.storage_dir().join("cart.json"), "{not json").unwrap();

    let mut session = Session::from_config(&ctx.config()).await.unwrap();
    assert!(session.cart().is_empty());

    // The session keeps working and overwrites the bad slot.
    assert_eq!(session.add_to_cart(&ProductId::from(1)), Some(1));
    let reopened = Session::from_config(&ctx.config()).await.unwrap();
    assert_eq!(reopened.cart().count(), 1);
}

#[tokio::test]
async fn test_cart_keeps_products_dropped_from_catalog() {
    let ctx = TestContext::new().unwrap();
    {
        let mut session = Session::from_config(&ctx.config()).await.unwrap();
        session.add_to_cart(&ProductId::from(1));
    }

    std::fs::write(ctx.catalog_path(), r#"[{"id": 9, "name": "Hat"}]"#).unwrap();
    let session = Session::from_config(&ctx.config()).await.unwrap();

    assert!(session.catalog().get(&ProductId::from(1)).is_none());
    assert!(session.cart().contains(&ProductId::from(1)));
    assert_eq!(session.cart().total().display(), "$20.00");
}

// =============================================================================
// Favourites and catalog snapshot
// =============================================================================

#[tokio::test]
async fn test_favourites_survive_new_session() {
    let ctx = TestContext::new().unwrap();
    {
        let mut session = Session::from_config(&ctx.config()).await.unwrap();
        session.toggle_favourite(&ProductId::from("3"));
        session.toggle_favourite(&ProductId::from(4));
        session.toggle_favourite(&ProductId::from(4));
    }

    let session = Session::from_config(&ctx.config()).await.unwrap();
    let favourites = session.favourites();

    assert_eq!(favourites.count(), 1);
    assert!(favourites.contains(&ProductId::from(3)));
    assert!(!favourites.contains(&ProductId::from(4)));
}

#[tokio::test]
async fn test_catalog_snapshot_written_to_products_slot() {
    let ctx = TestContext::new().unwrap();
    let session = Session::from_config(&ctx.config()).await.unwrap();
    assert_eq!(session.catalog().len(), 4);

    let stored = std::fs::read_to_string(ctx.storage_dir().join("products.json")).unwrap();
    let products: serde_json::Value = serde_json::from_str(&stored).unwrap();

    assert_eq!(products.as_array().unwrap().len(), 4);
    assert_eq!(products[0]["name"], "Shoe");
    assert_eq!(products[1]["price"], 15.5);
}
