//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - Cart and favourites surviving across sessions on disk
//! - `catalog_http` - Loading the catalog over HTTP
//! - `storefront` - End-to-end browsing and cart flows
//!
//! The helpers here build throwaway storage directories, catalog files and a
//! small `axum` server so tests run without any external services.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum::http::{StatusCode, header};
use shopfront::{CatalogSource, ShopConfig};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A small catalog covering the name, category and image fallbacks.
pub const CATALOG: &str = r#"[
    {"id": 1, "name": "Shoe", "category": "Footwear", "price": 20, "old_price": 25, "img": "img/shoe.png"},
    {"id": 2, "name": "Shirt", "catetory": "Tops", "price": "15.50", "sku": "SH-2"},
    {"id": "3", "name": "Sandal", "category": "footwear", "price": 12},
    {"id": 4, "price": 5}
]"#;

/// Temporary workspace holding a catalog file and a storage directory.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a workspace with [`CATALOG`] written to `products.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be written.
    pub fn new() -> io::Result<Self> {
        Self::with_catalog(CATALOG)
    }

    /// Create a workspace with a custom catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be written.
    pub fn with_catalog(document: &str) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("products.json"), document)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.dir.path().join("products.json")
    }

    #[must_use]
    pub fn storage_dir(&self) -> PathBuf {
        self.dir.path().join("storage")
    }

    /// Configuration reading the local catalog file.
    #[must_use]
    pub fn config(&self) -> ShopConfig {
        ShopConfig {
            catalog: CatalogSource::File(self.catalog_path()),
            ..ShopConfig::default()
        }
        .with_storage_dir(self.storage_dir())
    }
}

/// Serve `body` with `status` for every path on an ephemeral port.
///
/// The server runs until the test runtime shuts down.
///
/// # Errors
///
/// Returns an error if no local port can be bound.
pub async fn serve_catalog(status: StatusCode, body: &'static str) -> io::Result<SocketAddr> {
    let app: Router = Router::new().fallback(move || async move {
        (status, [(header::CONTENT_TYPE, "application/json")], body)
    });

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move { axum::serve(listener, app).await });

    Ok(addr)
}
