//! Catalog loading.
//!
//! The catalog is a static JSON document (an array of product records) read
//! once per session, either over HTTP or from a local file. A successful load
//! is also written to the `products` storage slot; that copy is best effort
//! and never read back by the cart or favourites.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use shopfront_core::{Product, ProductId};
use thiserror::Error;
use tracing::{info, instrument, warn};
use url::Url;

use crate::storage::{Slot, Storage, keys};

/// Errors that can occur when loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Catalog request to {url} returned status {status}")]
    Status { url: Url, status: u16 },

    /// Catalog file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document parsed but is not an array of records.
    #[error("Catalog document is not an array")]
    NotAnArray,

    /// Location could not be turned into a source.
    #[error("Invalid catalog source: {0}")]
    InvalidSource(String),
}

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched with an HTTP GET.
    Http(Url),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl CatalogSource {
    /// Interpret a location string.
    ///
    /// `http://` and `https://` URLs are fetched, `file://` URLs and anything
    /// that is not a URL are treated as filesystem paths.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty location or a `file://` URL that does
    /// not map to a local path.
    pub fn parse(location: &str) -> Result<Self, CatalogError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(CatalogError::InvalidSource(
                "location cannot be empty".to_string(),
            ));
        }

        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Http(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::File)
                .map_err(|()| CatalogError::InvalidSource(location.to_string())),
            // Bare paths, including Windows drive letters that parse as a scheme
            _ => Ok(Self::File(PathBuf::from(location))),
        }
    }

    /// Read the raw document.
    async fn read(&self, client: &reqwest::Client) -> Result<String, CatalogError> {
        match self {
            Self::Http(url) => {
                let response = client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(CatalogError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.text().await?)
            }
            Self::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The products available for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog document.
    ///
    /// Records that are not valid products (no `id`, wrong field types) are
    /// skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not JSON or not an array.
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let Value::Array(records) = serde_json::from_str::<Value>(document)? else {
            return Err(CatalogError::NotAnArray);
        };

        let total = records.len();
        let products: Vec<Product> = records
            .into_iter()
            .enumerate()
            .filter_map(|(position, record)| match serde_json::from_value(record) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(position, error = %e, "Skipping invalid catalog record");
                    None
                }
            })
            .collect();

        if products.len() < total {
            warn!(
                skipped = total - products.len(),
                "Catalog contained invalid records"
            );
        }

        Ok(Self { products })
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// First product with the given id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order.
    ///
    /// Categories differing only in case are listed once, under the spelling
    /// seen first. Products without a category contribute nothing.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter_map(Product::category)
            .filter(|category| seen.insert(category.to_lowercase()))
            .collect()
    }
}

/// Loads the catalog from its source and caches it in storage.
#[derive(Clone)]
pub struct CatalogStore {
    source: CatalogSource,
    client: reqwest::Client,
    slot: Slot,
}

impl CatalogStore {
    #[must_use]
    pub fn new(source: CatalogSource, storage: Arc<dyn Storage>) -> Self {
        Self {
            source,
            client: reqwest::Client::new(),
            slot: Slot::new(storage, keys::PRODUCTS),
        }
    }

    /// Use a preconfigured HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub const fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Fetch and parse the catalog.
    ///
    /// On success the catalog is written to the `products` slot; a failed
    /// write is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unreachable, answers with a
    /// non-success status, or does not hold a JSON array.
    #[instrument(skip(self), fields(source = %self.source))]
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let document = self.source.read(&self.client).await?;
        let catalog = Catalog::from_json(&document)?;

        if let Err(e) = self.slot.save(catalog.products()) {
            warn!(error = %e, "Failed to cache catalog snapshot");
        }

        info!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const DOCUMENT: &str = r#"[
        {"id": 1, "name": "Shoe", "category": "Footwear", "price": 20},
        {"id": 2, "name": "Shirt", "catetory": "Apparel", "price": 10},
        {"name": "No id"},
        {"id": 3, "name": "Boot", "category": "footwear", "price": "35.50"},
        {"id": 4, "name": "Mystery box"}
    ]"#;

    #[test]
    fn test_source_parse() {
        assert!(matches!(
            CatalogSource::parse("https://shop.example/products.json").unwrap(),
            CatalogSource::Http(_)
        ));
        assert_eq!(
            CatalogSource::parse("products.json").unwrap(),
            CatalogSource::File(PathBuf::from("products.json"))
        );
        assert_eq!(
            CatalogSource::parse("data/catalog/products.json").unwrap(),
            CatalogSource::File(PathBuf::from("data/catalog/products.json"))
        );
        assert!(CatalogSource::parse("   ").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_source_parse_file_url() {
        assert_eq!(
            CatalogSource::parse("file:///srv/shop/products.json").unwrap(),
            CatalogSource::File(PathBuf::from("/srv/shop/products.json"))
        );
    }

    #[test]
    fn test_from_json_skips_invalid_records() {
        let catalog = Catalog::from_json(DOCUMENT).unwrap();

        assert_eq!(catalog.len(), 4);
        assert!(catalog.get(&ProductId::from(3)).is_some());
        assert_eq!(
            catalog.get(&ProductId::from("2")).unwrap().category(),
            Some("Apparel")
        );
    }

    #[test]
    fn test_from_json_rejects_non_arrays() {
        assert!(matches!(
            Catalog::from_json(r#"{"products": []}"#),
            Err(CatalogError::NotAnArray)
        ));
        assert!(matches!(
            Catalog::from_json("<html>"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(Catalog::from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_categories_first_seen_case_insensitive() {
        let catalog = Catalog::from_json(DOCUMENT).unwrap();
        assert_eq!(catalog.categories(), vec!["Footwear", "Apparel"]);
    }

    #[tokio::test]
    async fn test_load_from_file_caches_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("products.json");
        std::fs::write(&path, DOCUMENT).unwrap();

        let storage = Arc::new(MemoryStorage::new());
        let store = CatalogStore::new(CatalogSource::File(path), storage.clone());

        let catalog = store.load().await.unwrap();

        let cached: Vec<Product> = Slot::new(storage, keys::PRODUCTS).load();
        assert_eq!(cached, catalog.products());
    }

    #[tokio::test]
    async fn test_load_missing_file_fails_without_caching() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let store = CatalogStore::new(
            CatalogSource::File(tmp.path().join("missing.json")),
            storage.clone(),
        );

        assert!(matches!(store.load().await, Err(CatalogError::Io { .. })));
        assert!(storage.is_empty());
    }
}
