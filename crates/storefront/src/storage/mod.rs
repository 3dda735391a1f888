//! Durable key-value storage for catalog, cart and favourites snapshots.
//!
//! # Slots
//!
//! Each collection owns one key ("slot") holding a JSON array:
//!
//! - `products` - last successfully loaded catalog (written, never read back)
//! - `cart` - ordered cart lines
//! - `favourites` - ordered favourite products
//!
//! Every mutation rewrites the whole slot. Reads are forgiving: an absent,
//! unreadable or malformed slot is an empty collection, and entries that do
//! not decode are dropped with a warning.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map, for tests and ephemeral sessions
//! - [`FileStorage`] - one `<key>.json` file per slot in a directory

mod file;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage slot keys.
pub mod keys {
    /// Key for the cached catalog snapshot.
    pub const PRODUCTS: &str = "products";

    /// Key for the cart lines.
    pub const CART: &str = "cart";

    /// Key for the favourite products.
    pub const FAVOURITES: &str = "favourites";
}

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on slot {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Slot contents could not be encoded.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key cannot be used as a slot name.
    #[error("Invalid slot key: {0}")]
    InvalidKey(String),

    /// A lock guarding the backend was poisoned.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// A durable string-to-string mapping.
///
/// Backends are shared across collections through `Arc<dyn Storage>`, so
/// methods take `&self` and use interior mutability where needed.
pub trait Storage: Send + Sync {
    /// Read a slot. `Ok(None)` means the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A typed view of one storage key holding a JSON array.
#[derive(Clone)]
pub struct Slot {
    storage: Arc<dyn Storage>,
    key: &'static str,
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot").field("key", &self.key).finish()
    }
}

impl Slot {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, key: &'static str) -> Self {
        Self { storage, key }
    }

    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Load every entry that decodes as `T`.
    ///
    /// Never fails: storage errors, corrupt JSON and non-array documents all
    /// yield an empty list, and undecodable entries are skipped.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self) -> Vec<T> {
        let raw = match self.storage.get(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(slot = self.key, error = %e, "Failed to read slot, treating as empty");
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(Value::Null) => return Vec::new(),
            Ok(other) => {
                warn!(
                    slot = self.key,
                    kind = json_kind(&other),
                    "Slot does not hold an array, treating as empty"
                );
                return Vec::new();
            }
            Err(e) => {
                warn!(slot = self.key, error = %e, "Corrupt slot, treating as empty");
                return Vec::new();
            }
        };

        let total = entries.len();
        let items: Vec<T> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();

        if items.len() < total {
            warn!(
                slot = self.key,
                dropped = total - items.len(),
                "Dropped malformed slot entries"
            );
        }

        items
    }

    /// Overwrite the slot with `items`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save<T: Serialize>(&self, items: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(items)?;
        self.storage.set(self.key, &json)
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reject keys that cannot safely name a slot.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
