//! Opaque product identifiers.
//!
//! Catalog documents are hand-written JSON, so the same product may be keyed
//! by `1` in one place and `"1"` in another. [`ProductId`] keeps whichever form
//! it was read in (so stored snapshots round-trip unchanged) but compares and
//! hashes by its textual form.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// # Example
///
/// ```rust
/// # use shopfront_core::ProductId;
/// let numeric = ProductId::from(7);
/// let textual = ProductId::from("7");
///
/// assert_eq!(numeric, textual);
/// assert_eq!(numeric.to_string(), "7");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// A JSON number id (`"id": 1`).
    Number(serde_json::Number),
    /// A JSON string id (`"id": "sku-1"`).
    Text(String),
}

impl ProductId {
    /// The textual form used for comparison and display.
    #[must_use]
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl PartialEq for ProductId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => self.key() == other.key(),
        }
    }
}

impl Eq for ProductId {}

impl Hash for ProductId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Number(id.into())
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        Self::Number(id.into())
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}
