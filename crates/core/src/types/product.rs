//! Catalog product records.
//!
//! Product records come from a static, hand-maintained JSON catalog, so every
//! field except `id` is optional and two misspellings are accepted as
//! synonyms: `catetory` for `category` and `image` for `img`. Fields this type
//! does not know about are kept in [`Product::extra`] so that a stored copy
//! serializes back to what was read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;
use super::price::{self, Price};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Misspelled synonym of `category` found in real catalogs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catetory: Option<String>,
    #[serde(
        default,
        deserialize_with = "price::lenient::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Price>,
    #[serde(
        default,
        deserialize_with = "price::lenient::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub old_price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// Synonym of `img`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Any other fields present in the source record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Label shown for products without a name.
    pub const DEFAULT_NAME: &'static str = "Unnamed Product";
    /// Image alt text for products without a name.
    pub const DEFAULT_ALT: &'static str = "Product";
    /// Category shown for products without one.
    pub const DEFAULT_CATEGORY: &'static str = "Uncategorized";
    /// Image shown for products without one.
    pub const PLACEHOLDER_IMAGE: &'static str = "img/placeholder.png";

    /// Create a product with only an id.
    #[must_use]
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            category: None,
            catetory: None,
            price: None,
            old_price: None,
            img: None,
            image: None,
            extra: Map::new(),
        }
    }

    /// Set the product name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the product category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the product price.
    #[must_use]
    pub fn with_price(mut self, price: impl Into<Price>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// The name, if present and non-empty.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    /// The effective category: `category`, else `catetory`, ignoring empty values.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        non_empty(self.category.as_deref()).or_else(|| non_empty(self.catetory.as_deref()))
    }

    /// The price, or zero when the record has none.
    #[must_use]
    pub fn price(&self) -> Price {
        self.price.unwrap_or(Price::ZERO)
    }

    /// The image reference: `img`, else `image`, ignoring empty values.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        non_empty(self.img.as_deref()).or_else(|| non_empty(self.image.as_deref()))
    }

    /// Name for display, falling back to [`Self::DEFAULT_NAME`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(Self::DEFAULT_NAME)
    }

    /// Alt text for the product image, falling back to [`Self::DEFAULT_ALT`].
    #[must_use]
    pub fn alt_text(&self) -> &str {
        self.name().unwrap_or(Self::DEFAULT_ALT)
    }

    /// Category for display, falling back to [`Self::DEFAULT_CATEGORY`].
    #[must_use]
    pub fn display_category(&self) -> &str {
        self.category().unwrap_or(Self::DEFAULT_CATEGORY)
    }

    /// Image for display, falling back to [`Self::PLACEHOLDER_IMAGE`].
    #[must_use]
    pub fn display_image(&self) -> &str {
        self.image().unwrap_or(Self::PLACEHOLDER_IMAGE)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
