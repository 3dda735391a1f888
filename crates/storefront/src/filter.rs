//! Product filtering by category and search text.
//!
//! A full linear scan on every call; no ranking, no pagination. Selectors are
//! trimmed and lower-cased, and an empty selector matches everything, so
//! `filter(products, None, None)` is the whole catalog in catalog order.

use shopfront_core::Product;

/// A category selector combined (AND) with a search phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    category: Option<String>,
    search: Option<String>,
}

impl ProductFilter {
    /// Build a filter from raw user input.
    #[must_use]
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        Self {
            category: normalize(category),
            search: normalize(search),
        }
    }

    /// The normalized category selector.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// The normalized search phrase.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Whether this filter matches every product.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none() && self.search.is_none()
    }

    /// Case-insensitive exact match on the effective category.
    #[must_use]
    pub fn matches_category(&self, product: &Product) -> bool {
        self.category.as_deref().is_none_or(|wanted| {
            product
                .category()
                .is_some_and(|category| category.to_lowercase() == wanted)
        })
    }

    /// Case-insensitive substring match on the name or the effective category.
    #[must_use]
    pub fn matches_search(&self, product: &Product) -> bool {
        self.search.as_deref().is_none_or(|phrase| {
            let hit = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(phrase));
            hit(product.name()) || hit(product.category())
        })
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product) && self.matches_search(product)
    }

    /// Products matching this filter, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Products matching both `category` and `search`.
#[must_use]
pub fn filter<'a>(
    products: &'a [Product],
    category: Option<&str>,
    search: Option<&str>,
) -> Vec<&'a Product> {
    ProductFilter::new(category, search).apply(products)
}

/// Products in `category`.
#[must_use]
pub fn by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    filter(products, Some(category), None)
}

/// Products whose name or category contains `search`.
#[must_use]
pub fn by_search<'a>(products: &'a [Product], search: &str) -> Vec<&'a Product> {
    filter(products, None, Some(search))
}

fn normalize(selector: Option<&str>) -> Option<String> {
    selector
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}
