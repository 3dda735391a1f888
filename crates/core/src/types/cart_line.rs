//! Cart line items.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::price::Price;
use super::product::Product;

/// A product snapshot plus a quantity of at least one.
///
/// Serialized flat, as the product's own fields followed by `quantity`:
///
/// ```json
/// { "id": 1, "name": "Shoe", "price": 20, "quantity": 2 }
/// ```
///
/// A stored line with a missing, zero or non-numeric quantity loads with a
/// quantity of 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default = "min_quantity", deserialize_with = "lenient_quantity")]
    quantity: u32,
}

impl CartLine {
    /// Start a line for `product` with a quantity of 1.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Create a line with the given quantity, raised to 1 if zero.
    #[must_use]
    pub fn with_quantity(product: Product, quantity: u32) -> Self {
        Self {
            product,
            quantity: quantity.max(1),
        }
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Add one unit.
    pub const fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Remove one unit unless the quantity is already 1.
    ///
    /// Returns whether the quantity changed.
    pub const fn decrement(&mut self) -> bool {
        if self.quantity > 1 {
            self.quantity -= 1;
            true
        } else {
            false
        }
    }

    /// Price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price() * self.quantity
    }
}

const fn min_quantity() -> u32 {
    1
}

fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|q| u32::try_from(q).ok())
        .map_or(1, |q| q.max(1)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ProductId;

    #[test]
    fn test_serializes_flat() {
        let line = CartLine::with_quantity(Product::new(1).with_name("Shoe").with_price(20), 2);
        assert_eq!(
            serde_json::to_value(&line).unwrap(),
            json!({ "id": 1, "name": "Shoe", "price": 20, "quantity": 2 })
        );
    }

    #[test]
    fn test_reads_stored_line() {
        let line: CartLine = serde_json::from_value(json!({
            "id": "7",
            "name": "Bag",
            "catetory": "Bags",
            "price": 12.5,
            "quantity": 3
        }))
        .unwrap();

        assert_eq!(line.product.id, ProductId::from(7));
        assert_eq!(line.product.category(), Some("Bags"));
        assert_eq!(line.quantity(), 3);
        assert_eq!(line.subtotal().display(), "$37.50");
        assert!(line.product.extra.is_empty());
    }

    #[test]
    fn test_bad_quantity_defaults_to_one() {
        for stored in [
            json!({ "id": 1 }),
            json!({ "id": 1, "quantity": 0 }),
            json!({ "id": 1, "quantity": -4 }),
            json!({ "id": 1, "quantity": "many" }),
            json!({ "id": 1, "quantity": null }),
        ] {
            let line: CartLine = serde_json::from_value(stored).unwrap();
            assert_eq!(line.quantity(), 1);
        }
    }

    #[test]
    fn test_decrement_floor() {
        let mut line = CartLine::new(Product::new(1));
        assert!(!line.decrement());
        assert_eq!(line.quantity(), 1);

        line.increment();
        assert!(line.decrement());
        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn test_with_quantity_clamps_zero() {
        assert_eq!(CartLine::with_quantity(Product::new(1), 0).quantity(), 1);
    }

    #[test]
    fn test_subtotal_without_price() {
        let line = CartLine::with_quantity(Product::new(1), 4);
        assert_eq!(line.subtotal(), Price::ZERO);
    }
}
