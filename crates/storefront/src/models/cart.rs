//! Cart domain types.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s with at most one line per
//! product id. Every line holds a positive quantity; a line whose quantity
//! reaches zero is removed. Insertion order is kept for display.
//!
//! Decoding a stored cart keeps every line it can read. A line that cannot
//! be decoded is dropped on its own instead of discarding the whole cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use shopfront_core::{Product, ProductId};

const fn default_quantity() -> u32 {
    1
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_quantity))
}

/// One product entry in the cart plus its quantity.
///
/// Stored flattened: the product fields followed by `quantity`. A stored
/// line without a quantity, or with a `null` one, counts as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product as it was when added.
    #[serde(flatten)]
    pub product: Product,
    /// Number of units.
    #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
}

impl CartLine {
    /// Product identifier of this line.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<StoredLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from raw lines, restoring the cart invariants.
    ///
    /// Lines sharing an id are merged into the first occurrence (quantities
    /// summed) and zero-quantity lines are dropped.
    #[must_use]
    pub fn from_lines(raw: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in raw {
            cart.add(line.product, line.quantity);
        }
        cart
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line for the product's id, or appends a new
    /// line. Adding zero units does nothing. Returns whether the cart changed.
    pub fn add(&mut self, product: Product, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.id() == &product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { product, quantity });
        }
        true
    }

    /// Adjust the quantity of the line for `id` by `delta`.
    ///
    /// The result is clamped at zero, and a line that reaches zero is
    /// removed. Returns the new quantity, or `None` if no line has that id.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> Option<u32> {
        let idx = self.lines.iter().position(|line| line.id() == id)?;
        let line = self.lines.get_mut(idx)?;

        let updated = i64::from(line.quantity)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        let quantity = u32::try_from(updated).unwrap_or(u32::MAX);

        if quantity == 0 {
            self.lines.remove(idx);
        } else {
            line.quantity = quantity;
        }
        Some(quantity)
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        self.lines.len() != before
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        compute_total(self)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        count_items(self)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

/// A stored cart entry, or `None` if it could not be read.
struct StoredLine(Option<CartLine>);

impl<'de> Deserialize<'de> for StoredLine {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match serde_json::from_value(value) {
            Ok(line) => Ok(Self(Some(line))),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping undecodable cart line");
                Ok(Self(None))
            }
        }
    }
}

impl From<Vec<StoredLine>> for Cart {
    fn from(lines: Vec<StoredLine>) -> Self {
        Self::from_lines(lines.into_iter().filter_map(|line| line.0).collect())
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

/// Sum of price × quantity over all lines; zero for an empty cart.
#[must_use]
pub fn compute_total(cart: &Cart) -> Decimal {
    cart.lines
        .iter()
        .map(CartLine::line_total)
        .fold(Decimal::ZERO, |acc, amount| {
            acc.checked_add(amount).unwrap_or(Decimal::MAX)
        })
}

/// Sum of quantities over all lines, used for the cart badge.
#[must_use]
pub fn count_items(cart: &Cart) -> u32 {
    cart.lines
        .iter()
        .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::{Price, format_amount};

    use super::*;

    fn product(id: &str, cents: u32) -> Product {
        Product::new(id, format!("Product {id}"), Price::from_cents(cents))
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = Cart::new();
        assert!(cart.add(product("p1", 999), 1));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(&"p1".into()).unwrap().quantity, 1);
        assert_eq!(format_amount(cart.total()), "9.99");
    }

    #[test]
    fn test_add_existing_line_increments() {
        let mut cart = Cart::new();
        cart.add(product("p1", 100), 2);
        cart.add(product("p2", 100), 1);
        cart.add(product("p1", 100), 3);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.line(&"p1".into()).unwrap().quantity, 5);
        // Insertion order is preserved
        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, ["p1", "p2"]);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.add(product("p1", 100), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_quantity_equals_sum_of_adds() {
        let adds = [("a", 1), ("b", 4), ("a", 2), ("c", 1), ("b", 1), ("a", 7)];
        let mut cart = Cart::new();
        for (id, qty) in adds {
            cart.add(product(id, 50), qty);
        }

        for id in ["a", "b", "c"] {
            let expected: u32 = adds.iter().filter(|(i, _)| *i == id).map(|(_, q)| q).sum();
            assert_eq!(cart.line(&id.into()).unwrap().quantity, expected);
            assert_eq!(cart.lines().iter().filter(|l| l.id().as_str() == id).count(), 1);
        }
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add(product("p1", 500), 2);

        assert_eq!(cart.update_quantity(&"p1".into(), -2), Some(0));
        assert!(cart.is_empty());
        assert_eq!(format_amount(cart.total()), "0.00");
    }

    #[test]
    fn test_update_quantity_clamps_at_zero() {
        let mut cart = Cart::new();
        cart.add(product("p1", 500), 2);

        assert_eq!(cart.update_quantity(&"p1".into(), -10), Some(0));
        assert!(cart.line(&"p1".into()).is_none());
    }

    #[test]
    fn test_update_quantity_increment_and_unknown_id() {
        let mut cart = Cart::new();
        cart.add(product("p1", 500), 1);

        assert_eq!(cart.update_quantity(&"p1".into(), 1), Some(2));
        assert_eq!(cart.update_quantity(&"nope".into(), 1), None);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(product("p1", 500), 1);
        cart.add(product("p2", 500), 1);

        assert!(cart.remove(&"p1".into()));
        assert!(!cart.remove(&"p1".into()));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_total_is_linear_in_quantity() {
        let mut single = Cart::new();
        single.add(product("p1", 1234), 3);

        let mut doubled = Cart::new();
        doubled.add(product("p1", 1234), 6);

        assert_eq!(doubled.total(), single.total() * Decimal::from(2));
    }

    #[test]
    fn test_count_items() {
        let mut cart = Cart::new();
        assert_eq!(count_items(&cart), 0);

        cart.add(product("p1", 1), 2);
        cart.add(product("p2", 1), 3);
        assert_eq!(count_items(&cart), 5);
    }

    #[test]
    fn test_decode_defaults_missing_quantity() {
        let cart: Cart =
            serde_json::from_str(r#"[{"id":"p1","name":"Mug","price":"2.50"}]"#).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(format_amount(cart.total()), "2.50");
    }

    #[test]
    fn test_decode_normalizes_duplicates_and_zero_lines() {
        let json = r#"[
            {"id":"p1","price":1,"quantity":2},
            {"id":"p2","price":1,"quantity":0},
            {"id":"p1","price":1,"quantity":3}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(&"p1".into()).unwrap().quantity, 5);
    }

    #[test]
    fn test_decode_keeps_valid_lines_beside_null_fields() {
        let json = r#"[
            {"id":"p1","name":"Mug","desc":"","price":"9.99","img":"","quantity":2},
            {"id":"p2","name":null,"desc":null,"price":null,"img":null,"quantity":null}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.line(&"p1".into()).unwrap().quantity, 2);
        let p2 = cart.line(&"p2".into()).unwrap();
        assert_eq!(p2.quantity, 1);
        assert!(p2.product.name.is_empty());
        assert_eq!(format_amount(cart.total()), "19.98");
    }

    #[test]
    fn test_decode_drops_only_unreadable_lines() {
        let json = r#"[
            {"id":"p1","price":1,"quantity":2},
            {"id":null,"name":"No id"},
            "garbage",
            {"id":"p3","price":2,"quantity":-1}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(&"p1".into()).unwrap().quantity, 2);
    }

    #[test]
    fn test_encode_is_flat_array() {
        let mut cart = Cart::new();
        cart.add(product("p1", 999).with_image("images/p1.jpg"), 2);

        let value = serde_json::to_value(&cart).unwrap();
        let line = &value[0];
        assert_eq!(line["id"], "p1");
        assert_eq!(line["img"], "images/p1.jpg");
        assert_eq!(line["quantity"], 2);
    }
}
