//! # Cart Types
//!
//! The cart data model and its three mutation operations.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Data Model                                 │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                         │
//! │  │    Product      │        │    CartItem     │                         │
//! │  │  ─────────────  │  add   │  ─────────────  │                         │
//! │  │  id             │ ─────► │  id             │                         │
//! │  │  title          │ qty=1  │  title          │                         │
//! │  │  image_url      │        │  image_url      │                         │
//! │  │  price          │        │  price          │                         │
//! │  └─────────────────┘        │  quantity       │                         │
//! │                             └─────────────────┘                         │
//! │                                      │                                  │
//! │                             ┌────────▼────────┐                         │
//! │                             │      Cart       │                         │
//! │                             │  Vec<CartItem>  │  ordered, id-unique     │
//! │                             └─────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation Semantics
//! - `add`: existing id behaves exactly like `increment`; new id appends
//!   with quantity 1 at the end
//! - `increment`: quantity + 1 for the matching entry, silent no-op otherwise
//! - `decrement`: quantity - 1 for the matching entry, entries reaching 0
//!   are removed; silent no-op for unknown ids
//!
//! All three preserve insertion order for every surviving entry.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A catalog product as handed over by the UI when adding to the cart.
///
/// This is the *candidate* descriptor: it carries no quantity. The catalog
/// service owning these values is an external collaborator; descriptors are
/// taken as-is and never validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier of the underlying catalog product.
    pub id: String,

    /// Display name.
    pub title: String,

    /// Display image reference.
    pub image_url: String,

    /// Unit price. Currency unit is implied by the caller; the cart performs
    /// no monetary arithmetic on this value.
    pub price: f64,
}

// =============================================================================
// Cart Item
// =============================================================================

/// One product-and-quantity pairing within the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Unique identifier of the underlying catalog product.
    pub id: String,

    /// Display name at time of adding.
    pub title: String,

    /// Display image reference at time of adding.
    pub image_url: String,

    /// Unit price at time of adding.
    pub price: f64,

    /// Count of this product in the cart. Always >= 1 for a retained entry;
    /// reaching zero removes the entry from the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a cart item from a catalog product with quantity 1.
    pub fn from_product(product: Product) -> Self {
        CartItem {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The ordered, id-unique collection of line items for the current session.
///
/// ## Invariants
/// - No two entries share the same `id`
/// - Every retained entry has `quantity >= 1`
/// - Insertion order reflects first-add order and is preserved across
///   mutations except removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    /// Items in the cart, in first-add order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Creates a cart from an already-deserialized item list (hydration).
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Cart { items }
    }

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - If the product id is already in the cart: identical to
    ///   [`Cart::increment`], no duplicate entry is created
    /// - Otherwise: appends a new entry with quantity 1 at the end
    ///
    /// Never errors; descriptors are not validated.
    pub fn add(&mut self, product: Product) {
        if self.contains(&product.id) {
            self.increment(&product.id);
            return;
        }
        self.items.push(CartItem::from_product(product));
    }

    /// Increases the quantity of the entry matching `id` by exactly 1.
    ///
    /// Unknown ids are a silent no-op; every other entry is untouched,
    /// order included.
    pub fn increment(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity += 1;
        }
    }

    /// Decreases the quantity of the entry matching `id` by exactly 1.
    ///
    /// Entries whose quantity reaches 0 are removed from the cart; unknown
    /// ids are a silent no-op. Quantity never goes negative in the retained
    /// set: the subtraction saturates ahead of the zero-filter.
    pub fn decrement(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = item.quantity.saturating_sub(1);
        }
        self.items.retain(|i| i.quantity != 0);
    }

    /// Checks whether an entry with the given id is in the cart.
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Returns the number of unique items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {}", id),
            image_url: format!("https://cdn.example/{}.png", id),
            price,
        }
    }

    #[test]
    fn test_add_distinct_products() {
        let mut cart = Cart::new();
        cart.add(test_product("p1", 10.0));
        cart.add(test_product("p2", 5.5));
        cart.add(test_product("p3", 2.0));

        assert_eq!(cart.item_count(), 3);
        assert!(cart.items.iter().all(|i| i.quantity == 1));
    }

    #[test]
    fn test_add_same_product_twice_equals_add_then_increment() {
        let mut twice = Cart::new();
        twice.add(test_product("p1", 10.0));
        twice.add(test_product("p1", 10.0));

        let mut incremented = Cart::new();
        incremented.add(test_product("p1", 10.0));
        incremented.increment("p1");

        assert_eq!(twice, incremented);
        assert_eq!(twice.item_count(), 1);
        assert_eq!(twice.items[0].quantity, 2);
    }

    #[test]
    fn test_add_preserves_first_add_order() {
        let mut cart = Cart::new();
        cart.add(test_product("p1", 1.0));
        cart.add(test_product("p2", 2.0));
        cart.add(test_product("p1", 1.0)); // re-add must not move p1

        let ids: Vec<&str> = cart.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_increment_touches_only_matching_entry() {
        let mut cart = Cart::new();
        cart.add(test_product("p1", 1.0));
        cart.add(test_product("p2", 2.0));
        cart.add(test_product("p3", 3.0));

        cart.increment("p2");

        let quantities: Vec<u32> = cart.items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![1, 2, 1]);

        let ids: Vec<&str> = cart.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_increment_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(test_product("p1", 1.0));

        let before = cart.clone();
        cart.increment("absent-id");
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_above_one_keeps_entry() {
        let mut cart = Cart::new();
        cart.add(test_product("p1", 1.0));
        cart.increment("p1");

        cart.decrement("p1");

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn test_decrement_at_one_removes_entry() {
        let mut cart = Cart::new();
        cart.add(test_product("p1", 1.0));
        cart.add(test_product("p2", 2.0));

        cart.decrement("p1");

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].id, "p2");
        assert!(!cart.contains("p1"));
    }

    #[test]
    fn test_decrement_unknown_id_on_empty_cart_is_noop() {
        let mut cart = Cart::new();
        cart.decrement("absent-id");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_full_scenario_add_increment_decrement_to_empty() {
        let mut cart = Cart::new();

        cart.add(test_product("p1", 10.0));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].quantity, 1);

        cart.increment("p1");
        assert_eq!(cart.items[0].quantity, 2);

        cart.decrement("p1");
        cart.decrement("p1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_quantity_sums_across_items() {
        let mut cart = Cart::new();
        cart.add(test_product("p1", 1.0));
        cart.add(test_product("p2", 2.0));
        cart.increment("p2");

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_serialized_blob_uses_camel_case_field_names() {
        let mut cart = Cart::new();
        cart.add(test_product("p1", 10.0));

        let json = serde_json::to_string(&cart.items).unwrap();
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"quantity\":1"));
    }

    #[test]
    fn test_items_round_trip_through_json() {
        let mut cart = Cart::new();
        cart.add(test_product("p1", 10.0));
        cart.add(test_product("p2", 5.5));
        cart.increment("p2");

        let json = serde_json::to_string(&cart.items).unwrap();
        let items: Vec<CartItem> = serde_json::from_str(&json).unwrap();

        assert_eq!(Cart::from_items(items), cart);
    }
}
