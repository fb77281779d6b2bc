//! # basket-core: Pure Cart Logic for Basket
//!
//! This crate is the **heart** of Basket. It contains the cart data model
//! and the three mutation operations as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront UI (mobile shell)                   │   │
//! │  │    Catalog screen ──► Cart screen ──► Checkout screen          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ explicit store reference               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    basket-store (CartStore)                     │   │
//! │  │    hydrate, add_to_cart, increment, decrement, items            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   Product ── CartItem ── Cart { add, increment, decrement }    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every mutation is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Infallible Mutations**: The three cart operations never error; unknown
//!    ids are silent no-ops, matching the consumer contract
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{Cart, Product};
//!
//! let mut cart = Cart::new();
//! cart.add(Product {
//!     id: "p1".into(),
//!     title: "Trail Mix".into(),
//!     image_url: "https://cdn.example/p1.png".into(),
//!     price: 10.0,
//! });
//!
//! cart.increment("p1");
//! assert_eq!(cart.items[0].quantity, 2);
//!
//! cart.decrement("p1");
//! cart.decrement("p1");
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use basket_core::Cart` instead of
// `use basket_core::types::Cart`

pub use types::{Cart, CartItem, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Well-known key under which the cart is mirrored in persistent storage.
///
/// ## Why a single constant?
/// The mirror lives in exactly one slot. Hydration reads it, every mutation
/// overwrites it. Centralizing the key here makes a hydrate/write key
/// divergence unrepresentable.
pub const CART_STORAGE_KEY: &str = "cart/products";
