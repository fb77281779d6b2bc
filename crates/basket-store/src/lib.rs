//! # basket-store: Cart Store and Persistence for Basket
//!
//! This crate provides the Cart Store: the authoritative in-memory cart
//! plus the key-value persistence keeping a durable mirror of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Data Flow                                 │
//! │                                                                         │
//! │  Storefront UI action (tap product / + / -)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  basket-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐    ┌──────────────┐    ┌─────────────────┐  │   │
//! │  │   │  CartStore   │    │ KvStore port │    │  SqliteKvStore  │  │   │
//! │  │   │ (store.rs)   │───►│   (kv.rs)    │◄───│   (sqlite.rs)   │  │   │
//! │  │   │              │    │              │    │                 │  │   │
//! │  │   │ hydrate      │    │ get / set    │    │ WAL + pool +    │  │   │
//! │  │   │ add/inc/dec  │    │ (dyn-safe)   │    │ migrations      │  │   │
//! │  │   └──────────────┘    └──────────────┘    └─────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │      SQLite file: kv_entries["cart/products"] = JSON blob       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The [`CartStore`] itself (hydration + mutations + reads)
//! - [`kv`] - The [`KvStore`] port and the in-memory fake
//! - [`sqlite`] - SQLite-backed [`KvStore`] implementation
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use basket_store::{CartStore, KvConfig, SqliteKvStore};
//!
//! let kv = Arc::new(SqliteKvStore::connect(KvConfig::new("basket.db")).await?);
//! let store = CartStore::open(kv).await;
//!
//! store.add_to_cart(product).await?;
//! store.increment("p1").await?;
//! let items = store.items();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{KvStore, MemoryKvStore};
pub use sqlite::{KvConfig, SqliteKvStore};
pub use store::CartStore;

// Core types pass through so UI-facing code depends on one crate
pub use basket_core::{Cart, CartItem, Product, CART_STORAGE_KEY};
