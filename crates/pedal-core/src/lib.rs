//! # pedal-core: Pure Business Logic for the Pedal Storefront
//!
//! This crate is the **heart** of the storefront. It holds the cart store and
//! the catalog filter as pure, synchronous code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pedal Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │    Listing ──► Search/Category ──► Cart ──► Checkout ──► Admin │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ UI events                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storefront commands (apps/storefront)        │   │
//! │  │    list_products, add_to_cart, save_product, checkout_summary   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pedal-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  filter   │  │   │
//! │  │   │  Category │  │  Rupiah   │  │ CartItem  │  │  Catalog  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ StoreBackend trait                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pedal-db (SQLite backend)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, ProductRecord, ProductDraft)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart store and its derived totals
//! - [`catalog`] - Catalog filter (category + free-text search)
//! - [`validation`] - Admin form validation
//! - [`backend`] - Contract for the optional persistence/auth backend
//! - [`notification`] - Contract for user-visible feedback
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pedal_core::cart::Cart;
//! use pedal_core::types::{Category, Product};
//! use pedal_core::Money;
//!
//! let fixie = Product::new("1", "Fixie A", Money::from_units(1_000_000), Category::Fixie, "Brand1");
//!
//! let mut cart = Cart::new();
//! cart.add(&fixie);
//! let totals = cart.add(&fixie);
//!
//! assert_eq!(totals.item_count, 2);
//! assert_eq!(totals.total.units(), 2_000_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod notification;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use backend::{BackendError, BackendErrorKind, BackendResult, CartLine, StoreBackend, UserId};
pub use cart::{Cart, CartItem, CartTotals};
pub use catalog::{filter, Catalog, CatalogQuery, CategoryFilter};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use notification::{Notification, NotificationSink, Severity};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category selector value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Maximum length of a product name accepted by the admin form.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum quantity of a single cart item.
///
/// `add` stops at this value and `update_quantity` clamps to it.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price (Rupiah) the admin form accepts.
pub const MAX_PRICE_UNITS: i64 = 1_000_000_000_000;
