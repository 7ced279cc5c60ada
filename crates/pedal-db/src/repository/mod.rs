//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreBackend call (backend.rs)                                        │
//! │       │                                                                 │
//! │       │  db.products().insert(&draft)                                  │
//! │       ▼                                                                 │
//! │  ProductRepository   list, get_by_id, insert, update, delete, count    │
//! │  CartRepository      list, upsert, delete, clear                       │
//! │  UserRepository      find_by_email, create                             │
//! │       │                                                                 │
//! │       │  SQL (runtime-checked sqlx queries)                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod product;
pub mod user;
