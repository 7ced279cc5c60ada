//! # pedal-db: Database Layer for the Pedal Storefront
//!
//! SQLite storage for products, shopper accounts and persisted carts, with
//! sqlx for async access. [`Database`] implements
//! [`pedal_core::StoreBackend`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Data Flow                                │
//! │                                                                         │
//! │  Storefront command (add_to_cart, save_product, sign_in)               │
//! │       │                                                                 │
//! │       ▼  StoreBackend                                                   │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     pedal-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CartRepo      │    │ 001_initial  │  │   │
//! │  │   │               │    │ UserRepo      │    │  _schema.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (WAL)  users • products • cart_items                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use pedal_core::StoreBackend;
//! use pedal_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./pedal.db")).await?;
//! let products = db.list_products().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::cart::CartRepository;
pub use repository::product::ProductRepository;
pub use repository::user::{User, UserRepository};
