//! # Pedal Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pedal Storefront                                 │
//! │                                                                         │
//! │  main.rs ────► tokio runtime, hands off to storefront::run()           │
//! │                                                                         │
//! │  lib.rs ─────► logging, config, database, catalog, shell               │
//! │                                                                         │
//! │  commands/ ──► list_products, add_to_cart, save_product, checkout      │
//! │                                                                         │
//! │  state/ ─────► SessionState, ConfigState                               │
//! │                         │                                               │
//! │                         ▼                                               │
//! │  SQLite: pedal.db (local file, WAL mode)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Seed a fresh database first with `cargo run -p pedal-db --bin seed`.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    storefront::run().await
}
