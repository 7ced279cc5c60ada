//! # State Module
//!
//! State owned by the storefront process.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │  Backend (B)     │ │  SessionState    │ │    ConfigState       │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • pedal-db      │ │  • Catalog       │ │  • Store name        │   │
//! │  │    Database      │ │  • Cart          │ │  • Shipping fee      │   │
//! │  │  • or any        │ │  • Signed-in     │ │  • DB path, email    │   │
//! │  │    StoreBackend  │ │    user          │ │                      │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  Each command takes only the pieces it needs.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigError, ConfigState};
pub use session::SessionState;
