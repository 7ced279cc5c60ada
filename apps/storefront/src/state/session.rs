//! # Session State
//!
//! Everything one shopper session owns: the loaded catalog, the cart and
//! the signed-in user (if any).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SessionState                                                           │
//! │  ├── catalog: Catalog         loaded from the backend, read by filters │
//! │  ├── cart: Cart               authoritative for this session           │
//! │  └── user: Option<UserId>     Some(..) → cart mutations are mirrored    │
//! │                                                                         │
//! │  Commands borrow it mutably; there is exactly one owner, so no locks.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pedal_core::{Cart, Catalog, UserId};

/// State of one shopper session.
#[derive(Debug, Default)]
pub struct SessionState {
    pub catalog: Catalog,
    pub cart: Cart,
    pub user: Option<UserId>,
}

impl SessionState {
    /// An empty session (no catalog yet, empty cart, signed out).
    pub fn new() -> Self {
        Self::default()
    }

    /// A session over an already-loaded catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        SessionState {
            catalog,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Ends the session: forgets the user and discards the cart.
    pub fn end(&mut self) {
        self.user = None;
        self.cart.clear();
    }
}
