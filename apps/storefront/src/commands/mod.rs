//! # Storefront Commands Module
//!
//! Every operation the storefront UI can trigger.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Listing, search, product detail
//! ├── cart.rs      ◄─── Cart manipulation + backend mirroring
//! ├── checkout.rs  ◄─── Checkout summary
//! ├── admin.rs     ◄─── Product create/edit/delete
//! └── session.rs   ◄─── Sign-in / sign-out
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI event (shell line, button)                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn add_to_cart<B: StoreBackend>(                                 │
//! │      backend: &B,                   ◄── pedal-db Database in the app   │
//! │      session: &mut SessionState,    ◄── catalog, cart, user            │
//! │      sink: &dyn NotificationSink,   ◄── toasts                         │
//! │      product_id: &str,              ◄── from the event                 │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Serializable DTO (camelCase) back to the UI                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command declares only the state it needs: pure reads take
//! `&SessionState`, anything touching persistence is generic over
//! [`pedal_core::StoreBackend`].

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
