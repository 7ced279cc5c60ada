//! # Cart Commands
//!
//! Cart manipulation, with mirroring to the backend for signed-in shoppers.
//!
//! ## Mirroring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mutation                                        │
//! │                                                                         │
//! │  add_to_cart / update_cart_item / remove_from_cart / clear_cart        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Mutate the in-memory Cart (always succeeds)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Signed in? ── no ──► done                                          │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  3. upsert_cart_line(qty > 0) or delete_cart_line(qty = 0)             │
//! │       │                                                                 │
//! │       ├── Ok  ──► done                                                 │
//! │       └── Err ──► error notification; the in-memory cart is kept       │
//! │                                                                         │
//! │  The session cart is authoritative. A failed mirror is reported, never │
//! │  rolled back, and never retried.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::commands::catalog::ProductDto;
use crate::error::ApiError;
use crate::state::SessionState;
use pedal_core::{
    Cart, CartItem, CartTotals, CoreError, Money, Notification, NotificationSink, StoreBackend,
    UserId,
};

/// One cart row as the cart page shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineDto {
    pub product: ProductDto,
    pub quantity: i64,
    pub line_total: Money,
}

impl From<&CartItem> for CartLineDto {
    fn from(item: &CartItem) -> Self {
        CartLineDto {
            product: ProductDto::from(item.product()),
            quantity: item.quantity(),
            line_total: item.line_total(),
        }
    }
}

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub items: Vec<CartLineDto>,
    pub item_count: i64,
    pub total: Money,
    /// e.g. "Rp 2.500.000"
    pub total_label: String,
}

impl CartResponse {
    fn new(cart: &Cart, totals: CartTotals) -> Self {
        CartResponse {
            items: cart.items().iter().map(CartLineDto::from).collect(),
            item_count: totals.item_count,
            total: totals.total,
            total_label: totals.total.to_string(),
        }
    }
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse::new(cart, cart.totals())
    }
}

/// Gets the current cart contents.
pub fn get_cart(session: &SessionState) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(&session.cart)
}

/// Adds one unit of a catalog product to the cart.
///
/// Out-of-stock products are accepted; the listing disables their button.
pub async fn add_to_cart<B: StoreBackend>(
    backend: &B,
    session: &mut SessionState,
    sink: &dyn NotificationSink,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = session
        .catalog
        .get(product_id)
        .ok_or_else(|| ApiError::from(CoreError::ProductNotFound(product_id.to_string())))?;

    let totals = session.cart.add(product);
    sink.notify(
        Notification::info("Product added")
            .with_description(format!("{} was added to your cart", product.name)),
    );

    let quantity = session.cart.quantity_of(product_id).unwrap_or(0);
    mirror_line(backend, session.user.as_ref(), sink, product_id, quantity).await;

    Ok(CartResponse::new(&session.cart, totals))
}

/// Sets an item's quantity; zero or less removes it, larger than
/// `MAX_ITEM_QUANTITY` is clamped. Unknown ids change nothing and are not
/// mirrored.
pub async fn update_cart_item<B: StoreBackend>(
    backend: &B,
    session: &mut SessionState,
    sink: &dyn NotificationSink,
    product_id: &str,
    quantity: i64,
) -> CartResponse {
    debug!(product_id = %product_id, quantity, "update_cart_item command");

    let known = session.cart.contains(product_id);
    let totals = session.cart.update_quantity(product_id, quantity);

    if known {
        let stored = session.cart.quantity_of(product_id).unwrap_or(0);
        mirror_line(backend, session.user.as_ref(), sink, product_id, stored).await;
    }

    CartResponse::new(&session.cart, totals)
}

/// Removes an item from the cart (no-op if absent).
pub async fn remove_from_cart<B: StoreBackend>(
    backend: &B,
    session: &mut SessionState,
    sink: &dyn NotificationSink,
    product_id: &str,
) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    let known = session.cart.contains(product_id);
    let totals = session.cart.remove(product_id);

    if known {
        mirror_line(backend, session.user.as_ref(), sink, product_id, 0).await;
    }

    CartResponse::new(&session.cart, totals)
}

/// Empties the cart.
pub async fn clear_cart<B: StoreBackend>(
    backend: &B,
    session: &mut SessionState,
    sink: &dyn NotificationSink,
) -> CartResponse {
    debug!("clear_cart command");

    let lines = session.cart.lines();
    let totals = session.cart.clear();

    for line in &lines {
        mirror_line(backend, session.user.as_ref(), sink, &line.product_id, 0).await;
    }

    CartResponse::new(&session.cart, totals)
}

/// Writes one cart line to the backend for a signed-in user.
///
/// Returns whether the backend accepted the write (trivially true when
/// signed out). Failures are reported to `sink` and otherwise ignored.
pub(crate) async fn mirror_line<B: StoreBackend>(
    backend: &B,
    user: Option<&UserId>,
    sink: &dyn NotificationSink,
    product_id: &str,
    quantity: i64,
) -> bool {
    let Some(user) = user else {
        return true;
    };

    let result = if quantity > 0 {
        backend.upsert_cart_line(user, product_id, quantity).await
    } else {
        backend.delete_cart_line(user, product_id).await
    };

    match result {
        Ok(()) => true,
        Err(err) => {
            warn!(
                user_id = %user,
                product_id = %product_id,
                kind = %err.kind,
                error = %err.message,
                "Cart mirroring failed"
            );
            sink.notify(ApiError::from(err).to_notification());
            false
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
