//! # Checkout Commands
//!
//! Order summary shown on the checkout page. Payment is out of scope; the
//! summary is what the shopper confirms.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::commands::cart::CartLineDto;
use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};
use pedal_core::{CoreError, Money};

/// Checkout page data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutSummary {
    pub store_name: String,
    pub lines: Vec<CartLineDto>,
    pub item_count: i64,
    pub subtotal: Money,
    pub shipping_fee: Money,
    /// subtotal + shipping_fee
    pub total: Money,
    pub total_label: String,
}

/// Builds the checkout summary for the current cart.
///
/// ## Errors
/// `EmptyCart` when there is nothing to check out.
pub fn checkout_summary(
    session: &SessionState,
    config: &ConfigState,
) -> Result<CheckoutSummary, ApiError> {
    debug!("checkout_summary command");

    if session.cart.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let totals = session.cart.totals();
    let total = totals.total + config.shipping_fee;

    Ok(CheckoutSummary {
        store_name: config.store_name.clone(),
        lines: session.cart.items().iter().map(CartLineDto::from).collect(),
        item_count: totals.item_count,
        subtotal: totals.total,
        shipping_fee: config.shipping_fee,
        total,
        total_label: total.to_string(),
    })
}
