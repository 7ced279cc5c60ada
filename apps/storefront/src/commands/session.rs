//! # Session Commands
//!
//! Signing in and out.
//!
//! ## Sign-in
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sign_in("rider@pedal.test")                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  authenticate ──► UserId          (Err → "Error" notification)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load_cart(user) ──► persisted lines                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart::from_lines(persisted ++ guest)   quantities accumulate          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mirror each guest line's merged quantity back to the backend          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use crate::commands::cart::{mirror_line, CartResponse};
use crate::error::ApiError;
use crate::state::SessionState;
use pedal_core::{Cart, Notification, NotificationSink, StoreBackend};

/// Signs a shopper in and hydrates the session cart from the backend.
///
/// Anything added while signed out is merged into the persisted cart.
/// Signing in over an existing account ends that session first, so its
/// cart is never merged into the new account.
pub async fn sign_in<B: StoreBackend>(
    backend: &B,
    session: &mut SessionState,
    sink: &dyn NotificationSink,
    email: &str,
) -> Result<CartResponse, ApiError> {
    debug!(email = %email, "sign_in command");

    let hydrated = async {
        let user = backend.authenticate(email).await?;
        let persisted = backend.load_cart(&user).await?;
        Ok::<_, ApiError>((user, persisted))
    }
    .await;

    let (user, persisted) = match hydrated {
        Ok(v) => v,
        Err(err) => {
            warn!(email = %email, error = %err.message, "Sign-in failed");
            sink.notify(err.to_notification());
            return Err(err);
        }
    };

    let guest = if let Some(previous) = &session.user {
        info!(previous = %previous, next = %user, "Switching account");
        session.end();
        Vec::new()
    } else {
        session.cart.lines()
    };
    session.cart = Cart::from_lines(persisted.iter().chain(guest.iter()), &session.catalog);

    for line in &guest {
        if let Some(quantity) = session.cart.quantity_of(&line.product_id) {
            mirror_line(backend, Some(&user), sink, &line.product_id, quantity).await;
        }
    }

    info!(
        user_id = %user,
        persisted = persisted.len(),
        merged = guest.len(),
        "Signed in"
    );
    sink.notify(Notification::info("Signed in").with_description(email.to_string()));
    session.user = Some(user);

    Ok(CartResponse::from(&session.cart))
}

/// Signs out; the session cart is discarded (the persisted one stays).
pub fn sign_out(session: &mut SessionState, sink: &dyn NotificationSink) -> CartResponse {
    debug!("sign_out command");
    if session.is_signed_in() {
        sink.notify(Notification::info("Signed out"));
    }
    session.end();
    CartResponse::from(&session.cart)
}
