//! # Admin Commands
//!
//! Product management for the admin panel: list, create, edit and delete.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Admin Save Flow                                      │
//! │                                                                         │
//! │  ProductForm (raw strings from the dialog)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  form.parse() ── Err ──► "Error" notification, backend untouched       │
//! │       │ Ok(ProductDraft)                                                │
//! │       ▼                                                                 │
//! │  editing_id?  Some(id) ──► update_product(id, draft)                   │
//! │               None     ──► insert_product(draft)                       │
//! │       │                                                                 │
//! │       ├── Err ──► "Error" notification with the backend message        │
//! │       ▼                                                                 │
//! │  "Product added" / "Product updated"                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  refresh_catalog + reprice the session cart                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use crate::commands::catalog::{refresh_catalog, ProductDto};
use crate::error::ApiError;
use crate::state::SessionState;
use pedal_core::validation::ProductForm;
use pedal_core::{Cart, Notification, NotificationSink, ProductRecord, StoreBackend};

/// All products with stock and timestamps, newest first.
pub async fn list_admin_products<B: StoreBackend>(
    backend: &B,
    sink: &dyn NotificationSink,
) -> Result<Vec<ProductRecord>, ApiError> {
    debug!("list_admin_products command");
    backend
        .list_products()
        .await
        .map_err(|e| report(sink, e.into()))
}

/// Loads the edit dialog for an existing product.
pub async fn edit_form<B: StoreBackend>(backend: &B, id: &str) -> Result<ProductForm, ApiError> {
    debug!(id = %id, "edit_form command");
    let record = backend.get_product(id).await?;
    Ok(ProductForm::from_record(&record))
}

/// Creates (`editing_id = None`) or updates a product from the admin form.
pub async fn save_product<B: StoreBackend>(
    backend: &B,
    session: &mut SessionState,
    sink: &dyn NotificationSink,
    form: &ProductForm,
    editing_id: Option<&str>,
) -> Result<ProductDto, ApiError> {
    debug!(editing_id = ?editing_id, "save_product command");

    let draft = form.parse().map_err(|e| report(sink, e.into()))?;

    let (record, title) = match editing_id {
        Some(id) => (backend.update_product(id, &draft).await, "Product updated"),
        None => (backend.insert_product(&draft).await, "Product added"),
    };
    let record = record.map_err(|e| report(sink, e.into()))?;

    info!(id = %record.product.id, name = %record.product.name, "{}", title);
    sink.notify(Notification::info(title).with_description(record.product.name.clone()));

    resync(backend, session, sink).await;
    Ok(ProductDto::from(&record.product))
}

/// Deletes a product. Cart lines for it disappear with it.
pub async fn delete_product<B: StoreBackend>(
    backend: &B,
    session: &mut SessionState,
    sink: &dyn NotificationSink,
    id: &str,
) -> Result<(), ApiError> {
    debug!(id = %id, "delete_product command");

    backend
        .delete_product(id)
        .await
        .map_err(|e| report(sink, e.into()))?;

    info!(id = %id, "Product deleted");
    sink.notify(Notification::info("Product deleted"));

    resync(backend, session, sink).await;
    Ok(())
}

/// Reloads the catalog after an admin write and rebuilds the cart against
/// it, so prices follow edits and deleted products drop out.
async fn resync<B: StoreBackend>(backend: &B, session: &mut SessionState, sink: &dyn NotificationSink) {
    if let Err(err) = refresh_catalog(backend, session).await {
        report(sink, err);
        return;
    }
    let lines = session.cart.lines();
    session.cart = Cart::from_lines(&lines, &session.catalog);
}

fn report(sink: &dyn NotificationSink, err: ApiError) -> ApiError {
    warn!(code = ?err.code, error = %err.message, "Admin command failed");
    sink.notify(err.to_notification());
    err
}

// =============================================================================
// Unit Tests
// =============================================================================
