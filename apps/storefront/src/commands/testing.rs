//! In-memory backend and fixtures shared by the command tests.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::Utc;

use crate::state::SessionState;
use pedal_core::{
    BackendError, BackendErrorKind, BackendResult, CartLine, Catalog, Category, Money, Product,
    ProductDraft, ProductRecord, StoreBackend, UserId,
};

/// Accounts the test backend knows: `u-1` and `u-2`.
pub(crate) const RIDER_EMAIL: &str = "rider@pedal.test";
pub(crate) const COMMUTER_EMAIL: &str = "commuter@pedal.test";

/// Backend keeping everything in memory and recording cart writes as
/// `"upsert <id> <qty>"` / `"delete <id>"`.
#[derive(Default)]
pub(crate) struct RecordingBackend {
    failure: Option<String>,
    products: RefCell<Vec<ProductRecord>>,
    carts: RefCell<HashMap<String, Vec<CartLine>>>,
    calls: RefCell<Vec<String>>,
}

impl RecordingBackend {
    /// Every call fails as `Unavailable` with `message`.
    pub(crate) fn failing(message: &str) -> Self {
        RecordingBackend {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn with_products(products: Vec<Product>) -> Self {
        let now = Utc::now();
        let records = products
            .into_iter()
            .map(|product| ProductRecord {
                stock: if product.in_stock { 10 } else { 0 },
                product,
                created_at: now,
                updated_at: now,
            })
            .collect();
        RecordingBackend {
            products: RefCell::new(records),
            ..Self::default()
        }
    }

    pub(crate) fn with_cart(self, user: &str, lines: Vec<CartLine>) -> Self {
        self.carts.borrow_mut().insert(user.to_string(), lines);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub(crate) fn cart_of(&self, user: &str) -> Vec<CartLine> {
        self.carts.borrow().get(user).cloned().unwrap_or_default()
    }

    fn check(&self) -> BackendResult<()> {
        match &self.failure {
            Some(message) => Err(BackendError::new(BackendErrorKind::Unavailable, message.clone())),
            None => Ok(()),
        }
    }
}

impl StoreBackend for RecordingBackend {
    async fn authenticate(&self, email: &str) -> BackendResult<UserId> {
        self.check()?;
        match email {
            RIDER_EMAIL => Ok(UserId::new("u-1")),
            COMMUTER_EMAIL => Ok(UserId::new("u-2")),
            _ => Err(BackendError::unauthenticated(format!(
                "No account registered for {}",
                email
            ))),
        }
    }

    async fn list_products(&self) -> BackendResult<Vec<ProductRecord>> {
        self.check()?;
        Ok(self.products.borrow().clone())
    }

    async fn get_product(&self, id: &str) -> BackendResult<ProductRecord> {
        self.check()?;
        self.products
            .borrow()
            .iter()
            .find(|r| r.product.id == id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("Product", id))
    }

    async fn insert_product(&self, draft: &ProductDraft) -> BackendResult<ProductRecord> {
        self.check()?;
        let mut products = self.products.borrow_mut();
        let now = Utc::now();
        let record = ProductRecord {
            product: draft.to_product(format!("p-{}", products.len() + 1)),
            stock: draft.stock,
            created_at: now,
            updated_at: now,
        };
        // Newest first
        products.insert(0, record.clone());
        Ok(record)
    }

    async fn update_product(&self, id: &str, draft: &ProductDraft) -> BackendResult<ProductRecord> {
        self.check()?;
        let mut products = self.products.borrow_mut();
        let record = products
            .iter_mut()
            .find(|r| r.product.id == id)
            .ok_or_else(|| BackendError::not_found("Product", id))?;
        record.product = draft.to_product(id);
        record.stock = draft.stock;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete_product(&self, id: &str) -> BackendResult<()> {
        self.check()?;
        let mut products = self.products.borrow_mut();
        let before = products.len();
        products.retain(|r| r.product.id != id);
        if products.len() == before {
            return Err(BackendError::not_found("Product", id));
        }
        for lines in self.carts.borrow_mut().values_mut() {
            lines.retain(|l| l.product_id != id);
        }
        Ok(())
    }

    async fn load_cart(&self, user: &UserId) -> BackendResult<Vec<CartLine>> {
        self.check()?;
        Ok(self.cart_of(user.as_str()))
    }

    async fn upsert_cart_line(&self, user: &UserId, product_id: &str, quantity: i64) -> BackendResult<()> {
        self.check()?;
        let mut carts = self.carts.borrow_mut();
        let lines = carts.entry(user.as_str().to_string()).or_default();
        match lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = quantity,
            None => lines.push(CartLine::new(product_id, quantity)),
        }
        self.calls
            .borrow_mut()
            .push(format!("upsert {} {}", product_id, quantity));
        Ok(())
    }

    async fn delete_cart_line(&self, user: &UserId, product_id: &str) -> BackendResult<()> {
        self.check()?;
        if let Some(lines) = self.carts.borrow_mut().get_mut(user.as_str()) {
            lines.retain(|l| l.product_id != product_id);
        }
        self.calls.borrow_mut().push(format!("delete {}", product_id));
        Ok(())
    }
}

/// Fixie A (1 000 000), Velg B (500 000) and an out-of-stock tyre.
pub(crate) fn sample_products() -> Vec<Product> {
    vec![
        Product::new("1", "Fixie A", Money::from_units(1_000_000), Category::Fixie, "Brand1"),
        Product::new("2", "Velg B", Money::from_units(500_000), Category::Velg, "Brand2"),
        Product::new("3", "Ban Slick", Money::from_units(95_000), Category::Ban, "Kenda")
            .out_of_stock(),
    ]
}

pub(crate) fn sample_session() -> SessionState {
    SessionState::with_catalog(Catalog::new(sample_products()))
}
