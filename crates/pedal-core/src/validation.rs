//! # Validation Module
//!
//! Parses and validates the admin product form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Admin Save Flow                                    │
//! │                                                                         │
//! │  ProductForm (strings, exactly as typed)                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ProductForm::parse() ← THIS MODULE                                    │
//! │  ├── name:           required, ≤ 200 chars                             │
//! │  ├── price:          number ≥ 0                                        │
//! │  ├── stock:          integer ≥ 0                                       │
//! │  ├── original price: empty, or number ≥ price                          │
//! │  └── category:       empty → fixie, else one of the fixed set          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ProductDraft ──► StoreBackend::insert_product / update_product        │
//! │                                                                         │
//! │  Nothing reaches the backend until the whole form parses.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pedal_core::validation::ProductForm;
//!
//! let form = ProductForm {
//!     name: "Velg Deep 50mm".to_string(),
//!     price: "850000".to_string(),
//!     stock: "3".to_string(),
//!     category: "velg".to_string(),
//!     ..ProductForm::default()
//! };
//! let draft = form.parse().unwrap();
//! assert!(draft.in_stock());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, ProductDraft, ProductRecord};
use crate::{MAX_PRICE_UNITS, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Form
// =============================================================================

/// Raw admin form input. Text fields hold whatever the admin typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub image: String,
    pub category: String,
    pub brand: String,
    /// Empty when the product is not discounted.
    pub original_price: String,
    pub featured: bool,
    pub specifications: BTreeMap<String, String>,
}

impl ProductForm {
    /// Pre-fills the form for editing an existing record.
    pub fn from_record(record: &ProductRecord) -> Self {
        let product = &record.product;
        ProductForm {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.units().to_string(),
            stock: record.stock.to_string(),
            image: product.image.clone(),
            category: product.category.slug().to_string(),
            brand: product.brand.clone(),
            original_price: product
                .original_price
                .map(|m| m.units().to_string())
                .unwrap_or_default(),
            featured: product.featured,
            specifications: product.specifications.clone(),
        }
    }

    /// Validates every field and builds the draft the backend will write.
    ///
    /// The first failing field is reported.
    pub fn parse(&self) -> ValidationResult<ProductDraft> {
        validate_product_name(&self.name)?;
        let price = validate_price("price", &self.price)?;
        let stock = validate_stock(&self.stock)?;
        let original_price = validate_original_price(&self.original_price, price)?;
        let category = validate_category(&self.category)?;

        Ok(ProductDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            original_price,
            stock,
            image: self.image.trim().to_string(),
            category,
            brand: self.brand.trim().to_string(),
            featured: self.featured,
            specifications: self.specifications.clone(),
        })
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ```rust
/// use pedal_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Frame Chromoly 52cm").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Parses a Rupiah amount. Fractional input is rounded to the nearest
/// whole Rupiah; amounts above [`MAX_PRICE_UNITS`] are rejected.
///
/// ```rust
/// use pedal_core::validation::validate_price;
///
/// assert_eq!(validate_price("price", "850000").unwrap().units(), 850_000);
/// assert_eq!(validate_price("price", "99.6").unwrap().units(), 100);
/// assert!(validate_price("price", "-1").is_err());
/// assert!(validate_price("price", "").is_err());
/// assert!(validate_price("price", "9223372036854775807").is_err());
/// ```
pub fn validate_price(field: &str, raw: &str) -> ValidationResult<Money> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let units = match raw.parse::<i64>() {
        Ok(units) => units,
        Err(_) => {
            let value: f64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "must be a number".to_string(),
            })?;
            if !value.is_finite() || value.abs() > i64::MAX as f64 {
                return Err(ValidationError::InvalidFormat {
                    field: field.to_string(),
                    reason: "must be a number".to_string(),
                });
            }
            value.round() as i64
        }
    };

    if units < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if units > MAX_PRICE_UNITS {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_PRICE_UNITS,
        });
    }

    Ok(Money::from_units(units))
}

/// Parses a stock count: a whole number, zero or more.
pub fn validate_stock(raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "stock".to_string(),
        });
    }

    let stock: i64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "stock".to_string(),
        reason: "must be a whole number".to_string(),
    })?;

    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    Ok(stock)
}

/// An empty field means "no discount".
fn validate_original_price(raw: &str, price: Money) -> ValidationResult<Option<Money>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let original = validate_price("original price", raw)?;
    if original < price {
        return Err(ValidationError::OriginalBelowPrice);
    }

    Ok(Some(original))
}

fn validate_category(raw: &str) -> ValidationResult<Category> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Category::default());
    }
    raw.parse()
}

// =============================================================================
// Unit Tests
// =============================================================================
