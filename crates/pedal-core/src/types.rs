//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductRecord  │   │  ProductDraft   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product        │   │  name, price    │       │
//! │  │  name, brand    │   │  stock          │   │  stock, image   │       │
//! │  │  price          │   │  created_at     │   │  category ...   │       │
//! │  │  category       │   │  updated_at     │   │  (admin input)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  Category: fixie │ velg │ ban │ gear │ frame │ saddle │ stang │     │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Product` is what the storefront lists, filters and puts in the cart.
//! `ProductRecord` is the admin panel's view of the same row, with stock
//! and timestamps. `ProductDraft` is validated admin input ready to be
//! written by the backend.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Product category. The storefront sells a fixed set of part types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Complete fixed-gear bikes.
    Fixie,
    /// Rims and wheelsets.
    Velg,
    /// Tyres.
    Ban,
    /// Chainrings, cogs and drivetrain parts.
    Gear,
    Frame,
    Saddle,
    /// Handlebars.
    Stang,
}

impl Category {
    /// Every category, in the order the category bar shows them.
    pub const ALL: [Category; 7] = [
        Category::Fixie,
        Category::Velg,
        Category::Ban,
        Category::Gear,
        Category::Frame,
        Category::Saddle,
        Category::Stang,
    ];

    /// The lowercase identifier used in URLs, filters and the database.
    pub const fn slug(&self) -> &'static str {
        match self {
            Category::Fixie => "fixie",
            Category::Velg => "velg",
            Category::Ban => "ban",
            Category::Gear => "gear",
            Category::Frame => "frame",
            Category::Saddle => "saddle",
            Category::Stang => "stang",
        }
    }

    /// Human-readable label for navigation.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Fixie => "Fixie",
            Category::Velg => "Velg",
            Category::Ban => "Ban",
            Category::Gear => "Gear",
            Category::Frame => "Frame",
            Category::Saddle => "Saddle",
            Category::Stang => "Stang",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Fixie
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.slug().to_string()).collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the storefront catalog.
///
/// Immutable once loaded for a session: the cart keeps its own copy, so a
/// later catalog refresh never rewrites what the shopper already added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: String,

    /// Display name shown on the card and in the cart.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Price before discount. Always >= `price` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub original_price: Option<Money>,

    /// Image URL.
    #[serde(default)]
    pub image: String,

    pub category: Category,

    pub brand: String,

    #[serde(default)]
    pub description: String,

    /// Free-form specification table (e.g. "Material" → "Chromoly").
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,

    /// Whether the product can currently be bought. The cart itself does not
    /// enforce this; the add button is disabled instead.
    pub in_stock: bool,

    /// Highlighted on the landing page.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Creates an in-stock product with the required fields; everything
    /// else starts empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        category: Category,
        brand: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            image: String::new(),
            category,
            brand: brand.into(),
            description: String::new(),
            specifications: BTreeMap::new(),
            in_stock: true,
            featured: false,
        }
    }

    pub fn with_original_price(mut self, original: Money) -> Self {
        self.original_price = Some(original);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_spec(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.specifications.insert(key.into(), value.into());
        self
    }

    pub fn mark_featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Discount badge value (0 when there is no original price).
    #[inline]
    pub fn discount_percent(&self) -> u32 {
        self.price.discount_percent_from(self.original_price)
    }
}

// =============================================================================
// Admin Records
// =============================================================================

/// A product as the admin panel sees it: the catalog fields plus stock and
/// bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRecord {
    #[serde(flatten)]
    pub product: Product,

    /// Units on hand. `product.in_stock` is derived from this on write.
    pub stock: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Validated admin input for creating or updating a product.
///
/// Built by [`crate::validation::ProductForm::parse`]; the backend assigns
/// the id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub original_price: Option<Money>,
    pub stock: i64,
    pub image: String,
    pub category: Category,
    pub brand: String,
    pub featured: bool,
    pub specifications: BTreeMap<String, String>,
}

impl ProductDraft {
    /// Whether a product written from this draft is purchasable.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Materializes the catalog view of this draft under the given id.
    pub fn to_product(&self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name.clone(),
            price: self.price,
            original_price: self.original_price,
            image: self.image.clone(),
            category: self.category,
            brand: self.brand.clone(),
            description: self.description.clone(),
            specifications: self.specifications.clone(),
            in_stock: self.in_stock(),
            featured: self.featured,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_slug_round_trips() {
        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_rejects_unknown_slug() {
        let err = "bmx".parse::<Category>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
        // Slugs are case-sensitive, like the stored values
        assert!("Fixie".parse::<Category>().is_err());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product::new("p1", "Velg Deep 50mm", Money::from_units(850_000), Category::Velg, "Vuelta")
            .with_original_price(Money::from_units(1_000_000));

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["originalPrice"], 1_000_000);
        assert_eq!(json["inStock"], true);
        assert_eq!(json["category"], "velg");
    }

    #[test]
    fn test_product_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "1",
            "name": "Fixie A",
            "price": 1000000,
            "category": "fixie",
            "brand": "Brand1",
            "inStock": true
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.original_price, None);
        assert!(!product.featured);
        assert!(product.specifications.is_empty());
    }

    #[test]
    fn test_product_discount() {
        let product = Product::new("p1", "Ban 700x23", Money::from_units(90_000), Category::Ban, "Kenda")
            .with_original_price(Money::from_units(120_000));
        assert_eq!(product.discount_percent(), 25);

        let plain = Product::new("p2", "Ban 700x25", Money::from_units(90_000), Category::Ban, "Kenda");
        assert_eq!(plain.discount_percent(), 0);
    }

    #[test]
    fn test_draft_derives_in_stock_from_stock() {
        let mut draft = ProductDraft {
            name: "Saddle Slim".to_string(),
            description: String::new(),
            price: Money::from_units(250_000),
            original_price: None,
            stock: 0,
            image: String::new(),
            category: Category::Saddle,
            brand: "Velo".to_string(),
            featured: false,
            specifications: BTreeMap::new(),
        };
        assert!(!draft.to_product("x").in_stock);

        draft.stock = 4;
        let product = draft.to_product("x");
        assert!(product.in_stock);
        assert_eq!(product.id, "x");
        assert_eq!(product.category, Category::Saddle);
    }
}
