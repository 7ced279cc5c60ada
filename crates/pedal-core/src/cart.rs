//! # Cart Store
//!
//! The shopper's in-progress selection: an ordered list of products with
//! quantities, plus the two derived figures the UI shows everywhere (item
//! count badge, order total).
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action               Cart Method              Cart Change           │
//! │  ─────────               ───────────              ───────────           │
//! │                                                                         │
//! │  "Add to cart" ────────► add(&product) ─────────► qty + 1 or push      │
//! │                                                                         │
//! │  +/- buttons ──────────► update_quantity(id, n) ─► qty = n, n <= 0     │
//! │                                                    removes the item     │
//! │                                                                         │
//! │  Trash icon ───────────► remove(id) ─────────────► items.retain(..)    │
//! │                                                                         │
//! │  Every mutation returns CartTotals computed from the items.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by product id (adding again increases quantity)
//! - Every quantity is in `1..=MAX_ITEM_QUANTITY`
//! - `total() == Σ price × quantity` and `item_count() == Σ quantity`;
//!   neither is stored, both are recomputed from `items` on demand
//! - Unknown product ids are silent no-ops, never phantom entries

use serde::Serialize;
use ts_rs::TS;

use crate::backend::CartLine;
use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::Product;
use crate::MAX_ITEM_QUANTITY;

/// A product in the cart with its quantity.
///
/// Fields are private so the quantity can only change through [`Cart`],
/// which keeps it positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    product: Product,
    quantity: i64,
}

impl CartItem {
    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Always at least 1.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

/// Derived cart figures returned from every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Sum of quantities (the header badge).
    pub item_count: i64,
    /// Sum of price × quantity.
    pub total: Money,
}

/// The shopping cart.
///
/// Owned by exactly one session and passed around by reference; there is
/// no shared or global cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from persisted lines.
    ///
    /// Lines pointing at products missing from `catalog`, or with a
    /// quantity <= 0, are dropped. Repeated lines for the same product
    /// accumulate. Order follows `lines`.
    pub fn from_lines<'a, I>(lines: I, catalog: &Catalog) -> Self
    where
        I: IntoIterator<Item = &'a CartLine>,
    {
        let mut cart = Cart::new();
        for line in lines {
            if line.quantity <= 0 {
                continue;
            }
            if let Some(product) = catalog.get(&line.product_id) {
                cart.add_quantity(product, line.quantity);
            }
        }
        cart
    }

    /// Adds one unit of `product`.
    ///
    /// Increments the existing item or appends a new one with quantity 1.
    /// An item already at [`MAX_ITEM_QUANTITY`] stays there.
    /// Out-of-stock products are accepted; stock is the caller's concern.
    pub fn add(&mut self, product: &Product) -> CartTotals {
        self.add_quantity(product, 1);
        self.totals()
    }

    /// Sets the quantity of an item.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the item
    /// - `quantity > MAX_ITEM_QUANTITY`: clamped to the maximum
    /// - product not in cart: no-op
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CartTotals {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        if let Some(item) = self.find_mut(product_id) {
            item.quantity = quantity.min(MAX_ITEM_QUANTITY);
        }
        self.totals()
    }

    /// Removes an item by product id. No-op if it is not in the cart.
    pub fn remove(&mut self, product_id: &str) -> CartTotals {
        self.items.retain(|i| i.product.id != product_id);
        self.totals()
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> CartTotals {
        self.items.clear();
        self.totals()
    }

    /// Items in the order they were first added.
    #[inline]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.item_count(),
            total: self.total(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|i| i.product.id == product_id)
    }

    /// Quantity of a product, or `None` if it is not in the cart.
    pub fn quantity_of(&self, product_id: &str) -> Option<i64> {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map(|i| i.quantity)
    }

    /// Id/quantity pairs, the shape a backend persists.
    pub fn lines(&self) -> Vec<CartLine> {
        self.items
            .iter()
            .map(|i| CartLine::new(i.product.id.clone(), i.quantity))
            .collect()
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| i.product.id == product_id)
    }

    fn add_quantity(&mut self, product: &Product, quantity: i64) {
        debug_assert!(quantity > 0);

        if let Some(item) = self.find_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(quantity).min(MAX_ITEM_QUANTITY);
            return;
        }

        self.items.push(CartItem {
            product: product.clone(),
            quantity: quantity.min(MAX_ITEM_QUANTITY),
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use proptest::prelude::*;

    fn fixie() -> Product {
        Product::new("1", "Fixie A", Money::from_units(1_000_000), Category::Fixie, "Brand1")
    }

    fn velg() -> Product {
        Product::new("2", "Velg B", Money::from_units(500_000), Category::Velg, "Brand2")
    }

    #[test]
    fn test_add_new_product() {
        let mut cart = Cart::new();
        let totals = cart.add(&fixie());

        assert_eq!(cart.items().len(), 1);
        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.total.units(), 1_000_000);
    }

    #[test]
    fn test_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        cart.add(&fixie());
        cart.add(&fixie());

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of("1"), Some(2));
    }

    #[test]
    fn test_add_out_of_stock_is_allowed() {
        let mut cart = Cart::new();
        cart.add(&fixie().out_of_stock());
        assert!(cart.contains("1"));
    }

    #[test]
    fn test_worked_example() {
        let mut cart = Cart::new();
        cart.add(&fixie());
        cart.add(&fixie());
        let totals = cart.add(&velg());

        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.total.units(), 2_500_000);

        let totals = cart.update_quantity("1", 0);
        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.total.units(), 500_000);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product().id, "2");
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut cart = Cart::new();
        cart.add(&velg());
        cart.add(&fixie());
        cart.add(&velg());

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product().id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add(&velg());
        let totals = cart.update_quantity("2", 4);

        assert_eq!(cart.quantity_of("2"), Some(4));
        assert_eq!(totals.total.units(), 2_000_000);
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let mut cart = Cart::new();
        cart.add(&velg());
        cart.update_quantity("2", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_clamps_to_maximum() {
        let mut cart = Cart::new();
        cart.add(&fixie());

        let totals = cart.update_quantity("1", 10_000_000_000_000);

        assert_eq!(cart.quantity_of("1"), Some(MAX_ITEM_QUANTITY));
        assert_eq!(totals.item_count, MAX_ITEM_QUANTITY);
        assert_eq!(totals.total.units(), 1_000_000 * MAX_ITEM_QUANTITY);

        let totals = cart.update_quantity("1", i64::MAX);
        assert_eq!(totals.item_count, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_add_stops_at_maximum() {
        let mut cart = Cart::new();
        cart.add(&velg());
        cart.update_quantity("2", MAX_ITEM_QUANTITY);

        let totals = cart.add(&velg());

        assert_eq!(cart.quantity_of("2"), Some(MAX_ITEM_QUANTITY));
        assert_eq!(totals.total.units(), 500_000 * MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_hydration_clamps_quantities() {
        let catalog = Catalog::new(vec![fixie()]);
        let lines = vec![CartLine::new("1", i64::MAX), CartLine::new("1", i64::MAX)];

        let cart = Cart::from_lines(&lines, &catalog);

        assert_eq!(cart.quantity_of("1"), Some(MAX_ITEM_QUANTITY));
    }

    #[test]
    fn test_extreme_price_does_not_panic() {
        let mut cart = Cart::new();
        let gold = Product::new("y", "Gold Frame", Money::from_units(i64::MAX), Category::Frame, "Aurum");
        cart.add(&gold);
        cart.add(&fixie());

        let totals = cart.update_quantity("y", 5);

        assert_eq!(totals.total.units(), i64::MAX);
        assert_eq!(totals.item_count, 6);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&fixie());
        let before = cart.clone();

        cart.update_quantity("missing", 5);
        cart.update_quantity("missing", 0);

        assert_eq!(cart, before);
        assert!(!cart.contains("missing"));
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(&fixie());
        cart.add(&velg());

        let totals = cart.remove("1");
        assert_eq!(totals.item_count, 1);
        assert!(!cart.contains("1"));

        // Removing again is a no-op
        let totals = cart.remove("1");
        assert_eq!(totals.item_count, 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&fixie());
        let totals = cart.clear();

        assert!(cart.is_empty());
        assert_eq!(totals.item_count, 0);
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_lines_and_hydration() {
        let catalog = Catalog::new(vec![fixie(), velg()]);

        let lines = vec![
            CartLine::new("2", 3),
            CartLine::new("ghost", 1),
            CartLine::new("1", 0),
            CartLine::new("2", 1),
        ];
        let cart = Cart::from_lines(&lines, &catalog);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of("2"), Some(4));
        assert_eq!(cart.lines(), vec![CartLine::new("2", 4)]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Update(usize, i64),
        Remove(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..4).prop_map(Op::Add),
            ((0usize..5), (-2i64..6)).prop_map(|(i, q)| Op::Update(i, q)),
            ((0usize..5), (MAX_ITEM_QUANTITY - 2..i64::MAX)).prop_map(|(i, q)| Op::Update(i, q)),
            (0usize..5).prop_map(Op::Remove),
        ]
    }

    fn catalog_products() -> Vec<Product> {
        vec![
            fixie(),
            velg(),
            Product::new("3", "Ban C", Money::from_units(85_000), Category::Ban, "Kenda"),
            Product::new("4", "Gear D", Money::from_units(0), Category::Gear, "Free"),
        ]
    }

    proptest! {
        #[test]
        fn prop_item_count_equals_number_of_adds(picks in prop::collection::vec(0usize..4, 0..40)) {
            let products = catalog_products();
            let mut cart = Cart::new();
            for &i in &picks {
                cart.add(&products[i]);
            }
            prop_assert_eq!(cart.item_count(), picks.len() as i64);
        }

        #[test]
        fn prop_totals_match_items_after_every_mutation(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let products = catalog_products();
            let id_of = |i: usize| products.get(i).map(|p| p.id.clone()).unwrap_or_else(|| "unknown".to_string());
            let mut cart = Cart::new();

            for op in ops {
                let totals = match op {
                    Op::Add(i) => cart.add(&products[i]),
                    Op::Update(i, q) => cart.update_quantity(&id_of(i), q),
                    Op::Remove(i) => cart.remove(&id_of(i)),
                };

                let expected_total: i64 = cart
                    .items()
                    .iter()
                    .map(|i| i.product().price.units() * i.quantity())
                    .sum();
                let expected_count: i64 = cart.items().iter().map(|i| i.quantity()).sum();

                prop_assert_eq!(totals.total.units(), expected_total);
                prop_assert_eq!(totals.item_count, expected_count);
                prop_assert!(cart
                    .items()
                    .iter()
                    .all(|i| i.quantity() > 0 && i.quantity() <= MAX_ITEM_QUANTITY));
                prop_assert!(!cart.contains("unknown"));
            }
        }
    }
}
