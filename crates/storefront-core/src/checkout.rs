//! # Checkout Rules
//!
//! The pure half of the checkout pipeline: cart normalization and
//! pricing/availability evaluation. Persistence happens afterwards in the
//! API's checkout service, which consumes the [`PricedCart`] built here.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Pipeline                                │
//! │                                                                         │
//! │  [CartLine]                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  cart_product_ids()  ── InvalidQuantity / EmptyCart                     │
//! │      │ [product_id]                                                     │
//! │      ▼                                                                  │
//! │  ProductStore::fetch_products_by_id()        (storefront-db)            │
//! │      │ [Product] (any subset)                                           │
//! │      ▼                                                                  │
//! │  evaluate_cart()     ── ProductUnavailable / InsufficientStock          │
//! │      │ PricedCart { snapshot, lines, total }                            │
//! │      ▼                                                                  │
//! │  checkout_service::checkout()                (apps/api)                 │
//! │      decrement stock → order header → order items → commit              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check is fail-fast in cart order: the first offending line is the
//! one reported.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, NewOrderItem, Product};

// =============================================================================
// Cart Normalizer
// =============================================================================

/// Validates cart quantities and returns the product ids to fetch.
///
/// Ids come back in cart order. Duplicate lines for the same product are
/// kept; each line is checked and charged on its own.
///
/// ## Errors
/// - [`CoreError::InvalidQuantity`] for the first line with `quantity <= 0`
/// - [`CoreError::EmptyCart`] when there are no lines at all
///
/// ## Example
/// ```rust
/// use storefront_core::{cart_product_ids, CartLine, CoreError};
///
/// let ids = cart_product_ids(&[CartLine::new(3, 1), CartLine::new(1, 2)]).unwrap();
/// assert_eq!(ids, vec![3, 1]);
///
/// let err = cart_product_ids(&[CartLine::new(1, 0)]).unwrap_err();
/// assert_eq!(err, CoreError::InvalidQuantity { product_id: 1, quantity: 0 });
/// ```
pub fn cart_product_ids(lines: &[CartLine]) -> CoreResult<Vec<i64>> {
    if lines.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    lines
        .iter()
        .map(|line| {
            if line.quantity <= 0 {
                Err(CoreError::InvalidQuantity {
                    product_id: line.product_id,
                    quantity: line.quantity,
                })
            } else {
                Ok(line.product_id)
            }
        })
        .collect()
}

// =============================================================================
// Pricing & Availability Evaluator
// =============================================================================

/// A cart that passed evaluation, with the prices it was evaluated at.
///
/// The snapshot is the product state observed during evaluation. Unit
/// prices for order items are taken from it, never re-fetched, so the
/// items always add up to [`PricedCart::total`].
#[derive(Debug, Clone, PartialEq)]
pub struct PricedCart {
    snapshot: HashMap<i64, Product>,
    lines: Vec<CartLine>,
    total: Money,
}

impl PricedCart {
    /// The cart lines, in the order the client sent them.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of `unit price × quantity` over all lines.
    pub fn total(&self) -> Money {
        self.total
    }

    /// The product as observed during evaluation.
    pub fn product(&self, product_id: i64) -> Option<&Product> {
        self.snapshot.get(&product_id)
    }

    /// Unit price captured for `product_id`.
    pub fn unit_price(&self, product_id: i64) -> Option<Money> {
        self.product(product_id).map(Product::price)
    }

    /// Builds one order item per cart line for the order `order_id`.
    pub fn order_items(&self, order_id: i64) -> Vec<NewOrderItem> {
        self.lines
            .iter()
            .filter_map(|line| {
                self.snapshot.get(&line.product_id).map(|p| NewOrderItem {
                    order_id,
                    product_id: line.product_id,
                    quantity: line.quantity,
                    unit_price_cents: p.price_cents,
                })
            })
            .collect()
    }
}

/// Checks that every cart line can be fulfilled and prices the cart.
///
/// `products` may be any subset of the requested ids; a missing product is
/// reported as unavailable rather than treated as a store error.
///
/// ## Errors
/// - [`CoreError::EmptyCart`] when `lines` is empty
/// - [`CoreError::ProductUnavailable`] for the first line whose product is absent
/// - [`CoreError::InsufficientStock`] for the first line asking for more than is in stock
/// - [`CoreError::TotalOverflow`] when a line total or the cart total exceeds `i64` cents
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use storefront_core::{evaluate_cart, CartLine, Product};
///
/// let mug = Product {
///     id: 1,
///     name: "Mug".into(),
///     description: String::new(),
///     image: String::new(),
///     price_cents: 999,
///     quantity: 10,
///     created_at: Utc::now(),
/// };
///
/// let priced = evaluate_cart(vec![mug], &[CartLine::new(1, 2)]).unwrap();
/// assert_eq!(priced.total().cents(), 1998);
/// ```
pub fn evaluate_cart(products: Vec<Product>, lines: &[CartLine]) -> CoreResult<PricedCart> {
    if lines.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let snapshot: HashMap<i64, Product> = products.into_iter().map(|p| (p.id, p)).collect();

    let mut total = Money::zero();
    for line in lines {
        let product = snapshot
            .get(&line.product_id)
            .ok_or(CoreError::ProductUnavailable {
                product_id: line.product_id,
            })?;

        if !product.has_stock_for(line.quantity) {
            return Err(CoreError::InsufficientStock {
                product_id: product.id,
                name: product.name.clone(),
                available: product.quantity,
                requested: line.quantity,
            });
        }

        total = product
            .price()
            .checked_multiply_quantity(line.quantity)
            .and_then(|line_total| total.checked_add(line_total))
            .ok_or(CoreError::TotalOverflow)?;
    }

    Ok(PricedCart {
        snapshot,
        lines: lines.to_vec(),
        total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
