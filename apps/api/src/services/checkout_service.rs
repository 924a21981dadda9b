//! # Checkout Service
//!
//! Turns a validated cart into a persisted order.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(user_id, lines)                                               │
//! │       │                                                                 │
//! │       ├── cart_product_ids(lines)        EmptyCart / InvalidQuantity    │
//! │       ├── fetch_products_by_id(ids)      read, outside the transaction  │
//! │       ├── evaluate_cart(products, lines) ProductUnavailable /           │
//! │       │                                  InsufficientStock              │
//! │       ▼                                                                 │
//! │  ┌──────────────── begin_checkout() ────────────────────────────────┐  │
//! │  │  decrement_stock(p, q)  per line   Insufficient → late rejection │  │
//! │  │  create_order(pending, total)                                    │  │
//! │  │  create_order_item(..)  per line   price from the evaluation     │  │
//! │  │  commit()                                                        │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutReceipt { order_id, total }                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any error inside the box drops the transaction uncommitted, so stock and
//! orders are left exactly as they were. Nothing is retried.

use storefront_core::{
    cart_product_ids, evaluate_cart, CartLine, CoreError, Money, NewOrder, OrderStatus,
    PLACEHOLDER_ADDRESS,
};
use storefront_db::{CheckoutStore, DbError, ProductStore, StockDecrement};
use tracing::{debug, info, instrument, warn};

/// Why a checkout did not produce an order.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// The cart itself was refused (client error).
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The store failed while reading or writing.
    #[error("Checkout persistence failure: {0}")]
    Persistence(#[from] DbError),
}

/// What a successful checkout hands back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order_id: i64,
    pub total: Money,
}

/// Places an order for `user_id` covering every line of the cart.
///
/// ## Errors
/// - [`CheckoutError::Rejected`] when the cart is empty, has a bad
///   quantity, names an unknown product or asks for more than is in stock
///   (including stock sold to someone else since it was read)
/// - [`CheckoutError::Persistence`] when the store fails
#[instrument(
    name = "checkout",
    skip(products, store, lines),
    fields(line_count = lines.len())
)]
pub async fn checkout<P, C>(
    products: &P,
    store: &C,
    user_id: i64,
    lines: &[CartLine],
) -> Result<CheckoutReceipt, CheckoutError>
where
    P: ProductStore + ?Sized,
    C: CheckoutStore + ?Sized,
{
    let ids = cart_product_ids(lines)?;
    let found = products.fetch_products_by_id(&ids).await?;
    let priced = evaluate_cart(found, lines)?;

    debug!(total = %priced.total(), "Cart evaluated");

    let mut tx = store.begin_checkout().await?;

    for line in priced.lines() {
        match tx.decrement_stock(line.product_id, line.quantity).await? {
            StockDecrement::Applied => {}
            StockDecrement::Insufficient { available } => {
                warn!(
                    product_id = line.product_id,
                    available,
                    requested = line.quantity,
                    "Stock changed after evaluation"
                );
                let name = priced
                    .product(line.product_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                return Err(CoreError::InsufficientStock {
                    product_id: line.product_id,
                    name,
                    available,
                    requested: line.quantity,
                }
                .into());
            }
        }
    }

    let order_id = tx
        .create_order(&NewOrder {
            user_id,
            total_cents: priced.total().cents(),
            status: OrderStatus::Pending,
            address: PLACEHOLDER_ADDRESS.to_string(),
        })
        .await?;

    for item in priced.order_items(order_id) {
        tx.create_order_item(&item).await?;
    }

    tx.commit().await?;

    info!(order_id, total = %priced.total(), "Order placed");

    Ok(CheckoutReceipt {
        order_id,
        total: priced.total(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
