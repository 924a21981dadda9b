//! # Store Traits
//!
//! Narrow, async interfaces the API layer depends on instead of concrete
//! repositories. The SQLite repositories implement them; checkout tests
//! implement them in memory.
//!
//! ## Checkout Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  One checkout = one transaction                         │
//! │                                                                         │
//! │  CheckoutStore::begin_checkout()                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  decrement_stock(p, q)  ── UPDATE ... WHERE quantity >= q               │
//! │       │                    0 rows → StockDecrement::Insufficient        │
//! │       ▼                                                                 │
//! │  create_order(header)   ── returns order id                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  create_order_item(..)  ── once per cart line                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commit()               ── all or nothing                               │
//! │                                                                         │
//! │  Dropping the transaction without commit() rolls everything back.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use storefront_core::{NewOrder, NewOrderItem, NewProduct, NewUser, Product, User};

use crate::error::DbResult;

// =============================================================================
// Catalog
// =============================================================================

/// Read and write access to the product catalog.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetches the products with the given ids.
    ///
    /// Returns whichever subset exists; unknown ids are not an error.
    async fn fetch_products_by_id(&self, ids: &[i64]) -> DbResult<Vec<Product>>;

    /// Lists the whole catalog ordered by id.
    async fn list_products(&self) -> DbResult<Vec<Product>>;

    /// Inserts a product and returns it with its assigned id.
    async fn create_product(&self, product: &NewProduct) -> DbResult<Product>;

    /// Replaces the fields of product `id`.
    ///
    /// Fails with `DbError::NotFound` if the product does not exist.
    async fn update_product(&self, id: i64, product: &NewProduct) -> DbResult<Product>;
}

// =============================================================================
// Checkout
// =============================================================================

/// Outcome of a conditional stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecrement {
    /// Stock was reduced by the requested quantity.
    Applied,
    /// Not enough stock left; nothing was changed.
    ///
    /// `available` is the stock observed inside the transaction (0 if the
    /// product no longer exists).
    Insufficient { available: i64 },
}

/// Opens checkout transactions.
#[async_trait]
pub trait CheckoutStore: Send + Sync {
    async fn begin_checkout(&self) -> DbResult<Box<dyn CheckoutTransaction>>;
}

/// The writes of a single checkout, applied atomically.
#[async_trait]
pub trait CheckoutTransaction: Send {
    /// Takes `quantity` units from `product_id` if at least that many remain.
    async fn decrement_stock(&mut self, product_id: i64, quantity: i64) -> DbResult<StockDecrement>;

    /// Inserts the order header and returns its id.
    async fn create_order(&mut self, order: &NewOrder) -> DbResult<i64>;

    /// Inserts one order line item.
    async fn create_order_item(&mut self, item: &NewOrderItem) -> DbResult<()>;

    /// Makes every write of this transaction visible.
    async fn commit(self: Box<Self>) -> DbResult<()>;
}

// =============================================================================
// Accounts
// =============================================================================

/// Access to registered users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user_by_email(&self, email: &str) -> DbResult<Option<User>>;

    async fn get_user_by_id(&self, id: i64) -> DbResult<Option<User>>;

    /// Inserts a user. Fails with `DbError::UniqueViolation` on a taken email.
    async fn create_user(&self, user: &NewUser) -> DbResult<User>;
}
