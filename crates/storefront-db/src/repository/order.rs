//! # Order Repository
//!
//! Orders, order items and the checkout transaction that creates them.
//!
//! ## Checkout Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Transaction                              │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │   ├── UPDATE products SET quantity = quantity - q                       │
//! │   │     WHERE id = p AND quantity >= q          (per cart line)         │
//! │   ├── INSERT INTO orders (...)                  → order id              │
//! │   └── INSERT INTO order_items (...)             (per cart line)         │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any error before COMMIT: the transaction is dropped and SQLite rolls  │
//! │  back, so no stock is lost and no orphaned order is left behind.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why a conditional decrement
//! The products were evaluated before the transaction began. Another
//! checkout may have taken the stock in between; `quantity >= q` in the
//! `WHERE` clause makes the check and the write a single statement.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::store::{CheckoutStore, CheckoutTransaction, StockDecrement};
use storefront_core::{NewOrder, NewOrderItem, Order, OrderItem};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order header by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, total_cents, status, address, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all items of an order in insertion order.
    pub async fn get_items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price_cents, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

#[async_trait]
impl CheckoutStore for OrderRepository {
    async fn begin_checkout(&self) -> DbResult<Box<dyn CheckoutTransaction>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Checkout transaction started");
        Ok(Box::new(SqliteCheckout { tx }))
    }
}

// =============================================================================
// SQLite Checkout Transaction
// =============================================================================

/// A checkout in progress on one pooled connection.
///
/// Rolls back on drop unless [`CheckoutTransaction::commit`] was called.
pub struct SqliteCheckout {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl CheckoutTransaction for SqliteCheckout {
    async fn decrement_stock(&mut self, product_id: i64, quantity: i64) -> DbResult<StockDecrement> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity - ?2
            WHERE id = ?1 AND quantity >= ?2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 1 {
            debug!(product_id, quantity, "Stock decremented");
            return Ok(StockDecrement::Applied);
        }

        let available: Option<i64> =
            sqlx::query_scalar("SELECT quantity FROM products WHERE id = ?1")
                .bind(product_id)
                .fetch_optional(&mut *self.tx)
                .await?;
        let available = available.unwrap_or(0);

        warn!(product_id, quantity, available, "Stock decrement refused");
        Ok(StockDecrement::Insufficient { available })
    }

    async fn create_order(&mut self, order: &NewOrder) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO orders (user_id, total_cents, status, address, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(order.user_id)
        .bind(order.total_cents)
        .bind(order.status)
        .bind(&order.address)
        .bind(Utc::now())
        .execute(&mut *self.tx)
        .await?;

        let order_id = result.last_insert_rowid();
        debug!(order_id, user_id = order.user_id, "Order created");
        Ok(order_id)
    }

    async fn create_order_item(&mut self, item: &NewOrderItem) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price_cents)
        .bind(Utc::now())
        .execute(&mut *self.tx)
        .await?;

        debug!(order_id = item.order_id, product_id = item.product_id, "Order item created");
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Checkout transaction committed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ProductStore, UserStore};
    use crate::{Database, DbConfig};
    use storefront_core::{NewProduct, NewUser, OrderStatus, PLACEHOLDER_ADDRESS};

    struct Fixture {
        db: Database,
        user_id: i64,
        product_id: i64,
    }

    async fn fixture(stock: i64) -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let user = db
            .users()
            .create_user(&NewUser {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                password: "hash".to_string(),
            })
            .await
            .unwrap();

        let product = db
            .products()
            .create_product(&NewProduct {
                name: "Test Product 1".to_string(),
                description: String::new(),
                image: String::new(),
                price_cents: 999,
                quantity: stock,
            })
            .await
            .unwrap();

        Fixture {
            db,
            user_id: user.id,
            product_id: product.id,
        }
    }

    fn header(user_id: i64, total_cents: i64) -> NewOrder {
        NewOrder {
            user_id,
            total_cents,
            status: OrderStatus::Pending,
            address: PLACEHOLDER_ADDRESS.to_string(),
        }
    }

    async fn stock_of(db: &Database, product_id: i64) -> i64 {
        db.products().get_by_id(product_id).await.unwrap().unwrap().quantity
    }

    #[tokio::test]
    async fn test_committed_checkout_is_persisted() {
        let f = fixture(10).await;
        let orders = f.db.orders();

        let mut tx = orders.begin_checkout().await.unwrap();
        assert_eq!(
            tx.decrement_stock(f.product_id, 2).await.unwrap(),
            StockDecrement::Applied
        );
        let order_id = tx.create_order(&header(f.user_id, 1998)).await.unwrap();
        tx.create_order_item(&NewOrderItem {
            order_id,
            product_id: f.product_id,
            quantity: 2,
            unit_price_cents: 999,
        })
        .await
        .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(stock_of(&f.db, f.product_id).await, 8);

        let order = orders.get_by_id(order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_cents, 1998);
        assert_eq!(order.address, "address");

        let items = orders.get_items(order_id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].unit_price_cents, 999);
    }

    #[tokio::test]
    async fn test_dropped_checkout_rolls_back() {
        let f = fixture(10).await;
        let orders = f.db.orders();

        let order_id = {
            let mut tx = orders.begin_checkout().await.unwrap();
            tx.decrement_stock(f.product_id, 3).await.unwrap();
            tx.create_order(&header(f.user_id, 2997)).await.unwrap()
            // dropped without commit
        };

        assert_eq!(stock_of(&f.db, f.product_id).await, 10);
        assert!(orders.get_by_id(order_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_decrement_never_goes_negative() {
        let f = fixture(3).await;
        let orders = f.db.orders();

        // first checkout takes 2 of 3
        let mut first = orders.begin_checkout().await.unwrap();
        assert_eq!(
            first.decrement_stock(f.product_id, 2).await.unwrap(),
            StockDecrement::Applied
        );
        first.commit().await.unwrap();

        // second checkout evaluated against the old stock of 3
        let mut second = orders.begin_checkout().await.unwrap();
        assert_eq!(
            second.decrement_stock(f.product_id, 2).await.unwrap(),
            StockDecrement::Insufficient { available: 1 }
        );
        drop(second);

        assert_eq!(stock_of(&f.db, f.product_id).await, 1);
    }

    #[tokio::test]
    async fn test_decrement_missing_product() {
        let f = fixture(3).await;

        let mut tx = f.db.orders().begin_checkout().await.unwrap();
        assert_eq!(
            tx.decrement_stock(9999, 1).await.unwrap(),
            StockDecrement::Insufficient { available: 0 }
        );
    }

    #[tokio::test]
    async fn test_order_item_for_missing_product_fails() {
        let f = fixture(3).await;

        let mut tx = f.db.orders().begin_checkout().await.unwrap();
        let order_id = tx.create_order(&header(f.user_id, 100)).await.unwrap();
        let err = tx
            .create_order_item(&NewOrderItem {
                order_id,
                product_id: 9999,
                quantity: 1,
                unit_price_cents: 100,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
