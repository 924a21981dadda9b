//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - Batch fetch by id for checkout
//! - Catalog listing
//! - Create / update
//!
//! Stock decrements during checkout do not live here; they run inside the
//! checkout transaction in [`super::order`].

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::ProductStore;
use storefront_core::{NewProduct, Product};

const PRODUCT_COLUMNS: &str =
    "id, name, description, image, price_cents, quantity, created_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let catalog = repo.list_products().await?;
/// let product = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Counts total products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    /// Fetches products with `SELECT ... WHERE id IN (?, ?, ...)`.
    ///
    /// Duplicate ids are harmless; SQLite returns each row once.
    async fn fetch_products_by_id(&self, ids: &[i64]) -> DbResult<Vec<Product>> {
        debug!(count = ids.len(), "Fetching products by id");

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        debug!(found = products.len(), "Fetched products");
        Ok(products)
    }

    async fn list_products(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    async fn create_product(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, image, price_cents, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.price_cents)
        .bind(product.quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            price_cents: product.price_cents,
            quantity: product.quantity,
            created_at: now,
        })
    }

    async fn update_product(&self, id: i64, product: &NewProduct) -> DbResult<Product> {
        debug!(id = id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                image = ?4,
                price_cents = ?5,
                quantity = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.price_cents)
        .bind(product.quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn new_product(name: &str, price_cents: i64, quantity: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "test product".to_string(),
            image: String::new(),
            price_cents,
            quantity,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo
            .create_product(&new_product("Test Product 1", 999, 10))
            .await
            .unwrap();
        assert!(created.id > 0);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Test Product 1");
        assert_eq!(fetched.price_cents, 999);
        assert_eq!(fetched.quantity, 10);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fetch_by_id_returns_existing_subset() {
        let db = test_db().await;
        let repo = db.products();

        let a = repo.create_product(&new_product("A", 999, 10)).await.unwrap();
        let b = repo.create_product(&new_product("B", 1999, 20)).await.unwrap();

        let found = repo
            .fetch_products_by_id(&[a.id, 9999, b.id, a.id])
            .await
            .unwrap();
        let mut ids: Vec<i64> = found.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![a.id, b.id]);

        assert!(repo.fetch_products_by_id(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_products_in_id_order() {
        let db = test_db().await;
        let repo = db.products();

        repo.create_product(&new_product("First", 100, 1)).await.unwrap();
        repo.create_product(&new_product("Second", 200, 2)).await.unwrap();

        let names: Vec<String> = repo
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_update_product() {
        let db = test_db().await;
        let repo = db.products();

        let created = repo.create_product(&new_product("Old", 999, 10)).await.unwrap();
        let updated = repo
            .update_product(created.id, &new_product("New", 1299, 4))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "New");
        assert_eq!(updated.price_cents, 1299);
        assert_eq!(updated.quantity, 4);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let db = test_db().await;

        let err = db
            .products()
            .update_product(404, &new_product("Ghost", 100, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
