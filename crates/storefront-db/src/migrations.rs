//! # Database Migrations
//!
//! Embedded SQL migrations for Storefront.
//!
//! ## Schema
//! ```text
//! users ◄──────── orders ◄──────── order_items ────────► products
//!  id               user_id          order_id              id
//!  email UNIQUE     total_cents      product_id            price_cents
//!                   status           quantity              quantity >= 0
//!                   address          unit_price_cents
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create `migrations/sqlite/NNN_description.sql` with the next number
//! 2. Prefer `IF NOT EXISTS` so a partially applied file can be rerun
//! 3. **NEVER** modify an applied migration; add a new one

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// All files under `migrations/sqlite`, embedded at compile time.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies pending migrations in filename order.
///
/// Applied versions are tracked in `_sqlx_migrations`, each migration runs
/// in its own transaction, and rerunning is a no-op.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)`.
///
/// A database that was never migrated reports 0 applied.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await
            .unwrap_or(0);

    Ok((total, applied as usize))
}
