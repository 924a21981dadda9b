//! # Storefront API
//!
//! HTTP server for accounts, catalog and checkout.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  .env / environment ──► ApiConfig                                      │
//! │                            │                                            │
//! │                            ├──► Database::new (pool + migrations)       │
//! │                            ├──► JwtManager::new(AuthConfig)             │
//! │                            ▼                                            │
//! │  HttpServer ── TracingLogger ── /api/v1/... ──► bind(HOST:PORT)         │
//! │                                                                         │
//! │  SIGINT / SIGTERM ──► graceful stop ──► pool closed                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use storefront_api::auth::JwtManager;
use storefront_api::config::ApiConfig;
use storefront_api::routes::configure_routes;
use storefront_api::AppState;
use storefront_db::Database;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    info!("Starting Storefront API server...");

    let config = ApiConfig::load().context("loading configuration")?;
    info!(
        address = %config.bind_address(),
        database = %config.database_path,
        "Configuration loaded"
    );

    if config.uses_dev_secret() {
        warn!("JWT_SECRET not set, using the development secret");
    }

    let db = Database::new(config.db_config())
        .await
        .context("opening database")?;

    let state = web::Data::new(AppState::new(db.clone(), JwtManager::new(&config.auth)));

    info!(address = %config.bind_address(), "Starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .bind(config.bind_address())
    .with_context(|| format!("binding {}", config.bind_address()))?
    .run()
    .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}
