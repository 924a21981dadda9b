//! HTTP routes, all mounted under `/api/v1`.

pub mod cart;
pub mod health;
pub mod product;
pub mod user;

use actix_web::web;
use tracing::debug;

use crate::error::ApiError;

/// Registers every route of the API on `cfg`.
///
/// Malformed JSON bodies are answered with the regular error envelope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "Rejected request body");
        ApiError::validation(err.to_string()).into()
    });

    cfg.service(
        web::scope("/api/v1")
            .app_data(json_config)
            .route("/health", web::get().to(health::health))
            .route("/register", web::post().to(user::register))
            .route("/login", web::post().to(user::login))
            .service(
                web::resource("/products")
                    .route(web::get().to(product::list_products))
                    .route(web::post().to(product::create_product)),
            )
            .route("/products/{id}", web::put().to(product::update_product))
            .route("/cart/checkout", web::post().to(cart::checkout)),
    );
}

#[cfg(test)]
pub(crate) mod test_support {
    use storefront_core::NewProduct;
    use storefront_db::{Database, DbConfig, ProductStore};

    use crate::auth::JwtManager;
    use crate::config::AuthConfig;
    use crate::AppState;

    /// State over a fresh in-memory database.
    pub async fn state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let jwt = JwtManager::new(&AuthConfig {
            jwt_secret: "route-test-secret".to_string(),
            jwt_expiration_secs: 3600,
        });
        AppState::new(db, jwt)
    }

    /// Inserts a product and returns its id.
    pub async fn add_product(state: &AppState, name: &str, price_cents: i64, quantity: i64) -> i64 {
        state
            .db
            .products()
            .create_product(&NewProduct {
                name: name.to_string(),
                description: String::new(),
                image: String::new(),
                price_cents,
                quantity,
            })
            .await
            .unwrap()
            .id
    }
}
