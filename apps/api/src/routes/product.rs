//! Catalog routes.

use actix_web::{web, HttpResponse};
use tracing::{debug, info, instrument};

use storefront_core::validation::validate_new_product;
use storefront_core::NewProduct;
use storefront_db::ProductStore;

use crate::error::ApiResult;
use crate::AppState;

/// `GET /api/v1/products`
#[instrument(name = "handler::list_products", skip(state))]
pub async fn list_products(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let products = state.db.products().list_products().await?;
    debug!(count = products.len(), "Catalog listed");
    Ok(HttpResponse::Ok().json(products))
}

/// `POST /api/v1/products`
///
/// Answers 201 with the created product.
#[instrument(name = "handler::create_product", skip(state, payload), fields(name = %payload.name))]
pub async fn create_product(
    state: web::Data<AppState>,
    payload: web::Json<NewProduct>,
) -> ApiResult<HttpResponse> {
    validate_new_product(&payload)?;

    let product = state.db.products().create_product(&payload).await?;

    info!(product_id = product.id, "Product created");
    Ok(HttpResponse::Created().json(product))
}

/// `PUT /api/v1/products/{id}`
///
/// Replaces every editable field. 404 if the product does not exist.
#[instrument(name = "handler::update_product", skip(state, payload))]
pub async fn update_product(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<NewProduct>,
) -> ApiResult<HttpResponse> {
    validate_new_product(&payload)?;

    let product = state
        .db
        .products()
        .update_product(id.into_inner(), &payload)
        .await?;

    info!(product_id = product.id, "Product updated");
    Ok(HttpResponse::Ok().json(product))
}
