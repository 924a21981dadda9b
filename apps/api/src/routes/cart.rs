//! Checkout route.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use storefront_core::CartLine;

use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::services::checkout_service;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CartLine>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order_id: i64,
    pub total_price_cents: i64,
    /// Decimal rendering of the total, e.g. `"19.98"`.
    pub total_price: String,
}

/// `POST /api/v1/cart/checkout`
#[instrument(
    name = "handler::checkout",
    skip(state, user, payload),
    fields(user_id = user.user_id)
)]
pub async fn checkout(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<CheckoutRequest>,
) -> ApiResult<HttpResponse> {
    let products = state.db.products();
    let orders = state.db.orders();

    let receipt =
        checkout_service::checkout(&products, &orders, user.user_id, &payload.items).await?;

    Ok(HttpResponse::Ok().json(CheckoutResponse {
        order_id: receipt.order_id,
        total_price_cents: receipt.total.cents(),
        total_price: receipt.total.to_string(),
    }))
}
