//! Liveness check.

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::warn;

use crate::AppState;

/// `GET /api/v1/health`
///
/// Answers 200 while the database responds, 503 otherwise.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    if state.db.health_check().await {
        HttpResponse::Ok().json(json!({ "status": "ok" }))
    } else {
        warn!("Health check failed: database unreachable");
        HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable" }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};

    use crate::routes::{configure_routes, test_support};

    #[actix_web::test]
    async fn test_health_ok() {
        let state = test_support::state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
    }

    #[actix_web::test]
    async fn test_health_after_close() {
        let state = test_support::state().await;
        state.db.close().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
