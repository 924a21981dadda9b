//! Account routes: registration and login.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use storefront_core::validation::{validate_email, validate_password, validate_person_name};
use storefront_core::NewUser;
use storefront_db::UserStore;

use crate::auth::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_person_name("first_name", &self.first_name)?;
        validate_person_name("last_name", &self.last_name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// `POST /api/v1/register`
///
/// Creates an account. Answers 201 with an empty body.
#[instrument(name = "handler::register", skip(state, payload), fields(email = %payload.email))]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    payload.validate()?;

    let user = state
        .db
        .users()
        .create_user(&NewUser {
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            email: payload.email.trim().to_string(),
            password: hash_password(&payload.password)?,
        })
        .await?;

    info!(user_id = user.id, "User registered");
    Ok(HttpResponse::Created().finish())
}

/// `POST /api/v1/login`
///
/// Exchanges credentials for a token. Unknown email and wrong password
/// both answer 400 "invalid email or password".
#[instrument(name = "handler::login", skip(state, payload), fields(email = %payload.email))]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .db
        .users()
        .get_user_by_email(payload.email.trim())
        .await?
        .ok_or_else(|| {
            warn!("Login for unknown email");
            ApiError::invalid_credentials()
        })?;

    if !verify_password(&user.password, &payload.password)? {
        warn!(user_id = user.id, "Login with wrong password");
        return Err(ApiError::invalid_credentials());
    }

    let token = state.jwt.generate_token(user.id)?;

    info!(user_id = user.id, "User logged in");
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use crate::routes::{configure_routes, test_support};

    fn ada() -> serde_json::Value {
        json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "87654321"
        })
    }

    #[actix_web::test]
    async fn test_register_then_login() {
        let state = test_support::state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(ada())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let stored = state
            .db
            .users()
            .get_user_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password, "87654321");

        let req = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": "ada@example.com", "password": "87654321" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: LoginResponse = test::read_body_json(resp).await;
        let claims = state.jwt.validate_token(&body.token).unwrap();
        assert_eq!(claims.sub, stored.id);
    }

    #[actix_web::test]
    async fn test_register_duplicate_email() {
        let state = test_support::state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
            let req = test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(ada())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }
    }

    #[actix_web::test]
    async fn test_register_validation() {
        let state = test_support::state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let cases = [
            ("email", json!("not-an-email")),
            ("password", json!("ab")),
            ("password", json!("x".repeat(131))),
            ("first_name", json!("")),
        ];

        for (field, value) in cases {
            let mut body = ada();
            body[field] = value;

            let req = test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "field {field}");

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["code"], "VALIDATION_ERROR");
        }
    }

    #[actix_web::test]
    async fn test_login_failures() {
        let state = test_support::state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(ada())
            .to_request();
        test::call_service(&app, req).await;

        for (email, password) in [
            ("ada@example.com", "wrong-password"),
            ("nobody@example.com", "87654321"),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "email": email, "password": password }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "invalid email or password");
        }
    }
}
