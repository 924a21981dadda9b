//! # Authentication
//!
//! Token issuing, password hashing and the request extractor that turns a
//! token into a user id.
//!
//! ## Request Flow
//! ```text
//! POST /api/v1/cart/checkout
//!   Authorization: Bearer <jwt>      (or ?token=<jwt>)
//!        │
//!        ▼
//! AuthenticatedUser::from_request
//!   ├── no token            ──► 403
//!   ├── bad signature/expiry ─► 403
//!   ├── user no longer exists ► 403
//!   └── ok ──► handler receives AuthenticatedUser { user_id }
//! ```

pub mod jwt;
pub mod password;

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde::Deserialize;
use tracing::{debug, warn};

use storefront_db::UserStore;

use crate::error::ApiError;
use crate::AppState;

pub use jwt::{Claims, JwtManager};
pub use password::{hash_password, verify_password};

/// `?token=<jwt>` on any authenticated route.
#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// The token of a request: the `Authorization` header first, then the
/// percent-decoded `token` query parameter.
fn request_token(req: &HttpRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(jwt::token_from_header)
        .map(str::to_owned);

    from_header.or_else(|| {
        match web::Query::<TokenQuery>::from_query(req.query_string()) {
            Ok(query) => query.into_inner().token.filter(|t| !t.is_empty()),
            Err(e) => {
                debug!(error = %e, "Unreadable query string");
                None
            }
        }
    })
}

/// The user a request is acting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();

        let token = request_token(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                ApiError::internal("Application state is not configured")
            })?;

            let token = token.ok_or_else(|| {
                warn!("Request without token");
                ApiError::permission_denied()
            })?;

            let claims = state.jwt.validate_token(&token).map_err(|e| {
                warn!(error = %e, "Token rejected");
                ApiError::permission_denied()
            })?;

            match state.db.users().get_user_by_id(claims.sub).await? {
                Some(user) => Ok(AuthenticatedUser { user_id: user.id }),
                None => {
                    warn!(user_id = claims.sub, "Token for unknown user");
                    Err(ApiError::permission_denied())
                }
            }
        })
    }
}
