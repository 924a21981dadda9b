//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Storefront                             │
//! │                                                                         │
//! │  Handler: Result<HttpResponse, ApiError>                               │
//! │         │                                                               │
//! │         ├── ValidationError ──► CoreError::Validation ──┐              │
//! │         ├── CoreError (cart rejected) ──────────────────┤              │
//! │         ├── DbError ────────────────────────────────────┼──► ApiError  │
//! │         ├── CheckoutError ──────────────────────────────┤      │       │
//! │         └── auth failure ───────────────────────────────┘      │       │
//! │                                                                 ▼       │
//! │                                      ResponseError::error_response()   │
//! │                                      status + {"code", "error"}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence failures are logged with their cause and reach the client
//! only as a generic message.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use storefront_core::{CoreError, ValidationError};
use storefront_db::DbError;

use crate::services::checkout_service::CheckoutError;

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "error": "Product Mug is not available in the quantity requested: available 3, requested 5"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    #[serde(rename = "error")]
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Cart line with quantity <= 0 (400)
    InvalidQuantity,

    /// Checkout with no lines (400)
    EmptyCart,

    /// Cart references a product that doesn't exist (400)
    ProductUnavailable,

    /// Not enough stock for a cart line (400)
    InsufficientStock,

    /// Cart total exceeds what an order can hold (400)
    TotalOverflow,

    /// Wrong email or password at login (400)
    InvalidCredentials,

    /// Missing, invalid or expired token (403)
    PermissionDenied,

    /// Resource not found (404)
    NotFound,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError
            | ErrorCode::InvalidQuantity
            | ErrorCode::EmptyCart
            | ErrorCode::ProductUnavailable
            | ErrorCode::InsufficientStock
            | ErrorCode::TotalOverflow
            | ErrorCode::InvalidCredentials => StatusCode::BAD_REQUEST,
            ErrorCode::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// The single response for every authentication failure.
    ///
    /// Callers log the actual reason; the client never learns whether the
    /// token was malformed, expired or for a deleted user.
    pub fn permission_denied() -> Self {
        ApiError::new(ErrorCode::PermissionDenied, "permission denied")
    }

    /// Unknown email and wrong password look the same to the client.
    pub fn invalid_credentials() -> Self {
        ApiError::new(ErrorCode::InvalidCredentials, "invalid email or password")
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::new(ErrorCode::DatabaseError, "Database is busy")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::ProductUnavailable { .. } => ErrorCode::ProductUnavailable,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::TotalOverflow => ErrorCode::TotalOverflow,
            CoreError::Validation(e) => return ApiError::validation(e.to_string()),
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// A store failure during checkout is always a server error, whatever
/// constraint or lookup produced it.
impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Rejected(e) => e.into(),
            CheckoutError::Persistence(e) => {
                tracing::error!(error = %e, "Checkout persistence failure");
                ApiError::new(ErrorCode::DatabaseError, "Checkout could not be completed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Makes ApiError usable as an actix handler error.
impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.code.status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "Responding with server error");
        } else {
            tracing::debug!(error = %self, "Responding with client error");
        }
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_core_errors_map_to_bad_request() {
        let err: ApiError = CoreError::ProductUnavailable { product_id: 9 }.into();
        assert_eq!(err.code, ErrorCode::ProductUnavailable);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message,
            "Product 9 is not available in the store, please refresh your cart"
        );

        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::EmptyCart);

        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err: ApiError = DbError::QueryFailed("no such table: secrets".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("secrets"));

        let err: ApiError = DbError::not_found("Product", 4).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: ApiError = DbError::duplicate("email", "ada@example.com").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_checkout_error_mapping() {
        let err: ApiError = CheckoutError::Rejected(CoreError::EmptyCart).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: ApiError = CheckoutError::Rejected(CoreError::TotalOverflow).into();
        assert_eq!(err.code, ErrorCode::TotalOverflow);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let persistence = [
            DbError::PoolExhausted,
            DbError::ForeignKeyViolation {
                message: "FOREIGN KEY constraint failed".to_string(),
            },
            DbError::duplicate("id", "7"),
            DbError::not_found("Order", 7),
        ];
        for db_err in persistence {
            let err: ApiError = CheckoutError::Persistence(db_err).into();
            assert_eq!(err.code, ErrorCode::DatabaseError);
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(!err.message.contains("FOREIGN KEY"));
        }
    }

    #[actix_web::test]
    async fn test_response_envelope() {
        let response = ApiError::permission_denied().error_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["code"], "PERMISSION_DENIED");
        assert_eq!(value["error"], "permission denied");
    }
}
