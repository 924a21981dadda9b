//! JWT token generation and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::ApiError;

/// JWT claims structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// Why a token was refused. Only ever logged; clients get a plain 403.
#[derive(Debug, thiserror::Error)]
#[error("Invalid token: {0}")]
pub struct TokenError(#[from] jsonwebtoken::errors::Error);

/// JWT token manager.
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_secs: i64,
}

impl JwtManager {
    /// Create a JWT manager from explicit auth settings.
    pub fn new(config: &AuthConfig) -> Self {
        JwtManager {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            lifetime_secs: config.jwt_expiration_secs,
        }
    }

    /// Generate a signed token for `user_id`.
    pub fn generate_token(&self, user_id: i64) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = Duration::try_seconds(self.lifetime_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| ApiError::internal("Token lifetime out of range"))?;

        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate signature and expiry, and decode the claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data: TokenData<Claims> =
            decode(token, &self.decoding_key, &Validation::default())?;

        Ok(token_data.claims)
    }
}

/// Pick the token out of an `Authorization` header value.
///
/// Accepts `Bearer <token>` as well as the bare token.
pub fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim();

    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(lifetime_secs: i64) -> JwtManager {
        JwtManager::new(&AuthConfig {
            jwt_secret: "test-secret".to_string(),
            jwt_expiration_secs: lifetime_secs,
        })
    }

    #[test]
    fn test_jwt_roundtrip() {
        let manager = manager(3600);

        let token = manager.generate_token(42).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_tokens_are_unique() {
        let manager = manager(3600);
        assert_ne!(
            manager.generate_token(1).unwrap(),
            manager.generate_token(1).unwrap()
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = manager(3600).generate_token(1).unwrap();
        let other = JwtManager::new(&AuthConfig {
            jwt_secret: "another-secret".to_string(),
            jwt_expiration_secs: 3600,
        });
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // well past the default 60s leeway
        let token = manager(-3600).generate_token(1).unwrap();
        assert!(manager(3600).validate_token(&token).is_err());
    }

    #[test]
    fn test_unrepresentable_lifetime_is_error() {
        assert!(manager(i64::MAX).generate_token(1).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(manager(3600).validate_token("not.a.jwt").is_err());
    }

    #[test]
    fn test_token_from_header() {
        assert_eq!(token_from_header("Bearer abc.def"), Some("abc.def"));
        assert_eq!(token_from_header("abc.def"), Some("abc.def"));
        assert_eq!(token_from_header("Bearer "), None);
        assert_eq!(token_from_header(""), None);
    }
}
