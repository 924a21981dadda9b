//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file in the working directory is read first if present.
//!
//! | Variable              | Default              |
//! |-----------------------|----------------------|
//! | `HOST`                | `0.0.0.0`            |
//! | `PORT`                | `8080`               |
//! | `DATABASE_PATH`       | `./storefront.db`    |
//! | `DB_MAX_CONNECTIONS`  | `5`                  |
//! | `JWT_SECRET`          | development secret   |
//! | `JWT_EXPIRATION_SECS` | `604800` (7 days), at most one year |

use std::env;
use std::str::FromStr;

use storefront_db::DbConfig;

const DEV_JWT_SECRET: &str = "storefront-dev-secret-change-in-production";

/// Upper bound for `JWT_EXPIRATION_SECS` (one year).
pub const MAX_JWT_EXPIRATION_SECS: i64 = 365 * 24 * 60 * 60;

/// Token signing settings, handed to `JwtManager::new`.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing tokens
    pub jwt_secret: String,

    /// Token lifetime in seconds
    pub jwt_expiration_secs: i64,
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Pool size
    pub db_max_connections: u32,

    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        // a missing .env is normal outside development
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = ApiConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: parse_or(&lookup, "PORT", 8080)?,

            database_path: lookup("DATABASE_PATH")
                .unwrap_or_else(|| "./storefront.db".to_string()),

            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,

            auth: AuthConfig {
                jwt_secret: lookup("JWT_SECRET").unwrap_or_else(|| {
                    // In production, this MUST be set via environment variable
                    DEV_JWT_SECRET.to_string()
                }),

                jwt_expiration_secs: parse_or(&lookup, "JWT_EXPIRATION_SECS", 604_800)?,
            },
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if !(1..=MAX_JWT_EXPIRATION_SECS).contains(&config.auth.jwt_expiration_secs) {
            return Err(ConfigError::InvalidValue("JWT_EXPIRATION_SECS".to_string()));
        }
        if config.auth.jwt_secret.is_empty() {
            return Err(ConfigError::MissingRequired("JWT_SECRET".to_string()));
        }

        Ok(config)
    }

    /// `host:port` for `HttpServer::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Pool settings for `Database::new`.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }

    /// Whether the built-in development secret is in use.
    pub fn uses_dev_secret(&self) -> bool {
        self.auth.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.database_path, "./storefront.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.auth.jwt_expiration_secs, 604_800);
        assert!(config.uses_dev_secret());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("DATABASE_PATH", "/var/lib/shop.db"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRATION_SECS", "60"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.db_config().max_connections, 12);
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(config.auth.jwt_expiration_secs, 60);
        assert!(!config.uses_dev_secret());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "PORT"
        ));
        assert!(matches!(
            config_from(&[("DB_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::InvalidValue(key)) if key == "DB_MAX_CONNECTIONS"
        ));
        assert!(matches!(
            config_from(&[("JWT_EXPIRATION_SECS", "-1")]),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            config_from(&[("JWT_EXPIRATION_SECS", "9223372036854775807")]),
            Err(ConfigError::InvalidValue(key)) if key == "JWT_EXPIRATION_SECS"
        ));
        let max = MAX_JWT_EXPIRATION_SECS.to_string();
        assert!(config_from(&[("JWT_EXPIRATION_SECS", max.as_str())]).is_ok());
        assert!(matches!(
            config_from(&[("JWT_SECRET", "")]),
            Err(ConfigError::MissingRequired(_))
        ));
    }
}
