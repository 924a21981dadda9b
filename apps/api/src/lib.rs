//! # storefront-api: HTTP Server for Storefront
//!
//! actix-web application exposing accounts, the product catalog and
//! checkout as JSON over HTTP.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP request                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TracingLogger (request span)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  routes (/api/v1/...)  ◄── AuthenticatedUser extractor (checkout only)  │
//! │       │                                                                 │
//! │       ├── user.rs     register / login      ──► UserStore + auth        │
//! │       ├── product.rs  list / create / update ─► ProductStore            │
//! │       └── cart.rs     checkout              ──► services::checkout      │
//! │                                                       │                 │
//! │                                                       ▼                 │
//! │                                         storefront-core + storefront-db │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;

use std::sync::Arc;

use storefront_db::Database;

use crate::auth::JwtManager;

/// Shared state handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    /// Database handle
    pub db: Database,

    /// Token signing and validation
    pub jwt: Arc<JwtManager>,
}

impl AppState {
    pub fn new(db: Database, jwt: JwtManager) -> Self {
        AppState {
            db,
            jwt: Arc::new(jwt),
        }
    }
}
