//! # Repository Module
//!
//! SQLite implementations of the store traits in [`crate::store`].
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler / checkout service                                       │
//! │       │                                                                 │
//! │       │  &dyn ProductStore, &dyn CheckoutStore, &dyn UserStore         │
//! │       ▼                                                                 │
//! │  ProductRepository  OrderRepository  UserRepository                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog listing, lookup, create/update
//! - [`order::OrderRepository`] - Orders, order items, checkout transactions
//! - [`user::UserRepository`] - Customer accounts

pub mod order;
pub mod product;
pub mod user;
