//! Business operations that span several stores.

pub mod checkout_service;

pub use checkout_service::{checkout, CheckoutError, CheckoutReceipt};
