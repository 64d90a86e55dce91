//! Motoshop API - HTTP client for the Motoshop backend.
//!
//! # Architecture
//!
//! - [`ApiClient`] wraps a `reqwest` client behind an `Arc`; clones share the
//!   connection pool, configuration and storage
//! - The backend is the source of truth; nothing here caches responses
//! - Endpoint groups (`client.products()`, `client.users()`, ...) map one to
//!   one onto backend resources
//!
//! # Example
//!
//! ```rust,ignore
//! use motoshop_api::{ApiClient, ApiConfig};
//!
//! let client = ApiClient::new(ApiConfig::from_env()?)?;
//! let products = client.products().list().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod storage;

pub use client::ApiClient;
pub use config::{ApiConfig, ConfigError};
pub use endpoints::{
    ApiMessage, AuthApi, AuthSession, Cart, CartApi, CartItem, CartProduct, OrdersApi,
    ProductsApi, UsersApi,
};
pub use error::{ApiError, DEFAULT_REJECTION_MESSAGE, UNREACHABLE_MESSAGE};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, TOKEN_KEY};
