//! Endpoint groups, one per backend resource.
//!
//! Each group is a thin, cloneable handle over [`crate::ApiClient`] obtained
//! through `client.auth()`, `client.products()` and so on.

mod auth;
mod cart;
mod orders;
mod products;
mod users;

pub use auth::{AuthApi, AuthSession};
pub use cart::{Cart, CartApi, CartItem, CartProduct};
pub use orders::OrdersApi;
pub use products::ProductsApi;
pub use users::UsersApi;

use serde::Deserialize;

/// Acknowledgement body carrying an optional human-readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiMessage {
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
}

impl ApiMessage {
    /// The message, or `fallback` when the server sent none.
    #[must_use]
    pub fn or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}
