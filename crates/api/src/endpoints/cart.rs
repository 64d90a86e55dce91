use motoshop_core::{CartItemId, Product, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::{ApiClient, ApiError};

/// The signed-in user's cart.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Server-computed total, when provided.
    #[serde(default)]
    pub total: Option<Decimal>,
}

impl Cart {
    /// Sum of item quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartItem {
    #[serde(alias = "_id")]
    pub id: CartItemId,
    #[serde(rename = "producto", alias = "productoId")]
    pub product: CartProduct,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// A cart line's product, either populated or referenced by id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CartProduct {
    Full(Box<Product>),
    Ref(ProductId),
}

impl CartProduct {
    /// Id of the referenced product.
    #[must_use]
    pub fn id(&self) -> &ProductId {
        match self {
            Self::Full(product) => &product.id,
            Self::Ref(id) => id,
        }
    }
}

/// `/carrito` endpoints.
#[derive(Debug, Clone)]
pub struct CartApi {
    client: ApiClient,
}

impl CartApi {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Current cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Cart, ApiError> {
        self.client.get("/carrito").await
    }

    /// Add `quantity` units of a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(product = %product))]
    pub async fn add(&self, product: &ProductId, quantity: u32) -> Result<Cart, ApiError> {
        self.client
            .post(
                "/carrito",
                &json!({ "productoId": product, "cantidad": quantity }),
            )
            .await
    }

    /// Set a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(item = %item))]
    pub async fn update_quantity(&self, item: &CartItemId, quantity: u32) -> Result<Cart, ApiError> {
        self.client
            .put(&format!("/carrito/{item}"), &json!({ "cantidad": quantity }))
            .await
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(item = %item))]
    pub async fn remove(&self, item: &CartItemId) -> Result<Cart, ApiError> {
        self.client.delete(&format!("/carrito/{item}")).await
    }

    /// Remove every line.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<Cart, ApiError> {
        self.client.delete("/carrito").await
    }
}
