//! The signed-in shopper's cart.

use motoshop_api::{ApiClient, ApiError, Cart, CartApi};
use motoshop_core::{CartItemId, ProductId};
use thiserror::Error;
use tracing::{debug, instrument};

/// Quantity used when the caller does not pick one.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Errors raised by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantities start at one.
    #[error("La cantidad debe ser al menos 1")]
    InvalidQuantity,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Cart operations; every call returns the cart as the backend now sees it.
#[derive(Debug, Clone)]
pub struct CartService {
    api: CartApi,
}

impl CartService {
    #[must_use]
    pub fn new(client: &ApiClient) -> Self {
        Self { api: client.cart() }
    }

    /// Current cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Api` if the backend call fails.
    pub async fn get(&self) -> Result<Cart, CartError> {
        Ok(self.api.get().await?)
    }

    /// Add a product; `quantity` defaults to [`DEFAULT_QUANTITY`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for a zero quantity, or
    /// `CartError::Api` if the backend call fails.
    #[instrument(skip(self), fields(product = %product))]
    pub async fn add(&self, product: &ProductId, quantity: Option<u32>) -> Result<Cart, CartError> {
        let quantity = checked(quantity.unwrap_or(DEFAULT_QUANTITY))?;
        let cart = self.api.add(product, quantity).await?;
        debug!(items = cart.item_count(), "Added to cart");
        Ok(cart)
    }

    /// Set a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for a zero quantity, or
    /// `CartError::Api` if the backend call fails.
    #[instrument(skip(self), fields(item = %item))]
    pub async fn update_quantity(&self, item: &CartItemId, quantity: u32) -> Result<Cart, CartError> {
        let quantity = checked(quantity)?;
        Ok(self.api.update_quantity(item, quantity).await?)
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Api` if the backend call fails.
    pub async fn remove(&self, item: &CartItemId) -> Result<Cart, CartError> {
        Ok(self.api.remove(item).await?)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Api` if the backend call fails.
    pub async fn clear(&self) -> Result<Cart, CartError> {
        Ok(self.api.clear().await?)
    }
}

const fn checked(quantity: u32) -> Result<u32, CartError> {
    if quantity == 0 {
        Err(CartError::InvalidQuantity)
    } else {
        Ok(quantity)
    }
}
