use motoshop_core::schemas::ProductInput;
use motoshop_core::{Product, ProductId};
use tracing::instrument;

use super::ApiMessage;
use crate::{ApiClient, ApiError};

/// `/productos` endpoints.
#[derive(Debug, Clone)]
pub struct ProductsApi {
    client: ApiClient,
}

impl ProductsApi {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.client.get("/productos").await
    }

    /// One product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.client.get(&format!("/productos/{id}")).await
    }

    /// Create a product from a validated payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &ProductInput) -> Result<Product, ApiError> {
        self.client.post("/productos", input).await
    }

    /// Replace a product's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, input), fields(id = %id))]
    pub async fn update(&self, id: &ProductId, input: &ProductInput) -> Result<ApiMessage, ApiError> {
        self.client.put(&format!("/productos/{id}"), input).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<ApiMessage, ApiError> {
        self.client.delete(&format!("/productos/{id}")).await
    }
}
