use motoshop_core::schemas::OrderInput;
use motoshop_core::{Order, OrderId};
use serde_json::json;
use tracing::instrument;

use crate::{ApiClient, ApiError};

/// `/pedidos` endpoints.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    client: ApiClient,
}

impl OrdersApi {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Orders of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn mine(&self) -> Result<Vec<Order>, ApiError> {
        self.client.get("/pedidos").await
    }

    /// Every order (admin only).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Order>, ApiError> {
        self.client.get("/pedidos?todos=true").await
    }

    /// One order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.client.get(&format!("/pedidos/{id}")).await
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &OrderInput) -> Result<Order, ApiError> {
        self.client.post("/pedidos", input).await
    }

    /// Move an order to another fulfilment status.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn update_status(&self, id: &OrderId, status: &str) -> Result<Order, ApiError> {
        self.client
            .put(&format!("/pedidos/{id}/estado"), &json!({ "estado": status }))
            .await
    }
}
