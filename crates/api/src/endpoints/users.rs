use motoshop_core::schemas::UserUpdate;
use motoshop_core::{User, UserId};
use tracing::instrument;

use super::ApiMessage;
use crate::{ApiClient, ApiError};

/// `/usuarios` endpoints (admin).
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Every registered user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/usuarios").await
    }

    /// One user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &UserId) -> Result<User, ApiError> {
        self.client.get(&format!("/usuarios/{id}")).await
    }

    /// Update a user from a validated payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, update), fields(id = %id))]
    pub async fn update(&self, id: &UserId, update: &UserUpdate) -> Result<ApiMessage, ApiError> {
        self.client.put(&format!("/usuarios/{id}"), update).await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: &UserId) -> Result<ApiMessage, ApiError> {
        self.client.delete(&format!("/usuarios/{id}")).await
    }

    /// Suspend a user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn suspend(&self, id: &UserId) -> Result<ApiMessage, ApiError> {
        self.client.post_empty(&format!("/usuarios/{id}/suspender")).await
    }

    /// Lift a suspension.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn reactivate(&self, id: &UserId) -> Result<ApiMessage, ApiError> {
        self.client.post_empty(&format!("/usuarios/{id}/reactivar")).await
    }

    /// Users matching a free-text term.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<User>, ApiError> {
        let term = urlencoding::encode(term.trim());
        self.client.get(&format!("/usuarios/buscar?termino={term}")).await
    }

    /// Currently suspended users.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn suspended(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/usuarios/suspendidos").await
    }
}
