//! Persistence ports backed by the HTTP API.

use async_trait::async_trait;
use motoshop_api::{ApiClient, ApiError, ProductsApi, UsersApi};
use motoshop_core::schemas::{ProductInput, UserUpdate};
use motoshop_core::{Product, ProductId, User, UserId};
use motoshop_storefront::CatalogService;
use tracing::{instrument, warn};

use crate::ports::{EntityStore, Outcome, ProductDirectory, StoreError, UserDirectory};

/// Users can only be created through registration.
pub const USER_CREATE_REFUSED: &str = "Los usuarios se crean mediante registro";

// =============================================================================
// Products
// =============================================================================

/// Products stored through `/productos`.
#[derive(Debug, Clone)]
pub struct RemoteProducts {
    api: ProductsApi,
    catalog: Option<CatalogService>,
}

impl RemoteProducts {
    #[must_use]
    pub fn new(client: &ApiClient) -> Self {
        Self {
            api: client.products(),
            catalog: None,
        }
    }

    /// Invalidate `catalog` after every successful write.
    #[must_use]
    pub fn with_catalog(mut self, catalog: CatalogService) -> Self {
        self.catalog = Some(catalog);
        self
    }

    fn written<T>(&self, outcome: &Outcome<T>) {
        if outcome.is_accepted()
            && let Some(catalog) = &self.catalog
        {
            catalog.invalidate();
        }
    }
}

#[async_trait]
impl EntityStore for RemoteProducts {
    type Record = Product;
    type Input = ProductInput;

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create(&self, input: &ProductInput) -> Result<Outcome<Option<Product>>, StoreError> {
        let outcome = settle(self.api.create(input).await.map(Some))?;
        self.written(&outcome);
        Ok(outcome)
    }

    #[instrument(skip(self, input), fields(id = %id))]
    async fn update(&self, id: &ProductId, input: &ProductInput) -> Result<Outcome, StoreError> {
        let outcome = settle(self.api.update(id, input).await)?.discard();
        self.written(&outcome);
        Ok(outcome)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ProductId) -> Result<Outcome, StoreError> {
        let outcome = settle(self.api.delete(id).await)?.discard();
        self.written(&outcome);
        Ok(outcome)
    }
}

#[async_trait]
impl ProductDirectory for RemoteProducts {
    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        read(self.api.list().await)
    }
}

// =============================================================================
// Users
// =============================================================================

/// Users managed through `/usuarios`.
#[derive(Debug, Clone)]
pub struct RemoteUsers {
    api: UsersApi,
}

impl RemoteUsers {
    #[must_use]
    pub fn new(client: &ApiClient) -> Self {
        Self { api: client.users() }
    }
}

#[async_trait]
impl UserDirectory for RemoteUsers {
    async fn users(&self) -> Result<Vec<User>, StoreError> {
        read(self.api.list().await)
    }

    async fn suspended(&self) -> Result<Vec<User>, StoreError> {
        read(self.api.suspended().await)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn suspend(&self, id: &UserId) -> Result<Outcome, StoreError> {
        Ok(settle(self.api.suspend(id).await)?.discard())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn reactivate(&self, id: &UserId) -> Result<Outcome, StoreError> {
        Ok(settle(self.api.reactivate(id).await)?.discard())
    }
}

#[async_trait]
impl EntityStore for RemoteUsers {
    type Record = User;
    type Input = UserUpdate;

    async fn create(&self, _input: &UserUpdate) -> Result<Outcome<Option<User>>, StoreError> {
        Ok(Outcome::Rejected(USER_CREATE_REFUSED.to_string()))
    }

    #[instrument(skip(self, input), fields(id = %id))]
    async fn update(&self, id: &UserId, input: &UserUpdate) -> Result<Outcome, StoreError> {
        Ok(settle(self.api.update(id, input).await)?.discard())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &UserId) -> Result<Outcome, StoreError> {
        Ok(settle(self.api.delete(id).await)?.discard())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Split an API result into a backend answer or a store failure.
fn settle<T>(result: Result<T, ApiError>) -> Result<Outcome<T>, StoreError> {
    match result {
        Ok(value) => Ok(Outcome::Accepted(value)),
        Err(ApiError::Rejected { message, .. }) => Ok(Outcome::Rejected(message)),
        Err(e) => Err(failure(e)),
    }
}

/// Reads have no rejection path; a refused read is a failure like any other.
fn read<T>(result: Result<T, ApiError>) -> Result<T, StoreError> {
    result.map_err(failure)
}

fn failure(error: ApiError) -> StoreError {
    if error.is_unreachable() {
        StoreError::Unreachable
    } else {
        warn!(error = %error, "API request failed");
        StoreError::Unexpected(error.to_string())
    }
}
