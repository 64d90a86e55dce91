//! HTTP transport for the Motoshop backend.
//!
//! Every request carries JSON, attaches `Authorization: Bearer <token>` when
//! a token is stored, and maps failures onto [`ApiError`]:
//! - connection failures and timeouts become [`ApiError::Unreachable`]
//! - non-2xx responses become [`ApiError::Rejected`] with the server's
//!   `mensaje` (or a generic message)
//! - a 401 to an authenticated request evicts the stored token

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::ApiConfig;
use crate::endpoints::{AuthApi, CartApi, OrdersApi, ProductsApi, UsersApi};
use crate::error::{ApiError, DEFAULT_REJECTION_MESSAGE};
use crate::storage::{FileStorage, MemoryStorage, Storage, StorageError, TOKEN_KEY};

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the Motoshop REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and storage.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    config: ApiConfig,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client whose storage follows `config.storage_path`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let storage: Arc<dyn Storage> = match &config.storage_path {
            Some(path) => Arc::new(FileStorage::new(path)),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::with_storage(config, storage)
    }

    /// Create a client over an explicit storage backend.
    ///
    /// A token configured in `config` is stored unless the storage already
    /// holds one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn with_storage(config: ApiConfig, storage: Arc<dyn Storage>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Http)?;

        if let Some(token) = &config.token
            && matches!(storage.get(TOKEN_KEY), Ok(None))
        {
            if let Err(e) = storage.set(TOKEN_KEY, token.expose_secret()) {
                warn!(error = %e, "Failed to seed configured token");
            }
        }

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                config,
                storage,
            }),
        })
    }

    /// Client configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Shared storage backend.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.inner.storage)
    }

    // -------------------------------------------------------------------------
    // Token
    // -------------------------------------------------------------------------

    /// Stored bearer token.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        match self.inner.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()).map(SecretString::from),
            Err(e) => {
                warn!(error = %e, "Failed to read token from storage");
                None
            }
        }
    }

    /// Whether a bearer token is stored.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Store a bearer token for later requests.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the token cannot be persisted.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.inner.storage.set(TOKEN_KEY, token)
    }

    /// Forget the bearer token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage cannot be written.
    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.inner.storage.remove(TOKEN_KEY)
    }

    // -------------------------------------------------------------------------
    // Endpoint groups
    // -------------------------------------------------------------------------

    /// `/auth` endpoints.
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// `/productos` endpoints.
    #[must_use]
    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.clone())
    }

    /// `/usuarios` endpoints.
    #[must_use]
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// `/pedidos` endpoints.
    #[must_use]
    pub fn orders(&self) -> OrdersApi {
        OrdersApi::new(self.clone())
    }

    /// `/carrito` endpoints.
    #[must_use]
    pub fn cart(&self) -> CartApi {
        CartApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Verbs
    // -------------------------------------------------------------------------

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, rejection or an unexpected body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, None).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, rejection or an unexpected body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, Some(body)).await
    }

    /// `POST path` without a body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, rejection or an unexpected body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::POST, path, None).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, rejection or an unexpected body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::PUT, path, Some(body)).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, rejection or an unexpected body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, None).await
    }

    #[instrument(skip(self, body))]
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = self.inner.config.endpoint(path);
        let token = self.token();

        let mut request = self.inner.http.request(method, &url);
        if let Some(token) = &token {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.inspect_err(|e| {
            warn!(error = %e, url = %url, "Request did not complete");
        })?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED && token.is_some() {
            debug!("Evicting token after 401");
            if let Err(e) = self.clear_token() {
                warn!(error = %e, "Failed to evict token");
            }
        }

        if !status.is_success() {
            let message = rejection_message(&text);
            warn!(status = status.as_u16(), message = %message, "API rejected request");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = if text.trim().is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&text).inspect_err(|e| {
                warn!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "Failed to parse API response"
                );
            })?
        };
        decode(&value)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// `mensaje` from a failed response body, or the generic message.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("mensaje"))
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string(), str::to_owned)
}

/// Decode a success body, accepting either the bare payload or a
/// `{ "data": ... }` envelope.
fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, ApiError> {
    match T::deserialize(value) {
        Ok(decoded) => Ok(decoded),
        Err(err) => match value.get("data") {
            Some(data) => T::deserialize(data).map_err(ApiError::Decode),
            None => Err(ApiError::Decode(err)),
        },
    }
}
