use motoshop_core::schemas::{Credentials, PasswordChange, Registration, UserUpdate};
use motoshop_core::{Email, User};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use super::ApiMessage;
use crate::storage::StorageError;
use crate::{ApiClient, ApiError};

/// Response of login and registration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent requests.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "usuario", default)]
    pub user: Option<User>,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
}

/// `/auth` endpoints.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Sign in; a returned token is stored for later requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, credentials), fields(credential = %credentials.credential))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, ApiError> {
        let body = json!({
            "credencial": credentials.credential,
            "contrasena": credentials.password.expose_secret(),
        });
        let session: AuthSession = self.client.post("/auth/login", &body).await?;
        self.keep_token(&session);
        Ok(session)
    }

    /// Create an account; a returned token is stored for later requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration) -> Result<AuthSession, ApiError> {
        let body = json!({
            "nombreDeUsuario": registration.username,
            "email": registration.email,
            "pais": registration.country,
            "fechaNacimiento": registration.birth_date.format("%Y-%m-%d").to_string(),
            "contrasena": registration.password.expose_secret(),
        });
        let session: AuthSession = self.client.post("/auth/registro", &body).await?;
        self.keep_token(&session);
        Ok(session)
    }

    /// Profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.client.get("/auth/perfil").await
    }

    /// Update the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &UserUpdate) -> Result<ApiMessage, ApiError> {
        self.client.put("/auth/perfil", update).await
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<ApiMessage, ApiError> {
        let body = json!({
            "contrasenaActual": change.current.expose_secret(),
            "nuevaContrasena": change.new.expose_secret(),
        });
        self.client.put("/auth/contrasena", &body).await
    }

    /// Ask for a password-recovery email.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn recover(&self, email: &Email) -> Result<ApiMessage, ApiError> {
        self.client
            .post("/auth/recuperar", &json!({ "email": email }))
            .await
    }

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage cannot be written.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.client.clear_token()
    }

    /// Whether a token is stored.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.client.has_token()
    }

    fn keep_token(&self, session: &AuthSession) {
        let Some(token) = session.token.as_deref().filter(|t| !t.is_empty()) else {
            return;
        };
        match self.client.set_token(token) {
            Ok(()) => info!("Session token stored"),
            Err(e) => warn!(error = %e, "Failed to store session token"),
        }
    }
}
