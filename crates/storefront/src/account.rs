//! Account flows: sign up, sign in, profile, password change and recovery.
//!
//! Each flow validates its draft first; a draft with invalid fields returns
//! [`AccountError::Invalid`] without contacting the backend.

use motoshop_api::{ApiClient, ApiError, ApiMessage, AuthApi, AuthSession, StorageError};
use motoshop_core::schemas::{
    LoginDraft, LoginField, PasswordChangeDraft, PasswordChangeField, RecoveryDraft,
    RecoveryField, RegistrationDraft, RegistrationField, UserDraft, UserField,
};
use motoshop_core::{FieldErrors, Schema, User};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Errors raised by an account flow over form fields `F`.
#[derive(Debug, Error)]
pub enum AccountError<F: Ord + Copy> {
    /// The form has invalid fields; nothing was sent.
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors<F>),

    /// The backend refused the request or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl<F: Ord + Copy> AccountError<F> {
    /// Field messages, when the form was invalid.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors<F>> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Api(_) => None,
        }
    }
}

/// Account operations for the current shopper.
#[derive(Debug, Clone)]
pub struct AccountService {
    auth: AuthApi,
}

impl AccountService {
    #[must_use]
    pub fn new(client: &ApiClient) -> Self {
        Self {
            auth: client.auth(),
        }
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Invalid` for invalid fields, or
    /// `AccountError::Api` if the backend call fails.
    #[instrument(skip(self, draft))]
    pub async fn register(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<AuthSession, AccountError<RegistrationField>> {
        let registration = validated(draft)?;
        let session = self.auth.register(&registration).await?;
        info!(username = %registration.username, "Account created");
        Ok(session)
    }

    /// Sign in with a username or email.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Invalid` for invalid fields, or
    /// `AccountError::Api` if the backend call fails.
    #[instrument(skip(self, draft))]
    pub async fn login(&self, draft: &LoginDraft) -> Result<AuthSession, AccountError<LoginField>> {
        let credentials = validated(draft)?;
        let session = self.auth.login(&credentials).await?;
        info!(credential = %credentials.credential, "Signed in");
        Ok(session)
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Invalid` for invalid fields, or
    /// `AccountError::Api` if the backend call fails.
    #[instrument(skip(self, draft))]
    pub async fn change_password(
        &self,
        draft: &PasswordChangeDraft,
    ) -> Result<ApiMessage, AccountError<PasswordChangeField>> {
        let change = validated(draft)?;
        Ok(self.auth.change_password(&change).await?)
    }

    /// Request a password-recovery email.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Invalid` for an invalid email, or
    /// `AccountError::Api` if the backend call fails.
    #[instrument(skip(self, draft))]
    pub async fn recover(
        &self,
        draft: &RecoveryDraft,
    ) -> Result<ApiMessage, AccountError<RecoveryField>> {
        let email = validated(draft)?;
        Ok(self.auth.recover(&email).await?)
    }

    /// Profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend call fails.
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.auth.profile().await
    }

    /// Update the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Invalid` for invalid fields, or
    /// `AccountError::Api` if the backend call fails.
    #[instrument(skip(self, draft))]
    pub async fn update_profile(
        &self,
        draft: &UserDraft,
    ) -> Result<ApiMessage, AccountError<UserField>> {
        let update = validated(draft)?;
        Ok(self.auth.update_profile(&update).await?)
    }

    /// Sign out by forgetting the stored token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage cannot be written.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.auth.logout()?;
        info!("Signed out");
        Ok(())
    }

    /// Whether a session token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth.has_token()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn validated<S: Schema>(draft: &S) -> Result<S::Output, AccountError<S::Field>> {
    draft.validate_fields().map_err(|errors| {
        debug!(fields = errors.len(), "Form rejected locally");
        AccountError::Invalid(errors)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use motoshop_api::ApiConfig;

    use super::*;

    fn service() -> AccountService {
        // Nothing listens here; invalid drafts must fail before any request.
        let config = ApiConfig::with_base_url("http://127.0.0.1:9/api").unwrap();
        AccountService::new(&ApiClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_registration_is_local() {
        let draft = RegistrationDraft {
            username: "_bad".to_string(),
            email: "rider@example.com".to_string(),
            country: "Chile".to_string(),
            birth_date: "1990-05-17".to_string(),
            password: "Segura#2024".to_string(),
            confirm_password: "Segura#2025".to_string(),
        };
        let err = service().register(&draft).await.unwrap_err();
        let errors = err.field_errors().unwrap();
        assert!(errors.contains(RegistrationField::Username));
        assert!(errors.contains(RegistrationField::ConfirmPassword));
        assert!(!errors.contains(RegistrationField::Password));
    }

    #[tokio::test]
    async fn test_empty_login_is_local() {
        let err = service().login(&LoginDraft::default()).await.unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_recovery_is_local() {
        let draft = RecoveryDraft {
            email: "no-arroba".to_string(),
        };
        let err = service().recover(&draft).await.unwrap_err();
        assert!(err.field_errors().unwrap().contains(RecoveryField::Email));
    }

    #[test]
    fn test_logout_clears_session() {
        let client = ApiClient::new(ApiConfig::default()).unwrap();
        client.set_token("abc").unwrap();
        let account = AccountService::new(&client);
        assert!(account.is_authenticated());
        account.logout().unwrap();
        assert!(!account.is_authenticated());
    }

    #[test]
    fn test_api_error_has_no_field_errors() {
        let err: AccountError<LoginField> = ApiError::Rejected {
            status: 401,
            message: "Credenciales inválidas".to_string(),
        }
        .into();
        assert!(err.field_errors().is_none());
        assert_eq!(err.to_string(), "Credenciales inválidas");
    }
}
