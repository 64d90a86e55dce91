//! `motoshop login <credential>`: sign in and keep the token.
//!
//! The password comes from `MOTOSHOP_PASSWORD`, or is asked for on the
//! terminal. The token outlives the process only when
//! `MOTOSHOP_STORAGE_PATH` points at a file.

use motoshop_api::ApiConfig;
use motoshop_core::schemas::LoginDraft;
use motoshop_storefront::{AccountError, AccountService};
use tracing::{info, warn};

use super::{CliError, client, print_json, prompt};

/// Sign in as `credential`.
pub async fn login(config: ApiConfig, credential: String) -> Result<(), CliError> {
    if config.storage_path.is_none() {
        warn!("MOTOSHOP_STORAGE_PATH is not set; the session ends with this command");
    }
    let password = match std::env::var("MOTOSHOP_PASSWORD") {
        Ok(password) if !password.is_empty() => password,
        _ => prompt("Contraseña:".to_string()).await?,
    };

    let account = AccountService::new(&client(config)?);
    let draft = LoginDraft {
        credential,
        password,
    };

    match account.login(&draft).await {
        Ok(session) => {
            let username = session.user.as_ref().map(|u| u.username.as_str());
            info!(username = ?username, authenticated = account.is_authenticated(), "Login successful");
            Ok(())
        }
        Err(AccountError::Invalid(errors)) => {
            print_json(&errors)?;
            Err(CliError::Invalid(errors.len()))
        }
        Err(AccountError::Api(e)) => Err(e.into()),
    }
}
