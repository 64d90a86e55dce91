//! `motoshop users ...`: user moderation.

use std::sync::Arc;

use motoshop_admin::{
    Confirm, Notifier, RemoteUsers, TracingNotifier, UserDirectory, UserModerator,
};
use motoshop_api::ApiConfig;
use motoshop_core::UserId;

use super::{CliError, TerminalConfirm, client, print_json};

/// Print every user, or only suspended ones.
pub async fn list(config: ApiConfig, suspended: bool) -> Result<(), CliError> {
    let users = RemoteUsers::new(&client(config)?);
    let listed = if suspended {
        users.suspended().await
    } else {
        users.users().await
    };
    print_json(&listed?)
}

pub async fn suspend(config: ApiConfig, id: String) -> Result<(), CliError> {
    if moderator(config)?.suspend(&UserId::new(id)).await {
        Ok(())
    } else {
        Err(CliError::NotApplied("User was not suspended"))
    }
}

pub async fn reactivate(config: ApiConfig, id: String) -> Result<(), CliError> {
    if moderator(config)?.reactivate(&UserId::new(id)).await {
        Ok(())
    } else {
        Err(CliError::NotApplied("User was not reactivated"))
    }
}

fn moderator(config: ApiConfig) -> Result<UserModerator<RemoteUsers>, CliError> {
    let users = RemoteUsers::new(&client(config)?);
    Ok(UserModerator::new(
        Arc::new(users),
        Arc::new(TerminalConfirm) as Arc<dyn Confirm>,
        Arc::new(TracingNotifier) as Arc<dyn Notifier>,
    ))
}
