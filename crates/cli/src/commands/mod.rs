//! CLI command implementations.

use std::io::{BufRead, Write};
use std::path::Path;

use async_trait::async_trait;
use motoshop_admin::{Confirm, StoreError};
use motoshop_api::{ApiClient, ApiConfig, ApiError, ConfigError, StorageError};
use serde::Serialize;
use thiserror::Error;

pub mod limits;
pub mod products;
pub mod session;
pub mod users;
pub mod validate;

/// Errors that can end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The draft failed validation; the field errors were already printed.
    #[error("{0} invalid field(s)")]
    Invalid(usize),

    /// The operation reached the backend but did not go through; the user
    /// was already notified.
    #[error("{0}")]
    NotApplied(&'static str),
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Build a client from the loaded configuration.
pub(crate) fn client(config: ApiConfig) -> Result<ApiClient, CliError> {
    Ok(ApiClient::new(config)?)
}

/// Read a UTF-8 file, naming the path on failure.
pub(crate) fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Write `value` to stdout as pretty JSON.
#[allow(clippy::print_stdout)]
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ask a question on stderr and read one line from stdin.
pub(crate) async fn prompt(question: String) -> Result<String, CliError> {
    let answer = tokio::task::spawn_blocking(move || -> std::io::Result<String> {
        let mut stderr = std::io::stderr().lock();
        write!(stderr, "{question} ")?;
        stderr.flush()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    })
    .await
    .map_err(std::io::Error::other)??;
    Ok(answer)
}

/// Yes/no confirmation on the terminal.
///
/// Anything other than an explicit yes, including a read failure, declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

#[async_trait]
impl Confirm for TerminalConfirm {
    async fn confirm(&self, title: &str, text: &str) -> bool {
        match prompt(format!("{title} {text} [s/N]")).await {
            Ok(answer) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Confirmation prompt failed");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}
