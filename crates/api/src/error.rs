//! Transport error type.

use thiserror::Error;

/// Shown when the backend cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str =
    "No se puede conectar al servidor. Verifica que el backend este corriendo.";

/// Used when a failed response carries no `mensaje` of its own.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Error en la peticion";

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server could not be reached (connection refused, DNS, timeout).
    #[error("No se puede conectar al servidor. Verifica que el backend este corriendo.")]
    Unreachable(#[source] reqwest::Error),

    /// The request completed with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Any other transport failure.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::Unreachable(err)
        } else {
            Self::Http(err)
        }
    }
}

impl ApiError {
    /// Whether the backend was unreachable.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }

    /// HTTP status of a rejected request.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server refused the credentials (401).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }

    /// Server-supplied message of a rejected request.
    #[must_use]
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}
