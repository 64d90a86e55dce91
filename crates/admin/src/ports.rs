//! Collaborators the admin view-models depend on.
//!
//! View-models receive these as `Arc`s at construction time. Production
//! code wires the remote adapters in [`crate::remote`]; tests use the fakes
//! in [`crate::testing`].

use async_trait::async_trait;
use motoshop_api::UNREACHABLE_MESSAGE;
use motoshop_core::{HasId, Product, User, UserId};
use thiserror::Error;
use tracing::{info, warn};

// =============================================================================
// Results
// =============================================================================

/// Answer of a persistence operation that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    /// The operation succeeded.
    Accepted(T),
    /// The backend refused the operation with a human-readable reason.
    Rejected(String),
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Drop the payload.
    #[must_use]
    pub fn discard(self) -> Outcome {
        match self {
            Self::Accepted(_) => Outcome::Accepted(()),
            Self::Rejected(message) => Outcome::Rejected(message),
        }
    }
}

/// A persistence operation that did not produce an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("No se puede conectar al servidor. Verifica que el backend este corriendo.")]
    Unreachable,

    /// Anything else went wrong.
    #[error("{0}")]
    Unexpected(String),
}

// =============================================================================
// Persistence
// =============================================================================

/// Create, update and delete for one entity.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Stored record.
    type Record: HasId + Send + Sync;
    /// Validated payload accepted by create and update.
    type Input: Send + Sync;

    /// Create a record; the stored record is returned when the backend
    /// sends it back.
    async fn create(&self, input: &Self::Input)
    -> Result<Outcome<Option<Self::Record>>, StoreError>;

    /// Replace a record's editable fields.
    async fn update(
        &self,
        id: &<Self::Record as HasId>::Id,
        input: &Self::Input,
    ) -> Result<Outcome, StoreError>;

    /// Delete a record.
    async fn delete(&self, id: &<Self::Record as HasId>::Id) -> Result<Outcome, StoreError>;
}

/// Read access to the product list.
#[async_trait]
pub trait ProductDirectory: Send + Sync {
    async fn products(&self) -> Result<Vec<Product>, StoreError>;
}

/// Read and moderation access to registered users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every user, suspended or not.
    async fn users(&self) -> Result<Vec<User>, StoreError>;

    /// Suspended users only.
    async fn suspended(&self) -> Result<Vec<User>, StoreError>;

    async fn suspend(&self, id: &UserId) -> Result<Outcome, StoreError>;

    async fn reactivate(&self, id: &UserId) -> Result<Outcome, StoreError>;
}

// =============================================================================
// Interaction
// =============================================================================

/// Asynchronous yes/no prompt shown before destructive actions.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, title: &str, text: &str) -> bool;
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, text: &str);
    fn error(&self, text: &str);
}

/// Notifier that writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, text: &str) {
        info!(notice = %text, "Success");
    }

    fn error(&self, text: &str) {
        warn!(notice = %text, "Error");
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Surface a persistence result through `notifier`.
///
/// Returns the accepted payload; every other path ends in an error
/// notification.
pub(crate) fn report<T>(
    notifier: &dyn Notifier,
    result: Result<Outcome<T>, StoreError>,
    success: &str,
) -> Option<T> {
    match result {
        Ok(Outcome::Accepted(value)) => {
            notifier.success(success);
            Some(value)
        }
        Ok(Outcome::Rejected(message)) => {
            notifier.error(&format!("Error: {message}"));
            None
        }
        Err(StoreError::Unreachable) => {
            notifier.error(UNREACHABLE_MESSAGE);
            None
        }
        Err(StoreError::Unexpected(message)) => {
            notifier.error(&format!("Error inesperado: {message}"));
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{Notice, RecordingNotifier};

    #[test]
    fn test_report_paths() {
        let notifier = RecordingNotifier::new();

        assert_eq!(report(&notifier, Ok(Outcome::Accepted(7)), "Listo"), Some(7));
        assert_eq!(
            report::<()>(&notifier, Ok(Outcome::Rejected("Duplicado".into())), "Listo"),
            None
        );
        assert_eq!(report::<()>(&notifier, Err(StoreError::Unreachable), "Listo"), None);
        assert_eq!(
            report::<()>(&notifier, Err(StoreError::Unexpected("boom".into())), "Listo"),
            None
        );

        assert_eq!(
            notifier.notices(),
            vec![
                Notice::Success("Listo".into()),
                Notice::Error("Error: Duplicado".into()),
                Notice::Error(UNREACHABLE_MESSAGE.into()),
                Notice::Error("Error inesperado: boom".into()),
            ]
        );
    }

    #[test]
    fn test_outcome_discard() {
        assert_eq!(Outcome::Accepted(5).discard(), Outcome::Accepted(()));
        assert_eq!(
            Outcome::<u8>::Rejected("no".into()).discard(),
            Outcome::Rejected("no".into())
        );
    }
}
