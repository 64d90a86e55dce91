//! User edit form and moderation.
//!
//! Users are created through registration, so the form is only opened in
//! edit mode in practice.

use std::sync::Arc;

use motoshop_core::schemas::{UserDraft, UserField, UserUpdate};
use motoshop_core::{User, UserId};
use tracing::instrument;

use crate::form::{Draft, EntityForm, FieldValue, FormMessages, confirmed_delete};
use crate::ports::{Confirm, EntityStore, Notifier, UserDirectory, report};

impl Draft for UserDraft {
    type Record = User;

    const MESSAGES: FormMessages = FormMessages {
        created: "Usuario agregado correctamente",
        updated: "Usuario actualizado correctamente",
        deleted: "Usuario eliminado correctamente",
        confirm_delete_title: "¿Estás seguro de eliminar este usuario?",
        confirm_delete_text: "Esta acción no se puede deshacer.",
    };

    fn from_record(record: &User) -> Self {
        Self::from_record(record)
    }

    fn set(&mut self, field: UserField, value: FieldValue) -> bool {
        match value {
            FieldValue::Text(text) => {
                self.set_text(field, &text);
                true
            }
            FieldValue::Flag(_) => false,
        }
    }
}

/// User edit form.
pub type UserForm<S> = EntityForm<UserDraft, S>;

/// Suspension, reactivation and removal of users.
pub struct UserModerator<S> {
    users: Arc<S>,
    confirm: Arc<dyn Confirm>,
    notifier: Arc<dyn Notifier>,
}

impl<S> std::fmt::Debug for UserModerator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserModerator").finish_non_exhaustive()
    }
}

impl<S> UserModerator<S>
where
    S: UserDirectory + EntityStore<Record = User, Input = UserUpdate>,
{
    #[must_use]
    pub fn new(users: Arc<S>, confirm: Arc<dyn Confirm>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            users,
            confirm,
            notifier,
        }
    }

    /// Suspend a user. Returns whether the backend accepted.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn suspend(&self, id: &UserId) -> bool {
        report(
            self.notifier.as_ref(),
            self.users.suspend(id).await,
            "Usuario suspendido correctamente",
        )
        .is_some()
    }

    /// Lift a suspension. Returns whether the backend accepted.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn reactivate(&self, id: &UserId) -> bool {
        report(
            self.notifier.as_ref(),
            self.users.reactivate(id).await,
            "Usuario reactivado correctamente",
        )
        .is_some()
    }

    /// Confirm, then delete a suspended user.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn delete_suspended(&self, id: &UserId) -> bool {
        confirmed_delete(
            self.users.as_ref(),
            self.confirm.as_ref(),
            self.notifier.as_ref(),
            id,
            &UserDraft::MESSAGES,
        )
        .await
    }
}
