//! Generic create/edit form state machine.
//!
//! ```text
//! Idle --open--> Editing --submit(valid)--> Submitting --accepted--> Idle
//!                  ^   |                        |
//!                  |   +--submit(invalid)--+    +--rejected/failed--+
//!                  +-----------------------+------------------------+
//! ```
//!
//! Field changes store truncated values and clear that field's message;
//! validation runs only on submit. A failed submission keeps the draft so
//! nothing typed is lost. A submission that never finishes (its future is
//! dropped or the store panics) also returns the form to editing and is
//! notified as interrupted.

use std::sync::Arc;

use motoshop_core::{FieldErrors, HasId, Schema};
use tracing::{debug, instrument, warn};

use crate::ports::{Confirm, EntityStore, Notifier, Outcome, report};

/// Notified when a create or update call is abandoned before it answers.
pub const SUBMIT_INTERRUPTED: &str = "La operación se interrumpió antes de terminar";

// =============================================================================
// Draft
// =============================================================================

/// A value typed into a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// User-facing texts of one entity's form.
#[derive(Debug, Clone, Copy)]
pub struct FormMessages {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub confirm_delete_title: &'static str,
    pub confirm_delete_text: &'static str,
}

/// Form values for one entity.
pub trait Draft: Schema + Default + Clone + Send + Sync {
    /// The record an edit starts from.
    type Record: HasId + Clone + Send + Sync;

    /// Notification and confirmation texts.
    const MESSAGES: FormMessages;

    /// Seed from an existing record, truncated to the field limits.
    fn from_record(record: &Self::Record) -> Self;

    /// Store a typed value. Returns `false` if the field does not take
    /// that kind of value.
    fn set(&mut self, field: Self::Field, value: FieldValue) -> bool;
}

type RecordId<D> = <<D as Draft>::Record as HasId>::Id;

// =============================================================================
// States
// =============================================================================

/// What the form is working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<R> {
    Create,
    Edit(R),
}

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// Closed; the draft holds defaults.
    #[default]
    Idle,
    Editing,
    /// A create or update call is in flight. Only held while
    /// [`EntityForm::submit`] runs.
    Submitting,
}

/// Result of [`EntityForm::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored; the form is back to idle.
    Saved,
    /// Field errors were set; nothing was sent.
    Invalid,
    /// The backend refused the payload; the draft is kept.
    Rejected,
    /// The backend could not be reached or failed; the draft is kept.
    Failed,
}

/// Holds a form in [`FormPhase::Submitting`] for the length of a store call.
///
/// Dropping it without [`InFlight::finish`] means the call never answered:
/// the phase still goes back to editing and the interruption is notified.
struct InFlight<'a> {
    phase: &'a mut FormPhase,
    notifier: &'a dyn Notifier,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn start(phase: &'a mut FormPhase, notifier: &'a dyn Notifier) -> Self {
        *phase = FormPhase::Submitting;
        Self {
            phase,
            notifier,
            finished: false,
        }
    }

    fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.phase = FormPhase::Editing;
        if !self.finished {
            warn!("Submission interrupted before the store answered");
            self.notifier.error(SUBMIT_INTERRUPTED);
        }
    }
}

// =============================================================================
// EntityForm
// =============================================================================

/// Create/edit form over draft `D` persisted through store `S`.
pub struct EntityForm<D: Draft, S> {
    mode: FormMode<D::Record>,
    draft: D,
    errors: FieldErrors<D::Field>,
    phase: FormPhase,
    store: Arc<S>,
    confirm: Arc<dyn Confirm>,
    notifier: Arc<dyn Notifier>,
}

impl<D, S> std::fmt::Debug for EntityForm<D, S>
where
    D: Draft + std::fmt::Debug,
    D::Field: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityForm")
            .field("phase", &self.phase)
            .field("editing", &matches!(self.mode, FormMode::Edit(_)))
            .field("draft", &self.draft)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl<D, S> EntityForm<D, S>
where
    D: Draft,
    S: EntityStore<Record = D::Record, Input = D::Output>,
{
    #[must_use]
    pub fn new(store: Arc<S>, confirm: Arc<dyn Confirm>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            mode: FormMode::Create,
            draft: D::default(),
            errors: FieldErrors::new(),
            phase: FormPhase::Idle,
            store,
            confirm,
            notifier,
        }
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    #[must_use]
    pub const fn mode(&self) -> &FormMode<D::Record> {
        &self.mode
    }

    #[must_use]
    pub const fn draft(&self) -> &D {
        &self.draft
    }

    /// Current field messages; fields without a message are absent.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors<D::Field> {
        &self.errors
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Start creating or editing; an edit seeds the draft from the record.
    pub fn open(&mut self, mode: FormMode<D::Record>) {
        self.draft = match &mode {
            FormMode::Create => D::default(),
            FormMode::Edit(record) => D::from_record(record),
        };
        self.mode = mode;
        self.errors.clear();
        self.phase = FormPhase::Editing;
    }

    /// Start creating from a complete draft, e.g. one read from a file.
    ///
    /// Values are taken as-is; over-long ones fail validation on submit
    /// instead of being truncated.
    pub fn load(&mut self, draft: D) {
        self.mode = FormMode::Create;
        self.draft = draft;
        self.errors.clear();
        self.phase = FormPhase::Editing;
    }

    /// Discard the draft and go back to idle.
    pub fn close(&mut self) {
        self.mode = FormMode::Create;
        self.draft = D::default();
        self.errors.clear();
        self.phase = FormPhase::Idle;
    }

    /// Store a field value and clear that field's message.
    ///
    /// Returns `false` if the value was not applied.
    pub fn set(&mut self, field: D::Field, value: impl Into<FieldValue>) -> bool {
        let applied = self.draft.set(field, value.into());
        if applied {
            self.errors.clear_field(field);
            if self.phase == FormPhase::Idle {
                self.phase = FormPhase::Editing;
            }
        }
        applied
    }

    /// Validate the draft and, if valid, create or update the record.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        let input = match self.draft.validate_fields() {
            Ok(input) => input,
            Err(errors) => {
                debug!(fields = errors.len(), "Draft rejected locally");
                self.errors = errors;
                self.phase = FormPhase::Editing;
                return SubmitOutcome::Invalid;
            }
        };
        self.errors.clear();

        let in_flight = InFlight::start(&mut self.phase, self.notifier.as_ref());
        let (result, success) = match &self.mode {
            FormMode::Create => (
                self.store.create(&input).await.map(Outcome::discard),
                D::MESSAGES.created,
            ),
            FormMode::Edit(record) => (
                self.store.update(record.id(), &input).await,
                D::MESSAGES.updated,
            ),
        };
        in_flight.finish();

        let rejected = matches!(result, Ok(Outcome::Rejected(_)));
        if report(self.notifier.as_ref(), result, success).is_some() {
            self.close();
            SubmitOutcome::Saved
        } else if rejected {
            SubmitOutcome::Rejected
        } else {
            SubmitOutcome::Failed
        }
    }

    /// Ask for confirmation, then delete the record with `id`.
    ///
    /// Returns whether the record was deleted. Declining the prompt sends
    /// nothing; failures are notified, never returned.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn delete(&self, id: &RecordId<D>) -> bool {
        confirmed_delete(
            self.store.as_ref(),
            self.confirm.as_ref(),
            self.notifier.as_ref(),
            id,
            &D::MESSAGES,
        )
        .await
    }
}

/// Confirm, delete and notify.
pub(crate) async fn confirmed_delete<S: EntityStore + ?Sized>(
    store: &S,
    confirm: &dyn Confirm,
    notifier: &dyn Notifier,
    id: &<S::Record as HasId>::Id,
    messages: &FormMessages,
) -> bool {
    if !confirm
        .confirm(messages.confirm_delete_title, messages.confirm_delete_text)
        .await
    {
        debug!("Delete declined");
        return false;
    }
    report(notifier, store.delete(id).await, messages.deleted).is_some()
}
