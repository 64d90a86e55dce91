//! `motoshop validate <form> <file>`: check a draft without sending it.

use std::path::Path;

use clap::ValueEnum;
use motoshop_core::Schema;
use motoshop_core::schemas::{
    LoginDraft, OrderDraft, PasswordChangeDraft, ProductDraft, RecoveryDraft, RegistrationDraft,
    UserDraft,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use super::{CliError, print_json, read_file};

/// Forms a draft can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormKind {
    Product,
    Order,
    User,
    Registration,
    Login,
    Password,
    Recovery,
}

/// Validate the draft in `file` and print its field errors.
pub fn run(form: FormKind, file: &Path) -> Result<(), CliError> {
    let raw = read_file(file)?;
    let errors = check(form, &raw)?;
    if errors.is_null() {
        info!(form = ?form, "Draft is valid");
        return Ok(());
    }
    print_json(&errors)?;
    let count = errors.as_object().map_or(0, serde_json::Map::len);
    Err(CliError::Invalid(count))
}

/// Field errors of the draft in `raw`, or `null` when it is valid.
fn check(form: FormKind, raw: &str) -> Result<serde_json::Value, CliError> {
    match form {
        FormKind::Product => field_errors::<ProductDraft>(raw),
        FormKind::Order => field_errors::<OrderDraft>(raw),
        FormKind::User => field_errors::<UserDraft>(raw),
        FormKind::Registration => field_errors::<RegistrationDraft>(raw),
        FormKind::Login => field_errors::<LoginDraft>(raw),
        FormKind::Password => field_errors::<PasswordChangeDraft>(raw),
        FormKind::Recovery => field_errors::<RecoveryDraft>(raw),
    }
}

fn field_errors<S>(raw: &str) -> Result<serde_json::Value, CliError>
where
    S: Schema + DeserializeOwned,
    S::Field: Serialize,
{
    let draft: S = serde_json::from_str(raw)?;
    match draft.validate_fields() {
        Ok(_) => Ok(serde_json::Value::Null),
        Err(errors) => Ok(serde_json::to_value(&errors)?),
    }
}
