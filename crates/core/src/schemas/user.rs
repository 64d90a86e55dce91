//! Admin user-edit schema.

use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::limits::{self, Entity, truncate};
use crate::models::User;
use crate::types::{Email, is_allowed_country};
use crate::validation::common::{BirthDateError, parse_birth_date, username_rule};
use crate::validation::{Checker, TextRule, ValidationError};

use super::{Schema, form_fields};

form_fields! {
    /// Fields of the user-edit form.
    UserField for Entity::User => {
        Username => "nombreDeUsuario",
        Email => "email",
        Country => "pais",
        BirthDate => "fechaNacimiento",
    }
}

static USERNAME: LazyLock<TextRule> =
    LazyLock::new(|| username_rule("Solo letras, números y _; sin espacios ni _ al inicio"));

static EMAIL: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .min_chars(1, "Email requerido")
        .refine(Email::is_valid, "Email válido")
        .max_chars_default(limits::user::EMAIL)
});

static COUNTRY: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .min_chars(1, "País requerido")
        .refine(is_allowed_country, "Seleccione un país de la lista")
});

/// User-edit form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(rename = "nombreDeUsuario", default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "pais", default)]
    pub country: String,
    /// `YYYY-MM-DD`.
    #[serde(rename = "fechaNacimiento", default)]
    pub birth_date: String,
}

/// Validated user update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(rename = "nombreDeUsuario")]
    pub username: String,
    pub email: Email,
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "fechaNacimiento")]
    pub birth_date: NaiveDate,
}

impl UserDraft {
    /// Seed a draft from an existing user.
    ///
    /// Timestamps are cut to their calendar day and text is truncated to the
    /// registry limits.
    #[must_use]
    pub fn from_record(user: &User) -> Self {
        Self {
            username: truncate(&user.username, limits::user::USERNAME),
            email: truncate(&user.email, limits::user::EMAIL),
            country: user.country.clone(),
            birth_date: user.birth_day().unwrap_or_default(),
        }
    }

    /// Store a typed value, truncated where the field has a limit.
    pub fn set_text(&mut self, field: UserField, value: &str) {
        match field {
            UserField::Username => self.username = truncate(value, limits::user::USERNAME),
            UserField::Email => self.email = truncate(value, limits::user::EMAIL),
            UserField::Country => self.country = value.to_owned(),
            UserField::BirthDate => self.birth_date = value.to_owned(),
        }
    }
}

impl Schema for UserDraft {
    type Field = UserField;
    type Output = UserUpdate;

    fn validate(&self) -> Result<UserUpdate, ValidationError<UserField>> {
        let mut checker = Checker::new();
        let username = checker.text_value(UserField::Username, &USERNAME, &self.username);
        let email = checker
            .text(UserField::Email, &EMAIL, &self.email)
            .then(|| Email::parse(&self.email).ok())
            .flatten();
        let country = checker.text_value(UserField::Country, &COUNTRY, &self.country);
        let birth_date = checker.record(
            UserField::BirthDate,
            parse_birth_date(&self.birth_date).map_err(|e| match e {
                BirthDateError::Missing => "Fecha requerida",
                BirthDateError::Malformed => "Formato: año-mes-día",
                BirthDateError::OutOfRange => "Entre 18 y 70 años (1955-2007)",
            }),
        );

        let output = (|| {
            Some(UserUpdate {
                username: username?,
                email: email?,
                country: country?,
                birth_date: birth_date?,
            })
        })();
        checker.finish(output)
    }
}
