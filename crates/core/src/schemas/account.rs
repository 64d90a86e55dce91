//! Account schemas: registration, login, password change and recovery.
//!
//! Drafts hold passwords as plain strings while the user types; validated
//! outputs wrap them in [`SecretString`] so they never show up in logs.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use secrecy::SecretString;
use serde::Deserialize;

use crate::limits::{self, Entity};
use crate::types::Email;
use crate::validation::common::{
    BirthDateError, email_rule, is_email_or_username, parse_birth_date, strong_password_rule,
    username_rule,
};
use crate::validation::{Checker, TextRule, ValidationError};

use super::{Schema, form_fields};

const PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden";

// =============================================================================
// Registration
// =============================================================================

form_fields! {
    /// Fields of the registration form.
    RegistrationField for Entity::User => {
        Username => "nombreDeUsuario",
        Email => "email",
        Country => "pais",
        BirthDate => "fechaNacimiento",
        Password => "contrasena",
        ConfirmPassword => "confirmarContrasena",
    }
}

static REG_USERNAME: LazyLock<TextRule> =
    LazyLock::new(|| username_rule("Solo letras, números y _; sin espacios ni empezar con _"));

static REG_EMAIL: LazyLock<TextRule> = LazyLock::new(email_rule);

static REG_COUNTRY: LazyLock<TextRule> =
    LazyLock::new(|| TextRule::new().min_chars(1, "El país es requerido"));

static REG_PASSWORD: LazyLock<TextRule> =
    LazyLock::new(|| strong_password_rule("Mayúscula, minúscula, número y un símbolo"));

static REG_CONFIRM: LazyLock<TextRule> =
    LazyLock::new(|| TextRule::new().max_chars_default(limits::user::PASSWORD));

/// Registration form values.
#[derive(Clone, Default, Deserialize)]
pub struct RegistrationDraft {
    #[serde(rename = "nombreDeUsuario", default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "pais", default)]
    pub country: String,
    #[serde(rename = "fechaNacimiento", default)]
    pub birth_date: String,
    #[serde(rename = "contrasena", default)]
    pub password: String,
    #[serde(rename = "confirmarContrasena", default)]
    pub confirm_password: String,
}

impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("country", &self.country)
            .field("birth_date", &self.birth_date)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

/// A validated sign-up.
#[derive(Debug)]
pub struct Registration {
    pub username: String,
    pub email: Email,
    pub country: String,
    pub birth_date: NaiveDate,
    pub password: SecretString,
}

impl Schema for RegistrationDraft {
    type Field = RegistrationField;
    type Output = Registration;

    fn validate(&self) -> Result<Registration, ValidationError<RegistrationField>> {
        use RegistrationField as F;

        let mut checker = Checker::new();
        let username = checker.text_value(F::Username, &REG_USERNAME, &self.username);
        let email = checker
            .text(F::Email, &REG_EMAIL, &self.email)
            .then(|| Email::parse(&self.email).ok())
            .flatten();
        let country = checker.text_value(F::Country, &REG_COUNTRY, &self.country);
        let birth_date = checker.record(
            F::BirthDate,
            parse_birth_date(&self.birth_date).map_err(|e| match e {
                BirthDateError::Missing => "La fecha es requerida",
                BirthDateError::Malformed => "Formato: año-mes-día",
                BirthDateError::OutOfRange => "Debes tener entre 18 y 70 años (1955-2007)",
            }),
        );
        let password = checker.text_value(F::Password, &REG_PASSWORD, &self.password);
        checker.text(F::ConfirmPassword, &REG_CONFIRM, &self.confirm_password);
        checker.refine(
            F::ConfirmPassword,
            self.password == self.confirm_password,
            PASSWORD_MISMATCH,
        );

        let output = (|| {
            Some(Registration {
                username: username?,
                email: email?,
                country: country?,
                birth_date: birth_date?,
                password: SecretString::from(password?),
            })
        })();
        checker.finish(output)
    }
}

// =============================================================================
// Login
// =============================================================================

form_fields! {
    /// Fields of the login form.
    LoginField for Entity::User => {
        Credential => "credencial",
        Password => "contrasena",
    }
}

static LOGIN_CREDENTIAL: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .min_chars(1, "Usuario o email")
        .max_chars_default(limits::user::EMAIL)
        .refine(
            is_email_or_username,
            "Email válido o usuario (mín. 3 caracteres)",
        )
});

static LOGIN_PASSWORD: LazyLock<TextRule> = LazyLock::new(|| {
    TextRule::new()
        .min_chars(1, "Contraseña requerida")
        .max_chars_default(limits::user::PASSWORD)
});

/// Login form values.
#[derive(Clone, Default, Deserialize)]
pub struct LoginDraft {
    /// Username or email.
    #[serde(rename = "credencial", default)]
    pub credential: String,
    #[serde(rename = "contrasena", default)]
    pub password: String,
}

impl fmt::Debug for LoginDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginDraft")
            .field("credential", &self.credential)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Validated login credentials.
#[derive(Debug)]
pub struct Credentials {
    pub credential: String,
    pub password: SecretString,
}

impl Schema for LoginDraft {
    type Field = LoginField;
    type Output = Credentials;

    fn validate(&self) -> Result<Credentials, ValidationError<LoginField>> {
        let mut checker = Checker::new();
        let credential =
            checker.text_value(LoginField::Credential, &LOGIN_CREDENTIAL, &self.credential);
        let password = checker.text_value(LoginField::Password, &LOGIN_PASSWORD, &self.password);

        let output = credential.zip(password).map(|(credential, password)| Credentials {
            credential: credential.trim().to_owned(),
            password: SecretString::from(password),
        });
        checker.finish(output)
    }
}

// =============================================================================
// Password change
// =============================================================================

form_fields! {
    /// Fields of the change-password form.
    PasswordChangeField for Entity::User => {
        Current => "contrasenaActual",
        New => "nuevaContrasena",
        ConfirmNew => "confirmarNuevaContrasena",
    }
}

static CURRENT_PASSWORD: LazyLock<TextRule> =
    LazyLock::new(|| TextRule::new().min_chars(1, "Contraseña actual requerida"));

static NEW_PASSWORD: LazyLock<TextRule> =
    LazyLock::new(|| strong_password_rule("Mayúscula, minúscula, número y símbolo"));

/// Change-password form values.
#[derive(Clone, Default, Deserialize)]
pub struct PasswordChangeDraft {
    #[serde(rename = "contrasenaActual", default)]
    pub current: String,
    #[serde(rename = "nuevaContrasena", default)]
    pub new: String,
    #[serde(rename = "confirmarNuevaContrasena", default)]
    pub confirm_new: String,
}

impl fmt::Debug for PasswordChangeDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChangeDraft")
            .finish_non_exhaustive()
    }
}

/// A validated password change.
#[derive(Debug)]
pub struct PasswordChange {
    pub current: SecretString,
    pub new: SecretString,
}

impl Schema for PasswordChangeDraft {
    type Field = PasswordChangeField;
    type Output = PasswordChange;

    fn validate(&self) -> Result<PasswordChange, ValidationError<PasswordChangeField>> {
        use PasswordChangeField as F;

        let mut checker = Checker::new();
        let current = checker.text_value(F::Current, &CURRENT_PASSWORD, &self.current);
        let new = checker.text_value(F::New, &NEW_PASSWORD, &self.new);
        checker.refine(F::ConfirmNew, self.new == self.confirm_new, PASSWORD_MISMATCH);

        let output = current.zip(new).map(|(current, new)| PasswordChange {
            current: SecretString::from(current),
            new: SecretString::from(new),
        });
        checker.finish(output)
    }
}

// =============================================================================
// Recovery
// =============================================================================

form_fields! {
    /// Fields of the password-recovery form.
    RecoveryField for Entity::User => {
        Email => "email",
    }
}

static RECOVERY_EMAIL: LazyLock<TextRule> = LazyLock::new(email_rule);

/// Password-recovery form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecoveryDraft {
    #[serde(default)]
    pub email: String,
}

impl Schema for RecoveryDraft {
    type Field = RecoveryField;
    type Output = Email;

    fn validate(&self) -> Result<Email, ValidationError<RecoveryField>> {
        let mut checker = Checker::new();
        let email = checker
            .text(RecoveryField::Email, &RECOVERY_EMAIL, &self.email)
            .then(|| Email::parse(&self.email).ok())
            .flatten();
        checker.finish(email)
    }
}
