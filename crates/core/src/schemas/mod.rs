//! Form schemas.
//!
//! One schema per form. Each module defines:
//! - a field enum (serialized under the field's wire name)
//! - a draft: the raw, not-yet-validated values as the form holds them
//! - the validated output handed to the API
//!
//! Drafts implement [`Schema`]; validation never short-circuits across
//! fields, so every invalid field reports its own message in one pass.

pub mod account;
pub mod order;
pub mod product;
pub mod user;

pub use account::{
    Credentials, LoginDraft, LoginField, PasswordChange, PasswordChangeDraft, PasswordChangeField,
    RecoveryDraft, RecoveryField, Registration, RegistrationDraft, RegistrationField,
};
pub use order::{OrderDraft, OrderField, OrderInput};
pub use product::{ProductDraft, ProductField, ProductInput};
pub use user::{UserDraft, UserField, UserUpdate};

use crate::validation::{FieldErrors, ValidationError};

/// A candidate object with a validation ruleset.
pub trait Schema {
    /// Field enum used to attach messages.
    type Field: Copy + Ord;
    /// Normalized value produced on success.
    type Output;

    /// Evaluate every field.
    ///
    /// # Errors
    ///
    /// Returns every field violation found in the pass.
    fn validate(&self) -> Result<Self::Output, ValidationError<Self::Field>>;

    /// Evaluate and project failures into a field → message map.
    ///
    /// # Errors
    ///
    /// Returns the projected map when validation fails.
    fn validate_fields(&self) -> Result<Self::Output, FieldErrors<Self::Field>> {
        self.validate().map_err(FieldErrors::from)
    }
}

/// Define a form's field enum with wire names.
///
/// Generates `as_str()`, `ALL`, `Display`, `FromStr`, `Serialize` under the
/// wire name, and a [`crate::limits::LimitedField`] impl against `$entity`.
macro_rules! form_fields {
    (
        $(#[$meta:meta])*
        $name:ident for $entity:expr => {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every field in form order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name of the field.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|field| field.as_str() == s)
                    .ok_or_else(|| format!("unknown field: {s}"))
            }
        }

        impl $crate::limits::LimitedField for $name {
            const ENTITY: $crate::limits::Entity = $entity;

            fn as_str(self) -> &'static str {
                $name::as_str(self)
            }
        }
    };
}

pub(crate) use form_fields;
