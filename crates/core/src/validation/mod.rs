//! Validation engine.
//!
//! A schema evaluates every field of a candidate object independently and
//! collects one [`Violation`] per failing field (rules inside a field stop at
//! the first failure). The resulting [`ValidationError`] is projected into a
//! [`FieldErrors`] map for display under each input.
//!
//! # Modules
//!
//! - [`rules`] - ordered constraint chains for text fields and the
//!   [`Checker`] that runs them across a whole form
//! - [`common`] - predicates shared by several schemas (usernames, passwords,
//!   birth dates)

pub mod common;
pub mod rules;

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

pub use rules::{Checker, TextRule};

/// A failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation<F> {
    /// Field the message is attached to.
    pub field: F,
    /// Human-readable message.
    pub message: String,
}

/// Schema failure: every violation found in one evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed on {} field(s)", .violations.len())]
pub struct ValidationError<F> {
    violations: Vec<Violation<F>>,
}

impl<F> ValidationError<F> {
    /// Build an error from collected violations.
    #[must_use]
    pub const fn new(violations: Vec<Violation<F>>) -> Self {
        Self { violations }
    }

    /// All violations in evaluation order.
    #[must_use]
    pub fn violations(&self) -> &[Violation<F>] {
        &self.violations
    }

    /// Consume into the violation list.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation<F>> {
        self.violations
    }
}

impl<F: Ord + Copy> ValidationError<F> {
    /// Project into a field → first message map.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors<F> {
        FieldErrors::from(self)
    }
}

/// Field name → first error message, for rendering a form.
///
/// Fields without a violation are absent, so a view can decide error state
/// purely by key presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors<F: Ord>(BTreeMap<F, String>);

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: F) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether `field` has a message.
    #[must_use]
    pub fn contains(&self, field: F) -> bool {
        self.0.contains_key(&field)
    }

    /// Record a message unless the field already has one.
    pub fn insert_first(&mut self, field: F, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Drop the message for `field`.
    pub fn clear_field(&mut self, field: F) -> Option<String> {
        self.0.remove(&field)
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields with a message, in field order.
    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.0.keys().copied()
    }

    /// `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl<F: Ord + Copy> From<&ValidationError<F>> for FieldErrors<F> {
    fn from(error: &ValidationError<F>) -> Self {
        let mut errors = Self::new();
        for violation in &error.violations {
            errors.insert_first(violation.field, violation.message.clone());
        }
        errors
    }
}

impl<F: Ord + Copy> From<ValidationError<F>> for FieldErrors<F> {
    fn from(error: ValidationError<F>) -> Self {
        Self::from(&error)
    }
}

impl<F: Ord> IntoIterator for FieldErrors<F> {
    type Item = (F, String);
    type IntoIter = btree_map::IntoIter<F, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
