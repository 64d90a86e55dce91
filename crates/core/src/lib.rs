//! Motoshop Core - Shared types, field limits and form validation.
//!
//! This crate is used by every other Motoshop component:
//! - `api` - HTTP client for the Motoshop backend
//! - `storefront` - Customer-facing flows (account, cart, favorites, catalog)
//! - `admin` - Administration panel view-models
//! - `cli` - Command-line tool
//!
//! # Architecture
//!
//! The core crate contains only types, pure rules and traits - no I/O and no
//! HTTP clients. Validation is deterministic and synchronous, so every schema
//! can be exercised without a runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails and enumerations
//! - [`limits`] - Field-limit registry shared by input masking and schemas
//! - [`models`] - Entity records as returned by the API
//! - [`validation`] - Rule chains, the form checker and field-error maps
//! - [`schemas`] - One schema per form (account, product, user, order)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod limits;
pub mod models;
pub mod schemas;
pub mod types;
pub mod validation;

pub use limits::{Entity, FieldLimits, LimitedField};
pub use models::{HasId, Order, Product, User};
pub use schemas::Schema;
pub use types::*;
pub use validation::{FieldErrors, ValidationError, Violation};
