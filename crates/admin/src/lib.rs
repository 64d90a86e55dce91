//! Motoshop Admin - View-models for the admin panel.
//!
//! - [`product`] - Product editor with image preview state
//! - [`order`] - Order form over an in-memory order book
//! - [`user`] - User edit form and moderation (suspend, reactivate, delete)
//! - [`dashboard`] - User and catalog statistics
//! - [`notes`] - Session-only recommendation notes
//!
//! The view-models share one form state machine ([`form::EntityForm`]) and
//! talk to the outside world only through the traits in [`ports`].
//! [`remote`] implements those traits over `motoshop-api`; [`testing`]
//! provides in-memory fakes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dashboard;
pub mod form;
pub mod notes;
pub mod order;
pub mod ports;
pub mod product;
pub mod remote;
pub mod testing;
pub mod user;

pub use dashboard::{AdminDashboard, CatalogStats, LONG_SUSPENSION_DAYS, UserStats};
pub use form::{
    Draft, EntityForm, FieldValue, FormMessages, FormMode, FormPhase, SUBMIT_INTERRUPTED,
    SubmitOutcome,
};
pub use notes::{Note, NotesBoard};
pub use order::{LocalOrderBook, OrderForm};
pub use ports::{
    Confirm, EntityStore, Notifier, Outcome, ProductDirectory, StoreError, TracingNotifier,
    UserDirectory,
};
pub use product::ProductEditor;
pub use remote::{RemoteProducts, RemoteUsers, USER_CREATE_REFUSED};
pub use user::{UserForm, UserModerator};
