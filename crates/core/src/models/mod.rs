//! Entity records as returned by the remote API.
//!
//! Records are plain data: persistence lives behind the HTTP API and
//! validation lives in [`crate::schemas`]. Field names are English in Rust
//! and Spanish on the wire.

pub mod order;
pub mod product;
pub mod user;

pub use order::Order;
pub use product::Product;
pub use user::User;

/// A record that carries a server (or locally) assigned identifier.
pub trait HasId {
    /// Identifier type.
    type Id: Clone + std::fmt::Display + Send + Sync;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;
}
