//! Motoshop Storefront - Customer-facing flows.
//!
//! Everything a shopper does outside the admin panel:
//! - [`account`] - Registration, login, password change, recovery and logout
//! - [`catalog`] - Cached product listing, featured products, filtering and search
//! - [`cart`] - The signed-in user's cart
//! - [`favorites`] - Locally persisted favorite products
//!
//! Every flow validates its form with the `motoshop-core` schemas before
//! anything is sent, so invalid input never reaches the backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod cart;
pub mod catalog;
pub mod favorites;

pub use account::{AccountError, AccountService};
pub use cart::{CartError, CartService};
pub use catalog::CatalogService;
pub use favorites::{FAVORITES_KEY, Favorites};
