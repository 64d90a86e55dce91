//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Identifiers are
//! opaque strings assigned by the remote API (or, for locally kept records,
//! derived from the creation timestamp).

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use motoshop_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new("665f1c");
/// let order_id = OrderId::new("665f1c");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(UserId);
define_id!(OrderId);
define_id!(CartItemId);
define_id!(NoteId);

/// Build an identifier from a creation timestamp in milliseconds.
///
/// Used for records that only live on the client (local orders, notes).
#[must_use]
pub fn timestamp_id(at: chrono::DateTime<chrono::Utc>) -> String {
    at.timestamp_millis().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_conversions() {
        let id = ProductId::new("abc123");
        assert_eq!(id.to_string(), "abc123");
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(String::from(id.clone()), "abc123");
        assert_eq!(ProductId::from("abc123"), id);
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = UserId::new("u-1");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"u-1\""));
    }

    #[test]
    fn test_timestamp_id() {
        let at = chrono::DateTime::from_timestamp_millis(1_700_000_000_123);
        assert_eq!(at.map(timestamp_id).as_deref(), Some("1700000000123"));
    }
}
