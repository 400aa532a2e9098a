//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! IDs are opaque strings at this level. Each storage backend decides what
//! the string means: the relational backend uses decimal row ids, the
//! document backend uses BSON `ObjectId` hex for products and the email
//! address for accounts. An id a backend cannot interpret behaves exactly
//! like an id that matches nothing.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use tienda_core::define_id;
/// define_id!(OwnerId);
/// define_id!(ItemId);
///
/// let owner = OwnerId::new("42");
/// let item = ItemId::new("42");
///
/// // These are different types, so this won't compile:
/// // let _: OwnerId = item;
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
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
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

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(AccountId);
define_id!(ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_as_str() {
        let id = AccountId::new("17");
        assert_eq!(id.as_str(), "17");
    }

    #[test]
    fn test_display() {
        let id = ProductId::new("65f2a0c8e4b0d94f12ab34cd");
        assert_eq!(format!("{id}"), "65f2a0c8e4b0d94f12ab34cd");
    }

    #[test]
    fn test_from_conversions() {
        let from_str = AccountId::from("alice@example.com");
        let from_string = AccountId::from("alice@example.com".to_owned());
        assert_eq!(from_str, from_string);
        assert_eq!(String::from(from_str), "alice@example.com");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProductId::new("9");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"9\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
