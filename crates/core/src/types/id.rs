//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// Database code binds the underlying `i64` at the row boundary; the ID
/// types themselves carry no storage-layer dependencies.
///
/// # Example
///
/// ```rust
/// # use partfinder_core::define_id;
/// define_id!(ProductId);
/// define_id!(UserId);
///
/// let product_id = ProductId::new(1);
/// let user_id = UserId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = user_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_construction() {
        let id = ProductId::new(42);
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn test_id_display() {
        let id = ProductId::new(7);
        assert_eq!(format!("{id}"), "7");
    }

    #[test]
    fn test_id_from_into() {
        let id: ProductId = 3_i64.into();
        let raw: i64 = id.into();
        assert_eq!(raw, 3);
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = UserId::new(9);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "9");

        let parsed: UserId = serde_json::from_str("9").unwrap();
        assert_eq!(parsed, id);
    }
}
