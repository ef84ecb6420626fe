//! Newtype IDs for type-safe entity references.
//!
//! Backend and gateway identifiers are opaque strings (e.g.
//! `order_Q1S5ZBWKe1dBGT`), so the wrappers here are string-backed. Use the
//! `define_id!` macro to create new ones without mixing them up.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe ID wrapper around an opaque string.
///
/// Creates a newtype with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use fashion_reels_core::define_id;
/// define_id!(OrderId);
/// define_id!(PaymentId);
///
/// let order_id = OrderId::new("order_Q1S5ZBWKe1dBGT");
/// let payment_id = PaymentId::new("pay_29QQoUBi66xm2f");
///
/// // These are different types, so this won't compile:
/// // let _: OrderId = payment_id;
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
            /// Create a new ID from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying identifier as a string slice.
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
    };
}

// Define standard entity IDs
define_id!(OrderId);
define_id!(PaymentId);
define_id!(UserId);
define_id!(ProductRef);

/// Stable identity of a cart line item.
///
/// Assigned at add-to-cart time so mutations address a specific line even if
/// the sequence is reordered or edited concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(Uuid);

impl LineItemId {
    /// Generate a fresh random line-item id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for LineItemId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_round_trip_transparently() {
        let id = OrderId::new("order_Q1S5ZBWKe1dBGT");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"order_Q1S5ZBWKe1dBGT\"");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn line_item_ids_are_unique() {
        assert_ne!(LineItemId::random(), LineItemId::random());
    }
}
