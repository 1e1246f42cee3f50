//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up IDs from different contexts.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Generate a new unique identifier using UUID v4.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(OrderId, "Client-side unique identifier for an order leg.");
define_id!(BrokerId, "Broker's unique identifier for an order.");
define_id!(
    ContractId,
    "Identifier for an option contract (OCC symbol at the Alpaca boundary)."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_new_and_display() {
        let id = OrderId::new("leg-1");
        assert_eq!(id.as_str(), "leg-1");
        assert_eq!(format!("{id}"), "leg-1");
    }

    #[test]
    fn order_id_generate_is_unique() {
        let id1 = OrderId::generate();
        let id2 = OrderId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn contract_id_from_str_and_back() {
        let id: ContractId = "AAPL241220C00300000".into();
        assert_eq!(id.clone().into_inner(), "AAPL241220C00300000");
        assert_eq!(id.as_ref(), "AAPL241220C00300000");
    }

    #[test]
    fn broker_id_equality() {
        let id1 = BrokerId::new("b-1");
        let id2 = BrokerId::new("b-1");
        let id3 = BrokerId::new("b-2");
        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }
}
