//! Shared Domain Types
//!
//! Value objects used across the domain. Value objects are compared by
//! value, not identity.

pub mod value_objects;

pub use value_objects::{BrokerId, ContractId, OrderId, Symbol, Timestamp};
