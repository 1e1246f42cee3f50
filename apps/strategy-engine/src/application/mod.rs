//! Application layer.
//!
//! Port definitions for the two external collaborators and the use case
//! that orchestrates one strategy invocation.

pub mod ports;
pub mod use_cases;
