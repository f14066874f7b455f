//! Domain logic for the work portfolio backend.
//!
//! Pure functions and types with no I/O: identifier types, the relation
//! diff engine, input validation, and the shared domain error.

pub mod diff;
pub mod error;
pub mod types;
pub mod validation;
