//! Domain model structs and DTOs.
//!
//! Each submodule contains `FromRow` + `Serialize` row structs matching the
//! database. [`work`] additionally holds the hydrated aggregate and the
//! already-validated create/update inputs consumed by `WorkRepo`;
//! [`work_profile`] pairs a link row with both of its hydrated ends.

pub mod event;
pub mod image;
pub mod profile;
pub mod skill;
pub mod work;
pub mod work_profile;
