//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` (or an open transaction) as the first argument.

pub mod event_repo;
pub mod profile_repo;
pub mod work_profile_repo;
pub mod work_repo;

pub use event_repo::EventRepo;
pub use profile_repo::ProfileRepo;
pub use work_profile_repo::WorkProfileRepo;
pub use work_repo::WorkRepo;
