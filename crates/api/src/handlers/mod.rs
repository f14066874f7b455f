pub mod events;
pub mod work_profiles;
pub mod works;
