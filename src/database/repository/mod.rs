//! Repository module - data access layer.

mod preference_repository;

pub use preference_repository::PreferenceRepository;
