//! Database module exports.

mod models;
mod mongo;
mod repository;

pub use models::user_scope;
pub use mongo::Database;
pub use repository::PreferenceRepository;
