//! Database models.

pub mod preference;

pub use preference::{GLOBAL_SCOPE, StoredPreference, user_scope};
