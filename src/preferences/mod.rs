//! Language preferences.
//!
//! - `holder` - Capability traits for the two storage scopes
//! - `store` - Validated get/set on top of those scopes

mod holder;
mod store;

pub use holder::{GlobalScope, PreferenceHolder, StorageError, StorageResult};
pub use store::PreferenceStore;
#[cfg(test)]
pub use store::{GLOBAL_LANG_KEY, PLAYER_LANG_KEY};
