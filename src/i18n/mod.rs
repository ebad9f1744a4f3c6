//! Internationalization (i18n) module.
//!
//! - `catalog` - Embedded per-language message catalogs
//! - `resolver` - Fallback chain and placeholder substitution
//! - `system` - Facade used by the rest of the bot

mod catalog;
mod resolver;
mod system;

pub use catalog::{Catalog, LanguageId};
pub use system::LanguageSystem;
