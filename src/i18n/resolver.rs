//! Message resolution.
//!
//! Lookup order: holder preference, global preference, default language, and
//! finally the key itself. Positional placeholders `%1`, `%2`, ... are then
//! filled from the arguments.

use std::fmt::Display;
use std::sync::Arc;

use tracing::debug;

use super::catalog::{Catalog, LanguageId};
use crate::preferences::{PreferenceHolder, PreferenceStore};

/// A substitution argument.
pub type Arg<'a> = &'a (dyn Display + Sync);

#[derive(Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
    store: Arc<PreferenceStore>,
}

impl Translator {
    pub fn new(store: Arc<PreferenceStore>) -> Self {
        Self {
            catalog: store.catalog().clone(),
            store,
        }
    }

    /// Render `key` in the effective language of `entity` (global when `None`).
    pub async fn translate(
        &self,
        entity: Option<&dyn PreferenceHolder>,
        key: &str,
        args: &[Arg<'_>],
    ) -> String {
        let lang = self.store.get_entity(entity).await;
        let text = self.text(&lang, key, args);
        if text == key {
            debug!(
                "No template for {} (entity: {})",
                key,
                entity.map(|e| e.label()).unwrap_or_else(|| "none".to_string())
            );
        }
        text
    }

    /// Render `key` in an explicit language.
    pub fn text(&self, lang: &LanguageId, key: &str, args: &[Arg<'_>]) -> String {
        let template = self
            .catalog
            .lookup(lang.as_str(), key)
            .or_else(|| self.catalog.lookup(self.catalog.default_language().as_str(), key))
            .unwrap_or(key);

        substitute(template, args)
    }
}

/// Replace the first occurrence of `%i` with the i-th argument.
///
/// Placeholders without an argument stay as they are, and a placeholder that
/// appears twice only has its first occurrence replaced.
pub fn substitute(template: &str, args: &[Arg<'_>]) -> String {
    let mut text = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        text = text.replacen(&format!("%{}", i + 1), &arg.to_string(), 1);
    }
    text
}
