//! Preference store.
//!
//! Reads and writes language preferences in two scopes: one global slot and
//! one slot per holder. Every accessor returns a usable value; storage failures
//! are logged and turned into fallbacks.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::holder::{GlobalScope, PreferenceHolder, StorageError, StorageResult};
use crate::i18n::{Catalog, LanguageId};

/// Key of the per-user preference slot.
pub const PLAYER_LANG_KEY: &str = "player_lang";

/// Key of the global preference slot.
pub const GLOBAL_LANG_KEY: &str = "global_lang";

pub struct PreferenceStore {
    catalog: Arc<Catalog>,
    global: Arc<dyn GlobalScope>,
}

impl PreferenceStore {
    pub fn new(catalog: Arc<Catalog>, global: Arc<dyn GlobalScope>) -> Self {
        Self { catalog, global }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Whether the global slot has ever been written.
    pub async fn has_global(&self) -> StorageResult<bool> {
        Ok(self.global.read(GLOBAL_LANG_KEY).await?.is_some())
    }

    /// Write the global language. Unknown codes store the default language.
    pub async fn set_global(&self, code: &str) -> bool {
        let lang = self.catalog.coerce(code);

        match self.global.write(GLOBAL_LANG_KEY, lang.as_str()).await {
            Ok(()) => {
                debug!("Global language set to {}", lang);
                true
            }
            Err(e) => {
                error!("Failed to write global language {}: {}", lang, e);
                false
            }
        }
    }

    /// Current global language, or the default when unset or unreadable.
    pub async fn get_global(&self) -> LanguageId {
        match self.global.read(GLOBAL_LANG_KEY).await {
            Ok(Some(code)) if !code.is_empty() => self.catalog.coerce(&code),
            Ok(_) => self.catalog.default_language().clone(),
            Err(e) => {
                error!("Failed to read global language: {}", e);
                self.catalog.default_language().clone()
            }
        }
    }

    /// Write a holder's language. Fails for missing or stale holders.
    pub async fn set_entity(&self, entity: Option<&dyn PreferenceHolder>, code: &str) -> bool {
        let Some(entity) = entity.filter(|e| e.is_addressable()) else {
            return false;
        };
        let lang = self.catalog.coerce(code);

        match entity.write_preference(PLAYER_LANG_KEY, lang.as_str()).await {
            Ok(()) => {
                debug!("Language for {} set to {}", entity.label(), lang);
                true
            }
            Err(StorageError::Unsupported) => {
                warn!("{} cannot store a language preference", entity.label());
                false
            }
            Err(e) => {
                error!("Failed to write language for {}: {}", entity.label(), e);
                false
            }
        }
    }

    /// Effective language of a holder.
    ///
    /// Missing, stale or storage-less holders use the global language. A read
    /// failure uses the default language, since the record may be corrupt.
    pub async fn get_entity(&self, entity: Option<&dyn PreferenceHolder>) -> LanguageId {
        let Some(entity) = entity else {
            return self.get_global().await;
        };

        if !entity.is_addressable() {
            debug!("{} is no longer addressable, using global language", entity.label());
            return self.get_global().await;
        }

        match entity.read_preference(PLAYER_LANG_KEY).await {
            Ok(Some(code)) if !code.is_empty() => self.catalog.coerce(&code),
            Ok(_) => self.get_global().await,
            Err(StorageError::Unsupported) => {
                warn!("{} cannot read its own preferences", entity.label());
                self.get_global().await
            }
            Err(e) => {
                error!("Failed to read language for {}: {}", entity.label(), e);
                self.catalog.default_language().clone()
            }
        }
    }
}
