//! Language system facade.
//!
//! The only entry points other modules use. None of them fail: storage
//! problems are logged and resolved to fallback values.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info};

use super::catalog::{Catalog, LanguageId};
use super::resolver::{Arg, Translator};
use crate::preferences::{GlobalScope, PreferenceHolder, PreferenceStore};
use crate::selection::LANGUAGE_COMMANDS;

pub struct LanguageSystem {
    catalog: Arc<Catalog>,
    store: Arc<PreferenceStore>,
    translator: Translator,
    trigger_armed: AtomicBool,
}

impl LanguageSystem {
    pub fn new(catalog: Arc<Catalog>, global: Arc<dyn GlobalScope>) -> Self {
        let store = Arc::new(PreferenceStore::new(catalog.clone(), global));
        Self {
            catalog,
            translator: Translator::new(store.clone()),
            store,
            trigger_armed: AtomicBool::new(false),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Make sure the global language exists and arm the chat trigger.
    ///
    /// Safe to call more than once.
    pub async fn initialize(&self) {
        info!("[language] initializing");

        match self.store.has_global().await {
            Ok(true) => {}
            Ok(false) => {
                let default = self.catalog.default_language();
                if self.store.set_global(default.as_str()).await {
                    info!("[language] global language set to {}", default);
                }
            }
            Err(e) => error!("[language] failed to check global language: {}", e),
        }

        self.trigger_armed.store(true, Ordering::Release);
        info!("[language] commands registered: {}", LANGUAGE_COMMANDS.join(", "));
        info!(
            "[language] ready with {} catalogs, default {}",
            self.catalog.len(),
            self.catalog.default_language()
        );
    }

    /// Whether chat commands should start the language menu.
    pub fn trigger_armed(&self) -> bool {
        self.trigger_armed.load(Ordering::Acquire)
    }

    pub async fn translate(
        &self,
        entity: Option<&dyn PreferenceHolder>,
        key: &str,
        args: &[Arg<'_>],
    ) -> String {
        self.translator.translate(entity, key, args).await
    }

    pub fn text(&self, lang: &LanguageId, key: &str, args: &[Arg<'_>]) -> String {
        self.translator.text(lang, key, args)
    }

    pub async fn get_player_language(&self, entity: Option<&dyn PreferenceHolder>) -> LanguageId {
        self.store.get_entity(entity).await
    }

    pub async fn set_player_language(&self, entity: Option<&dyn PreferenceHolder>, code: &str) -> bool {
        self.store.set_entity(entity, code).await
    }

    pub async fn get_global_language(&self) -> LanguageId {
        self.store.get_global().await
    }

    pub async fn set_global_language(&self, code: &str) -> bool {
        self.store.set_global(code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::GLOBAL_LANG_KEY;
    use crate::test_utils::{MemoryHolder, MemoryScope, language_system};

    #[tokio::test]
    async fn test_end_to_end_fresh_system() {
        let global = Arc::new(MemoryScope::new());
        let system = language_system(&global);
        assert!(!system.trigger_armed());

        system.initialize().await;
        assert!(system.trigger_armed());
        assert_eq!(system.get_global_language().await, "zh_CN");
        assert_eq!(global.value(GLOBAL_LANG_KEY).as_deref(), Some("zh_CN"));

        let player = MemoryHolder::new("user:42");
        assert!(system.set_player_language(Some(&player), "en_US").await);
        assert_eq!(system.translate(Some(&player), "system.back", &[]).await, "Back");
        assert_eq!(system.translate(None, "system.back", &[]).await, "返回");
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_global() {
        let global = Arc::new(MemoryScope::new());
        global.put(GLOBAL_LANG_KEY, "en_US");
        let system = language_system(&global);

        system.initialize().await;
        system.initialize().await;
        assert_eq!(system.get_global_language().await, "en_US");
    }

    #[tokio::test]
    async fn test_initialize_survives_storage_failure() {
        let global = Arc::new(MemoryScope::new());
        global.fail_reads(true);
        global.fail_writes(true);
        let system = language_system(&global);

        system.initialize().await;
        assert!(system.trigger_armed());
        assert_eq!(system.get_global_language().await, "zh_CN");
    }

    #[tokio::test]
    async fn test_global_language_coerces_unknown_code() {
        let global = Arc::new(MemoryScope::new());
        let system = language_system(&global);

        assert!(system.set_global_language("en_US").await);
        assert!(system.set_global_language("de_DE").await);
        assert_eq!(system.get_global_language().await, "zh_CN");
    }

    #[tokio::test]
    async fn test_player_language_on_invalid_holder() {
        let global = Arc::new(MemoryScope::new());
        let system = language_system(&global);
        let gone = MemoryHolder::new("user:7");
        gone.invalidate();

        assert!(!system.set_player_language(Some(&gone), "en_US").await);
        assert_eq!(system.get_player_language(Some(&gone)).await, "zh_CN");
        assert_eq!(system.translate(Some(&gone), "system.back", &[]).await, "返回");
    }
}
