//! In-memory doubles shared by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::i18n::{Catalog, LanguageSystem};
use crate::preferences::{GlobalScope, PreferenceHolder, StorageError, StorageResult};
use crate::selection::{LanguageMenu, MenuPresenter, MenuResponse};

pub fn bundled_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::bundled("zh_CN").unwrap())
}

pub fn language_system(global: &Arc<MemoryScope>) -> Arc<LanguageSystem> {
    Arc::new(LanguageSystem::new(bundled_catalog(), global.clone()))
}

/// Key-value slots with switchable failures.
#[derive(Default)]
struct Slots {
    values: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl Slots {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("read refused".into()));
        }
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("write refused".into()));
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryScope {
    slots: Slots,
}

impl MemoryScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.slots
            .values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.slots.values.lock().unwrap().get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.slots.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.slots.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl GlobalScope for MemoryScope {
    async fn read(&self, key: &str) -> StorageResult<Option<String>> {
        self.slots.read(key)
    }

    async fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots.write(key, value)
    }
}

pub struct MemoryHolder {
    label: String,
    has_storage: bool,
    valid: AtomicBool,
    slots: Slots,
}

impl MemoryHolder {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            has_storage: true,
            valid: AtomicBool::new(true),
            slots: Slots::default(),
        }
    }

    /// A holder that is live but has no storage capability.
    pub fn without_storage(label: &str) -> Self {
        Self {
            has_storage: false,
            ..Self::new(label)
        }
    }

    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::SeqCst);
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.slots.values.lock().unwrap().get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.slots.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.slots.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PreferenceHolder for MemoryHolder {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn is_addressable(&self) -> bool {
        self.valid.load(Ordering::SeqCst)
    }

    async fn read_preference(&self, key: &str) -> StorageResult<Option<String>> {
        if !self.has_storage {
            return Err(StorageError::Unsupported);
        }
        self.slots.read(key)
    }

    async fn write_preference(&self, key: &str, value: &str) -> StorageResult<()> {
        if !self.has_storage {
            return Err(StorageError::Unsupported);
        }
        self.slots.write(key, value)
    }
}

/// Presenter that answers menus from a script and records what it showed.
#[derive(Default)]
pub struct ScriptedPresenter {
    responses: Mutex<VecDeque<MenuResponse>>,
    invalidate_while_waiting: AtomicBool,
    pub menus: Mutex<Vec<LanguageMenu>>,
    pub notices: Mutex<Vec<String>>,
}

impl ScriptedPresenter {
    pub fn answering(responses: &[MenuResponse]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().copied().collect()),
            ..Self::default()
        }
    }

    /// Invalidate the holder while its menu is open.
    pub fn invalidate_while_waiting(self) -> Self {
        self.invalidate_while_waiting.store(true, Ordering::SeqCst);
        self
    }

    pub fn menu_count(&self) -> usize {
        self.menus.lock().unwrap().len()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait]
impl MenuPresenter for ScriptedPresenter {
    type Target = MemoryHolder;

    async fn present(&self, target: &MemoryHolder, menu: &LanguageMenu) -> MenuResponse {
        self.menus.lock().unwrap().push(menu.clone());
        if self.invalidate_while_waiting.load(Ordering::SeqCst) {
            target.invalidate();
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MenuResponse::Dismissed)
    }

    async fn notify(&self, _target: &MemoryHolder, text: String) {
        self.notices.lock().unwrap().push(text);
    }
}
