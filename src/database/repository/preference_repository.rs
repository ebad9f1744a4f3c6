//! Preference repository with write-through caching.
//!
//! Backs both preference scopes: the global slot and one slot per user.
//! Misses are cached too, so users without a preference cost one query per
//! cache lifetime.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{IndexOptions, ReplaceOptions};
use mongodb::{Collection, IndexModel};
use tracing::debug;

use crate::cache::{CacheConfig, TypedCache};
use crate::database::Database;
use crate::database::models::{GLOBAL_SCOPE, StoredPreference};
use crate::preferences::{GlobalScope, StorageError, StorageResult};

impl From<mongodb::error::Error> for StorageError {
    fn from(e: mongodb::error::Error) -> Self {
        StorageError::Backend(e.to_string())
    }
}

type SlotKey = (String, String); // (scope, key)

/// Repository for preference slots.
pub struct PreferenceRepository {
    collection: Collection<StoredPreference>,
    cache: TypedCache<SlotKey, Option<String>>,
}

impl PreferenceRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("preferences"),
            cache: TypedCache::new("preferences", CacheConfig::preferences()),
        }
    }

    /// Create the unique `(scope, key)` index.
    pub async fn ensure_indexes(&self) -> StorageResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "scope": 1, "key": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }

    /// Read a slot. `None` when it was never written.
    pub async fn load(&self, scope: &str, key: &str) -> StorageResult<Option<String>> {
        let slot = (scope.to_string(), key.to_string());
        if let Some(value) = self.cache.get(&slot) {
            return Ok(value);
        }

        let filter = doc! { "scope": scope, "key": key };
        let value = self.collection.find_one(filter).await?.map(|p| p.value);
        debug!("DB get preference {}/{}: {:?}", scope, key, value);

        self.cache.insert(slot, value.clone());
        Ok(value)
    }

    /// Replace a slot's value (upsert).
    pub async fn save(&self, scope: &str, key: &str, value: &str) -> StorageResult<()> {
        let filter = doc! { "scope": scope, "key": key };
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(filter, &StoredPreference::new(scope, key, value))
            .with_options(options)
            .await?;

        self.cache
            .insert((scope.to_string(), key.to_string()), Some(value.to_string()));
        debug!(
            "Saved preference {}/{} = {} ({} cached)",
            scope,
            key,
            value,
            self.cache.entry_count()
        );
        Ok(())
    }
}

#[async_trait]
impl GlobalScope for PreferenceRepository {
    async fn read(&self, key: &str) -> StorageResult<Option<String>> {
        self.load(GLOBAL_SCOPE, key).await
    }

    async fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.save(GLOBAL_SCOPE, key, value).await
    }
}
