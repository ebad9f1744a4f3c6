//! Storage capabilities behind a language preference.

use async_trait::async_trait;
use thiserror::Error;

/// Failure at a preference storage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The holder has no storage of its own.
    #[error("holder cannot store preferences")]
    Unsupported,

    /// The backing store failed to read or write.
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Anything that can own a per-entity language preference.
///
/// Callers may hold references whose validity changes underneath them (a user
/// blocking the bot, for instance), so `is_addressable` is checked right
/// before every write.
#[async_trait]
pub trait PreferenceHolder: Send + Sync {
    /// Identifier used in log lines.
    fn label(&self) -> String;

    /// Whether the reference is still live.
    fn is_addressable(&self) -> bool;

    async fn read_preference(&self, key: &str) -> StorageResult<Option<String>>;

    async fn write_preference(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// The process-wide preference scope.
#[async_trait]
pub trait GlobalScope: Send + Sync {
    async fn read(&self, key: &str) -> StorageResult<Option<String>>;

    async fn write(&self, key: &str, value: &str) -> StorageResult<()>;
}
