//! Cache module - typed Moka caches.
//!
//! Repositories keep a `TypedCache` in front of MongoDB so that hot reads
//! (the language of whoever is talking to the bot) skip the database.
//!
//! ```rust
//! let cache: TypedCache<u64, String> = TypedCache::new("langs", CacheConfig::preferences());
//! cache.insert(user_id, "en_US".to_string());
//! let lang = cache.get(&user_id);
//! ```

mod config;
mod typed;

pub use config::CacheConfig;
pub use typed::TypedCache;
