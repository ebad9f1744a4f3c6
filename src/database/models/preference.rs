//! Stored preference slot.
//!
//! One document per `(scope, key)`. The value is an opaque string; readers
//! validate it against the catalogs.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Scope name of the process-wide slot.
pub const GLOBAL_SCOPE: &str = "global";

/// Scope name of a user's slot.
pub fn user_scope(user_id: u64) -> String {
    format!("user:{}", user_id)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPreference {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// `global` or `user:<id>` (indexed with `key`)
    pub scope: String,

    pub key: String,

    pub value: String,

    /// Unix timestamp of the last write.
    #[serde(default)]
    pub updated_at: i64,
}

impl StoredPreference {
    pub fn new(scope: &str, key: &str, value: &str) -> Self {
        Self {
            id: None,
            scope: scope.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            updated_at: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_scope_format() {
        assert_eq!(user_scope(42), "user:42");
    }

    #[test]
    fn test_document_shape() {
        let doc = mongodb::bson::to_document(&StoredPreference::new(GLOBAL_SCOPE, "global_lang", "zh_CN"))
            .unwrap();

        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("scope").unwrap(), "global");
        assert_eq!(doc.get_str("key").unwrap(), "global_lang");
        assert_eq!(doc.get_str("value").unwrap(), "zh_CN");
        assert!(doc.get_i64("updated_at").unwrap() > 0);
    }
}
