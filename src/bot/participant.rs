//! Telegram user as a preference holder.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::types::ChatId;

use super::presence::PresenceTracker;
use crate::database::{PreferenceRepository, user_scope};
use crate::preferences::{PreferenceHolder, StorageResult};

/// A user talking to the bot in a specific chat.
///
/// Menus and confirmations go to `chat_id`; the preference belongs to the
/// user regardless of chat.
#[derive(Clone)]
pub struct Participant {
    pub user_id: u64,
    pub chat_id: ChatId,
    scope: String,
    preferences: Arc<PreferenceRepository>,
    presence: Arc<PresenceTracker>,
}

impl Participant {
    pub fn new(
        user_id: u64,
        chat_id: ChatId,
        preferences: Arc<PreferenceRepository>,
        presence: Arc<PresenceTracker>,
    ) -> Self {
        Self {
            user_id,
            chat_id,
            scope: user_scope(user_id),
            preferences,
            presence,
        }
    }
}

#[async_trait]
impl PreferenceHolder for Participant {
    fn label(&self) -> String {
        self.scope.clone()
    }

    fn is_addressable(&self) -> bool {
        self.presence.is_reachable(self.user_id)
    }

    async fn read_preference(&self, key: &str) -> StorageResult<Option<String>> {
        self.preferences.load(&self.scope, key).await
    }

    async fn write_preference(&self, key: &str, value: &str) -> StorageResult<()> {
        self.preferences.save(&self.scope, key, value).await
    }
}
