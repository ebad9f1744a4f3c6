//! Reachability of users.
//!
//! A user who blocks the bot can no longer receive menus or confirmations.
//! Telegram tells us through `my_chat_member` updates in the private chat.

use dashmap::DashSet;
use tracing::info;

/// Users the bot cannot reach.
#[derive(Debug, Default)]
pub struct PresenceTracker {
    unreachable: DashSet<u64>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_reachable(&self, user_id: u64) -> bool {
        !self.unreachable.contains(&user_id)
    }

    /// Returns `true` if the user was reachable until now.
    pub fn mark_unreachable(&self, user_id: u64) -> bool {
        let newly = self.unreachable.insert(user_id);
        if newly {
            info!("User {} blocked the bot", user_id);
        }
        newly
    }

    /// Returns `true` if the user was unreachable until now.
    pub fn mark_reachable(&self, user_id: u64) -> bool {
        let restored = self.unreachable.remove(&user_id).is_some();
        if restored {
            info!("User {} unblocked the bot", user_id);
        }
        restored
    }
}
