//! Message dispatcher setup.
//!
//! Builds the dispatcher with the language trigger, commands, menu
//! callbacks, and reachability tracking.

use std::sync::Arc;
use std::time::Duration;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{ChatMemberKind, ChatMemberUpdated};

use super::menu::TelegramMenus;
use super::participant::Participant;
use super::presence::PresenceTracker;
use crate::database::PreferenceRepository;
use crate::i18n::LanguageSystem;
use crate::plugins;
use crate::selection::{PendingMenus, SelectionWorkflow};

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Catalog, preference store, and resolver.
    pub language: Arc<LanguageSystem>,

    /// Per-user preference slots.
    pub preferences: Arc<PreferenceRepository>,

    /// Users who blocked the bot.
    pub presence: Arc<PresenceTracker>,

    /// Language menus waiting for a button press.
    pub pending: Arc<PendingMenus>,

    /// Selection workflow wired to Telegram menus.
    pub selector: Arc<SelectionWorkflow<TelegramMenus>>,

    /// Owner user IDs (may change the global language).
    pub owner_ids: Vec<u64>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        bot: ThrottledBot,
        language: Arc<LanguageSystem>,
        preferences: Arc<PreferenceRepository>,
        owner_ids: Vec<u64>,
        menu_timeout: Duration,
    ) -> Self {
        let pending = Arc::new(PendingMenus::new());
        let menus = TelegramMenus::new(bot, pending.clone(), menu_timeout);
        let selector = Arc::new(SelectionWorkflow::new(language.clone(), menus));

        Self {
            language,
            preferences,
            presence: Arc::new(PresenceTracker::new()),
            pending,
            selector,
            owner_ids,
        }
    }

    /// Check if a user is a bot owner.
    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_ids.contains(&user_id)
    }

    /// The preference holder for a user talking in a chat.
    pub fn participant(&self, user_id: u64, chat_id: ChatId) -> Participant {
        Participant::new(
            user_id,
            chat_id,
            self.preferences.clone(),
            self.presence.clone(),
        )
    }
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    state: AppState,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

/// Build the handler schema.
fn schema() -> UpdateHandler<anyhow::Error> {
    // Message handlers: language trigger first, then commands
    let message_handler = Update::filter_message()
        .branch(plugins::language::trigger_handler())
        .branch(plugins::command_handler());

    // Private chat blocked/unblocked by the user
    let presence_handler = Update::filter_my_chat_member().endpoint(track_presence);

    dptree::entry()
        .branch(message_handler)
        .branch(presence_handler)
        .branch(plugins::callback_handler())
        .branch(unhandled())
}

/// Plain chat messages, edits and foreign callbacks end here, so the
/// dispatcher's default handler never logs their content.
fn unhandled() -> UpdateHandler<anyhow::Error> {
    dptree::endpoint(ignore_update)
}

async fn ignore_update() -> anyhow::Result<()> {
    Ok(())
}

/// Track whether the user can still receive messages from the bot.
async fn track_presence(upd: ChatMemberUpdated, state: AppState) -> anyhow::Result<()> {
    if !upd.chat.is_private() {
        return Ok(());
    }

    let user_id = upd.from.id.0;
    match upd.new_chat_member.kind {
        ChatMemberKind::Banned(_) => {
            state.presence.mark_unreachable(user_id);
            // An open menu can no longer be answered
            state.pending.dismiss(user_id);
        }
        _ => {
            state.presence.mark_reachable(user_id);
        }
    }

    Ok(())
}
