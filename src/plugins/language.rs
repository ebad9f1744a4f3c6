//! Language menu plugin.
//!
//! `/lang`, `/language` and `/语言` open the language menu for the sender;
//! button presses on the menu are routed back to the waiting workflow.

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::Me;
use tracing::{debug, info};

use crate::bot::{AppState, ThrottledBot};
use crate::preferences::PreferenceHolder;
use crate::selection::{CALLBACK_PREFIX, SelectionOutcome, parse_callback_data, should_trigger};

/// Messages that are exactly one of the language commands, once armed.
pub fn trigger_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message, state: AppState, me: Me| {
        msg.from.is_some()
            && should_trigger(msg.text(), me.username(), state.language.trigger_armed())
    })
    .endpoint(language_command)
}

/// Callback queries carrying language menu data.
pub fn callback_filter(q: CallbackQuery) -> bool {
    q.data
        .as_deref()
        .map(|d| d.starts_with(CALLBACK_PREFIX))
        .unwrap_or(false)
}

/// Open the language menu for the sender.
pub async fn language_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    // The command itself is not shown to the chat
    let _ = bot.delete_message(msg.chat.id, msg.id).await;

    let participant = state.participant(user.id.0, msg.chat.id);
    if !participant.is_addressable() {
        debug!("Ignoring language command from unreachable user {}", user.id);
        return Ok(());
    }

    // Updates of one chat are handled in order; waiting here would block the
    // callback that answers the menu.
    let selector = state.selector.clone();
    tokio::spawn(async move {
        match selector.run(Some(&participant)).await {
            SelectionOutcome::Committed { language, .. } => {
                info!("User {} switched language to {}", participant.user_id, language);
            }
            SelectionOutcome::Cancelled(reason) => {
                debug!("Language selection of user {} cancelled: {:?}", participant.user_id, reason);
            }
        }
    });

    Ok(())
}

/// Route a menu button press to the workflow waiting for it.
pub async fn language_callback(
    bot: ThrottledBot,
    q: CallbackQuery,
    state: AppState,
) -> anyhow::Result<()> {
    let user_id = q.from.id.0;
    let resolved = q
        .data
        .as_deref()
        .and_then(parse_callback_data)
        .map(|(token, response)| state.pending.resolve(user_id, token, response))
        .unwrap_or(false);

    if resolved {
        bot.answer_callback_query(&q.id).await?;
    } else {
        let participant = state.participant(user_id, ChatId(user_id as i64));
        let text = state
            .language
            .translate(Some(&participant), "system.menu_expired", &[])
            .await;
        bot.answer_callback_query(&q.id).text(text).await?;
    }

    Ok(())
}
