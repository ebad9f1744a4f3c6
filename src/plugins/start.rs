//! /start command plugin.

use teloxide::prelude::*;

use crate::bot::{AppState, ThrottledBot};

/// Greet the user in their language.
pub async fn start_handler(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let participant = state.participant(user.id.0, msg.chat.id);
    let text = state
        .language
        .translate(Some(&participant), "system.welcome", &[&user.first_name])
        .await;

    bot.send_message(msg.chat.id, text).await?;

    Ok(())
}
