//! Owner commands.

use teloxide::prelude::*;
use teloxide::types::ReplyParameters;
use tracing::info;

use crate::bot::{AppState, ThrottledBot};
use crate::selection::SelectionOutcome;

/// Handle /globallang [code].
///
/// With a code, sets the global language directly. Without one, runs the
/// selection workflow with no holder, which picks the first bundled
/// language.
pub async fn globallang_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    code: String,
) -> anyhow::Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let participant = state.participant(user.id.0, msg.chat.id);

    if !state.is_owner(user.id.0) {
        let text = state
            .language
            .translate(Some(&participant), "system.owner_only", &[])
            .await;
        bot.send_message(msg.chat.id, text)
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
        return Ok(());
    }

    let code = code.trim();
    let applied = if code.is_empty() {
        match state.selector.run(None).await {
            SelectionOutcome::Committed { language, .. } => Some(language),
            SelectionOutcome::Cancelled(_) => None,
        }
    } else if state.language.set_global_language(code).await {
        Some(state.language.get_global_language().await)
    } else {
        None
    };

    let text = match applied {
        Some(language) => {
            info!("Owner {} set global language to {}", user.id, language);
            let name = state.language.catalog().display_name(language.as_str());
            state
                .language
                .translate(Some(&participant), "system.global_language_set", &[&name])
                .await
        }
        None => {
            state
                .language
                .translate(Some(&participant), "system.global_language_failed", &[])
                .await
        }
    };

    bot.send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;

    Ok(())
}
