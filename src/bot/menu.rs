//! Language menus rendered as inline keyboards.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};
use tracing::{debug, warn};

use super::dispatcher::ThrottledBot;
use super::participant::Participant;
use crate::selection::{LanguageMenu, MenuPresenter, MenuResponse, PendingMenus, callback_data};
use crate::utils::html_escape;

/// Sends language menus to Telegram users and waits for their button press.
pub struct TelegramMenus {
    bot: ThrottledBot,
    pending: Arc<PendingMenus>,
    timeout: Duration,
}

impl TelegramMenus {
    pub fn new(bot: ThrottledBot, pending: Arc<PendingMenus>, timeout: Duration) -> Self {
        Self { bot, pending, timeout }
    }
}

/// One button per language, then the back button on its own row.
fn keyboard(token: u64, menu: &LanguageMenu) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = menu
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            vec![InlineKeyboardButton::callback(
                option.label.clone(),
                callback_data(token, Some(i)),
            )]
        })
        .collect();

    rows.push(vec![InlineKeyboardButton::callback(
        menu.back_label.clone(),
        callback_data(token, None),
    )]);

    InlineKeyboardMarkup::new(rows)
}

fn render(menu: &LanguageMenu) -> String {
    format!("<b>{}</b>\n\n{}", html_escape(&menu.title), html_escape(&menu.body))
}

#[async_trait]
impl MenuPresenter for TelegramMenus {
    type Target = Participant;

    async fn present(&self, target: &Participant, menu: &LanguageMenu) -> MenuResponse {
        let (token, rx) = self.pending.open(target.user_id);

        let sent = self
            .bot
            .send_message(target.chat_id, render(menu))
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard(token, menu))
            .await;

        let sent = match sent {
            Ok(sent) => sent,
            Err(e) => {
                warn!("Failed to send language menu to user {}: {}", target.user_id, e);
                self.pending.expire(target.user_id, token);
                return MenuResponse::Dismissed;
            }
        };

        let response = self.pending.wait(target.user_id, token, rx, self.timeout).await;
        debug!("Language menu {} of user {} answered: {:?}", token, target.user_id, response);

        // The menu is single-use
        let _ = self.bot.delete_message(target.chat_id, sent.id).await;

        response
    }

    async fn notify(&self, target: &Participant, text: String) {
        if let Err(e) = self.bot.send_message(target.chat_id, text).await {
            warn!("Failed to notify user {}: {}", target.user_id, e);
        }
    }
}
