//! Menus waiting for a button press.
//!
//! Each user has at most one open menu. Opening a new one, dismissing, or
//! timing out drops the old sender, so every waiter wakes up exactly once.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::oneshot;
use tracing::debug;

use super::workflow::MenuResponse;

/// Prefix of callback data owned by the language menu.
pub const CALLBACK_PREFIX: &str = "lang:";

struct Waiting {
    token: u64,
    reply: oneshot::Sender<MenuResponse>,
}

#[derive(Default)]
pub struct PendingMenus {
    next_token: AtomicU64,
    waiting: DashMap<u64, Waiting>,
}

impl PendingMenus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a menu for `user_id`, dismissing any menu already open.
    pub fn open(&self, user_id: u64) -> (u64, oneshot::Receiver<MenuResponse>) {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed) + 1;
        let (reply, rx) = oneshot::channel();

        if self.waiting.insert(user_id, Waiting { token, reply }).is_some() {
            debug!("Replaced open language menu of user {}", user_id);
        }
        (token, rx)
    }

    /// Deliver a button press. Returns `false` when no menu with `token` is open.
    pub fn resolve(&self, user_id: u64, token: u64, response: MenuResponse) -> bool {
        match self.waiting.remove_if(&user_id, |_, w| w.token == token) {
            Some((_, waiting)) => waiting.reply.send(response).is_ok(),
            None => false,
        }
    }

    /// Close whatever menu `user_id` has open.
    pub fn dismiss(&self, user_id: u64) -> bool {
        self.waiting.remove(&user_id).is_some()
    }

    /// Close the menu only if `token` is still the open one.
    pub fn expire(&self, user_id: u64, token: u64) {
        self.waiting.remove_if(&user_id, |_, w| w.token == token);
    }

    /// Wait for the menu to be answered, dismissed, or to time out.
    pub async fn wait(
        &self,
        user_id: u64,
        token: u64,
        rx: oneshot::Receiver<MenuResponse>,
        timeout: Duration,
    ) -> MenuResponse {
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(response)) => response,
            Ok(Err(_)) => MenuResponse::Dismissed,
            Err(_) => {
                debug!("Language menu {} of user {} timed out", token, user_id);
                self.expire(user_id, token);
                MenuResponse::Dismissed
            }
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.waiting.len()
    }
}

/// Callback data for a menu button: an option index, or `None` for back.
pub fn callback_data(token: u64, choice: Option<usize>) -> String {
    match choice {
        Some(index) => format!("{CALLBACK_PREFIX}{token}:{index}"),
        None => format!("{CALLBACK_PREFIX}{token}:back"),
    }
}

/// Parse data produced by [`callback_data`].
pub fn parse_callback_data(data: &str) -> Option<(u64, MenuResponse)> {
    let (token, choice) = data.strip_prefix(CALLBACK_PREFIX)?.split_once(':')?;
    let token = token.parse().ok()?;
    let response = match choice {
        "back" => MenuResponse::Back,
        index => MenuResponse::Selected(index.parse().ok()?),
    };
    Some((token, response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_wakes_waiter() {
        let menus = PendingMenus::new();
        let (token, rx) = menus.open(1);

        assert!(menus.resolve(1, token, MenuResponse::Selected(1)));
        let response = menus.wait(1, token, rx, Duration::from_secs(5)).await;
        assert_eq!(response, MenuResponse::Selected(1));
        assert_eq!(menus.len(), 0);
    }

    #[tokio::test]
    async fn test_wrong_user_or_token_is_ignored() {
        let menus = PendingMenus::new();
        let (token, _rx) = menus.open(1);

        assert!(!menus.resolve(2, token, MenuResponse::Back));
        assert!(!menus.resolve(1, token + 100, MenuResponse::Back));
        assert_eq!(menus.len(), 1);
    }

    #[tokio::test]
    async fn test_new_menu_dismisses_old_one() {
        let menus = PendingMenus::new();
        let (old_token, old_rx) = menus.open(1);
        let (new_token, _new_rx) = menus.open(1);

        assert_ne!(old_token, new_token);
        let response = menus.wait(1, old_token, old_rx, Duration::from_secs(5)).await;
        assert_eq!(response, MenuResponse::Dismissed);
        assert!(!menus.resolve(1, old_token, MenuResponse::Selected(0)));
        assert_eq!(menus.len(), 1);
    }

    #[tokio::test]
    async fn test_dismiss_cancels_waiter() {
        let menus = PendingMenus::new();
        let (token, rx) = menus.open(5);

        assert!(menus.dismiss(5));
        assert!(!menus.dismiss(5));
        let response = menus.wait(5, token, rx, Duration::from_secs(5)).await;
        assert_eq!(response, MenuResponse::Dismissed);
    }

    #[tokio::test]
    async fn test_timeout_dismisses_and_cleans_up() {
        let menus = PendingMenus::new();
        let (token, rx) = menus.open(9);

        let response = menus.wait(9, token, rx, Duration::from_millis(10)).await;
        assert_eq!(response, MenuResponse::Dismissed);
        assert_eq!(menus.len(), 0);
    }

    #[test]
    fn test_callback_data_format() {
        assert_eq!(callback_data(7, Some(1)), "lang:7:1");
        assert_eq!(callback_data(7, None), "lang:7:back");

        assert_eq!(parse_callback_data("lang:7:1"), Some((7, MenuResponse::Selected(1))));
        assert_eq!(parse_callback_data("lang:7:back"), Some((7, MenuResponse::Back)));
        assert_eq!(parse_callback_data("lang:x:1"), None);
        assert_eq!(parse_callback_data("lang:7:"), None);
        assert_eq!(parse_callback_data("help:main"), None);
    }
}
