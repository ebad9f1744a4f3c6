//! Configuration module.
//!
//! Loads configuration from environment variables (and `.env`).

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,

    /// Owner user IDs (comma-separated).
    /// Owners may change the global language.
    pub owner_ids: Vec<u64>,

    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_database: String,

    // Language
    /// Language used when nobody chose one. Must have a bundled catalog.
    pub default_lang: String,

    /// How long a language menu waits for a button press.
    pub lang_menu_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns error if a required variable is missing or malformed.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lang_menu_timeout = match var("LANG_MENU_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("LANG_MENU_TIMEOUT_SECS is not a number: {raw}"))?,
            None => 120,
        };

        Ok(Self {
            bot_token: var("BOT_TOKEN").context("BOT_TOKEN must be set")?,
            owner_ids: parse_owner_ids(&var("OWNER_IDS").unwrap_or_default()),
            mongodb_uri: var("MONGODB_URI").context("MONGODB_URI must be set")?,
            mongodb_database: var("MONGODB_DATABASE").unwrap_or_else(|| "polyglot".to_string()),
            default_lang: var("DEFAULT_LANG")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "zh_CN".to_string()),
            lang_menu_timeout: Duration::from_secs(lang_menu_timeout),
        })
    }
}

/// Parse a comma-separated list of user IDs, skipping anything invalid.
fn parse_owner_ids(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|s| s.trim().parse::<u64>().ok())
        .collect()
}
