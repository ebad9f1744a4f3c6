//! Polyglot - per-user language preferences for a Telegram bot.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `i18n` - Bundled catalogs, translation resolver, language system
//! - `preferences` - Global and per-user preference slots
//! - `selection` - Language menu workflow and its chat trigger
//! - `database` - MongoDB integration
//! - `cache` - Moka caches in front of MongoDB
//! - `bot` - Telegram adapters (with Throttle for API rate limiting)
//! - `plugins` - Command handlers
//! - `bootstrap` - Startup modules with failure isolation
//! - `utils` - Utility functions

mod bootstrap;
mod bot;
mod cache;
mod config;
mod database;
mod i18n;
mod plugins;
mod preferences;
mod selection;
mod utils;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bootstrap::{Host, host_modules, load_modules};
use bot::AppState;
use config::Config;
use database::{Database, PreferenceRepository};
use i18n::{Catalog, LanguageSystem};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("polyglot=info,teloxide=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Polyglot bot...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    let catalog = Arc::new(Catalog::bundled(&config.default_lang)?);
    info!(
        "Loaded {} languages, default {}",
        catalog.len(),
        catalog.default_language()
    );

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let db = Database::connect(&config.mongodb_uri, &config.mongodb_database).await?;
    info!("Database connected");

    let preferences = Arc::new(PreferenceRepository::new(&db));
    if let Err(e) = preferences.ensure_indexes().await {
        warn!("Failed to create preference indexes: {}", e);
    }

    let language = Arc::new(LanguageSystem::new(catalog, preferences.clone()));

    // Throttle respects Telegram's rate limits:
    // - 30 messages per second globally
    // - 1 message per second to the same chat
    // - 20 messages per minute to the same group
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    if config.owner_ids.is_empty() {
        info!("No owner IDs configured (OWNER_IDS is empty)");
    } else {
        info!("Bot owners: {:?}", config.owner_ids);
    }

    let state = AppState::new(
        bot.clone(),
        language,
        preferences,
        config.owner_ids.clone(),
        config.lang_menu_timeout,
    );

    let host = Host {
        bot: bot.clone(),
        state: state.clone(),
    };
    let modules = host_modules();
    let failures = load_modules(host, &modules).await;

    info!("==============================");
    info!(" Polyglot");
    info!(" Modules: {}/{} loaded", modules.len() - failures.len(), modules.len());
    for failure in &failures {
        warn!(" {}", failure);
    }
    info!(" Global language: {}", state.language.get_global_language().await);
    info!(" Menu timeout: {}s", config.lang_menu_timeout.as_secs());
    info!("==============================");

    let dispatcher = bot::build_dispatcher(bot, state);
    bot::run(dispatcher).await;

    Ok(())
}
