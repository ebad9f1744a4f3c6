//! Startup modules.
//!
//! Each module is a named async initializer. A failing or panicking module
//! is reported and skipped; the others still load.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use futures::future::BoxFuture;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;
use thiserror::Error;
use tracing::{error, info};

use crate::bot::{AppState, ThrottledBot};
use crate::plugins::Command;

/// A named startup step run against a shared context.
pub struct Module<C> {
    pub name: &'static str,
    pub init: fn(C) -> BoxFuture<'static, anyhow::Result<()>>,
}

#[derive(Debug, Error)]
#[error("module `{name}` failed to initialize: {source:#}")]
pub struct ModuleInitError {
    pub name: &'static str,
    #[source]
    pub source: anyhow::Error,
}

/// Run every module in order and collect the failures.
pub async fn load_modules<C: Clone>(ctx: C, modules: &[Module<C>]) -> Vec<ModuleInitError> {
    let mut failures = Vec::new();

    for module in modules {
        let result = AssertUnwindSafe((module.init)(ctx.clone()))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(anyhow::anyhow!("initializer panicked")));

        match result {
            Ok(()) => info!("[bootstrap] Module `{}` loaded", module.name),
            Err(source) => {
                error!("[bootstrap] Module `{}` failed: {:#}", module.name, source);
                failures.push(ModuleInitError {
                    name: module.name,
                    source,
                });
            }
        }
    }

    failures
}

/// Context handed to the bot's startup modules.
#[derive(Clone)]
pub struct Host {
    pub bot: ThrottledBot,
    pub state: AppState,
}

/// Modules loaded at startup, in order.
pub fn host_modules() -> Vec<Module<Host>> {
    vec![
        Module {
            name: "language",
            init: |host| {
                async move {
                    host.state.language.initialize().await;
                    Ok(())
                }
                .boxed()
            },
        },
        Module {
            name: "commands",
            init: |host| async move { publish_commands(&host).await }.boxed(),
        },
    ]
}

/// Publish the command list shown by Telegram clients.
async fn publish_commands(host: &Host) -> anyhow::Result<()> {
    let language = &host.state.language;
    let lang_description = language.text(
        language.catalog().default_language(),
        "system.language_title",
        &[],
    );

    let mut commands = Command::bot_commands();
    commands.push(BotCommand::new("lang", lang_description));

    host.bot.set_my_commands(commands).await?;
    Ok(())
}
