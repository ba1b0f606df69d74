//! Telegram long-polling front end.
//!
//! Updates are fetched with `getUpdates` and each one is handled on its own
//! task; the [`BotService`] serializes work per owner.

mod client;
pub mod types;

pub use client::TelegramClient;

use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::bot::BotService;
use crate::config::TelegramConfig;
use types::{Command, Message, Update};

/// Poll until `shutdown` completes.
///
/// Failed polls are logged and retried after `error_backoff_secs`.
pub async fn run_polling<F>(
    client: Arc<TelegramClient>,
    bot: Arc<BotService>,
    config: &TelegramConfig,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let me = client.get_me().await?;
    let username: Option<Arc<str>> = me.username.as_deref().map(Arc::from);
    tracing::info!(
        id = me.id,
        username = username.as_deref().unwrap_or("-"),
        "Connected to Telegram"
    );

    let backoff = Duration::from_secs(config.error_backoff_secs);
    let mut offset: Option<i64> = None;
    tokio::pin!(shutdown);

    loop {
        let updates = tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested, stopping polling");
                return Ok(());
            }
            updates = client.get_updates(offset, config.poll_timeout_secs) => updates,
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!("Polling failed: {:#}", e);
                tokio::time::sleep(backoff).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);

            let bot = bot.clone();
            let username = username.clone();
            tokio::spawn(async move {
                handle_update(&bot, update, username.as_deref()).await;
            });
        }
    }
}

/// Dispatch one update to the bot service.
pub async fn handle_update(bot: &BotService, update: Update, bot_username: Option<&str>) {
    let Some(message) = update.message else {
        return;
    };

    if let Err(e) = handle_message(bot, &message, bot_username).await {
        tracing::error!(
            update_id = update.update_id,
            chat = message.chat.id,
            "Failed to handle message: {:#}",
            e
        );
    }
}

async fn handle_message(bot: &BotService, message: &Message, bot_username: Option<&str>) -> Result<()> {
    let chat = message.chat_id();

    if let Some(upload) = message.upload() {
        let Some(owner) = message.owner() else {
            tracing::debug!(chat = %chat, "Ignoring upload without a sender");
            return Ok(());
        };
        bot.on_upload(chat, owner, upload.handle, upload.name, upload.kind)
            .await?;
        return Ok(());
    }

    match message.command(bot_username) {
        Some(Command::Start) => bot.on_start(chat).await?,
        Some(Command::Sort) => {
            let Some(owner) = message.owner() else {
                return Ok(());
            };
            let outcome = bot.on_sort_request(chat, owner).await?;
            tracing::debug!(owner = %owner, ?outcome, "Sort request handled");
        }
        Some(Command::Unknown(name)) => {
            tracing::debug!(chat = %chat, command = %name, "Unknown command");
            bot.on_unknown_command(chat).await?;
        }
        None => {}
    }

    Ok(())
}
