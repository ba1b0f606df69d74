//! Minimal Telegram Bot API client.
//!
//! Every method is a JSON POST to `{api_url}/bot{token}/{method}`. Requests
//! the API throttles (HTTP 429) are retried after the `retry_after` the API
//! names, at most [`MAX_RETRIES`] times.

use anyhow::{Context, Result};
use async_trait::async_trait;
use episort_common::{ChatId, Error, FileHandle, MediaKind};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::{ApiResponse, BotUser, GetUpdates, SendMessage, Update};
use crate::bot::Transport;
use crate::config::TelegramConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RETRIES: u32 = 3;

/// Extra time a long poll may take beyond its server-side timeout.
const POLL_GRACE: Duration = Duration::from_secs(10);

pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig, token: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client: {}", e.without_url());
                Client::new()
            });

        Self {
            client,
            base_url: format!("{}/bot{}", config.api_url.trim_end_matches('/'), token),
        }
    }

    /// Identify the bot behind the token.
    pub async fn get_me(&self) -> Result<BotUser> {
        self.call("getMe", &serde_json::json!({}), REQUEST_TIMEOUT)
            .await
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let body = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: &["message"],
        };
        self.call(
            "getUpdates",
            &body,
            Duration::from_secs(timeout_secs) + POLL_GRACE,
        )
        .await
    }

    /// Send a Markdown text message.
    pub async fn send_message(&self, chat: ChatId, text: &str) -> Result<()> {
        let body = SendMessage {
            chat_id: chat.get(),
            text,
            parse_mode: "Markdown",
        };
        self.call::<_, serde_json::Value>("sendMessage", &body, REQUEST_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Send a stored file again through the endpoint matching its kind.
    pub async fn send_media(&self, chat: ChatId, handle: &FileHandle, kind: MediaKind) -> Result<()> {
        let (method, field) = match kind {
            MediaKind::Document => ("sendDocument", "document"),
            MediaKind::Video => ("sendVideo", "video"),
            MediaKind::Audio => ("sendAudio", "audio"),
        };

        let mut body = serde_json::Map::new();
        body.insert("chat_id".to_string(), chat.get().into());
        body.insert(field.to_string(), handle.as_str().into());

        self.call::<_, serde_json::Value>(method, &body, REQUEST_TIMEOUT)
            .await?;
        Ok(())
    }

    async fn call<B, T>(&self, method: &str, body: &B, timeout: Duration) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // The URL carries the token, so it is stripped from every error.
        let url = format!("{}/{}", self.base_url, method);
        let mut retries = 0u32;

        loop {
            let response = self
                .client
                .post(&url)
                .timeout(timeout)
                .json(body)
                .send()
                .await
                .map_err(|e| anyhow::anyhow!("Telegram {method} request failed: {}", e.without_url()))?;

            let status = response.status();
            let api: ApiResponse<T> = response.json().await.map_err(|e| {
                anyhow::anyhow!(
                    "Telegram {method} returned an unreadable response ({status}): {}",
                    e.without_url()
                )
            })?;

            if api.ok {
                return api
                    .result
                    .with_context(|| format!("Telegram {method} returned no result"));
            }

            if status == StatusCode::TOO_MANY_REQUESTS && retries < MAX_RETRIES {
                retries += 1;
                let wait = api
                    .parameters
                    .and_then(|p| p.retry_after)
                    .unwrap_or(1);
                warn!(
                    method,
                    retry = retries,
                    wait_secs = wait,
                    "Telegram returned 429, backing off"
                );
                tokio::time::sleep(Duration::from_secs(wait)).await;
                continue;
            }

            let code = api.error_code.unwrap_or_else(|| status.as_u16());
            debug!(method, code, "Telegram request rejected");
            anyhow::bail!(
                "Telegram {method} failed ({code}): {}",
                api.description.unwrap_or_else(|| "no description".to_string())
            );
        }
    }
}

#[async_trait]
impl Transport for TelegramClient {
    async fn send_text(&self, chat: ChatId, text: &str) -> episort_common::Result<()> {
        self.send_message(chat, text)
            .await
            .map_err(|e| Error::transport(format!("{e:#}")))
    }

    async fn send_file(
        &self,
        chat: ChatId,
        handle: &FileHandle,
        kind: MediaKind,
    ) -> episort_common::Result<()> {
        self.send_media(chat, handle, kind)
            .await
            .map_err(|e| Error::transport(format!("{e:#}")))
    }
}
