//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], a [`BotService`] over an in-memory store and a
//! [`RecordingTransport`] that captures everything the bot sends.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use episort::bot::{BotOptions, BotService, Transport};
use episort_common::{ChatId, Error, FileHandle, MediaKind, Result, UserId};
use episort_db::pool::init_memory_pool;
use episort_db::{FileStore, SqliteFileStore};

/// Something the bot sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(ChatId, String),
    File(ChatId, String, MediaKind),
}

/// Transport double that records sends and fails for selected handles
/// and text prefixes.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    failing: Mutex<HashSet<String>>,
    failing_texts: Mutex<Vec<String>>,
}

impl RecordingTransport {
    pub fn fail_on(&self, handle: &str) {
        self.failing.lock().unwrap().insert(handle.to_string());
    }

    /// Reject every text message starting with `prefix`.
    pub fn fail_text(&self, prefix: &str) {
        self.failing_texts.lock().unwrap().push(prefix.to_string());
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(_, text) => Some(text),
                Sent::File(..) => None,
            })
            .collect()
    }

    pub fn files(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::File(_, handle, _) => Some(handle),
                Sent::Text(..) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()> {
        let rejected = self
            .failing_texts
            .lock()
            .unwrap()
            .iter()
            .any(|prefix| text.starts_with(prefix.as_str()));
        if rejected {
            return Err(Error::transport("Bad Request: can't parse entities"));
        }
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Text(chat, text.to_string()));
        Ok(())
    }

    async fn send_file(&self, chat: ChatId, handle: &FileHandle, kind: MediaKind) -> Result<()> {
        if self.failing.lock().unwrap().contains(handle.as_str()) {
            return Err(Error::transport("Bad Request: wrong file identifier"));
        }
        self.sent
            .lock()
            .unwrap()
            .push(Sent::File(chat, handle.to_string(), kind));
        Ok(())
    }
}

pub struct TestHarness {
    pub bot: Arc<BotService>,
    pub store: Arc<SqliteFileStore>,
    pub transport: Arc<RecordingTransport>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_options(BotOptions::default())
    }

    pub fn with_options(mut options: BotOptions) -> Self {
        // Keep the pacing out of the way of test timing.
        options.delivery.per_second = 1000;

        let store = Arc::new(SqliteFileStore::new(
            init_memory_pool().expect("failed to create in-memory pool"),
        ));
        let transport = Arc::new(RecordingTransport::default());
        let bot = Arc::new(BotService::new(store.clone(), transport.clone(), options));

        Self {
            bot,
            store,
            transport,
        }
    }

    /// Upload `name` as `owner`, in the owner's private chat.
    pub async fn upload(&self, owner: i64, handle: &str, name: &str) {
        self.bot
            .on_upload(
                ChatId::from(owner),
                UserId::from(owner),
                FileHandle::from(handle),
                name.to_string(),
                MediaKind::Document,
            )
            .await
            .expect("upload failed");
    }

    pub fn stored(&self, owner: i64) -> usize {
        self.store.get_all(UserId::from(owner)).unwrap().len()
    }
}
