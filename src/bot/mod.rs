//! The bot service the transport drives.
//!
//! Uploads are stored; a sort request reads the owner's uploads, orders them,
//! sends the report, re-delivers every file and then clears the owner's
//! records. All steps for one owner run under that owner's lock, in that
//! order.

mod delivery;
mod locks;
pub mod messages;

pub use delivery::{
    deliver_all, delivery_limiter, DeliveryFailure, DeliveryLimiter, DeliveryReport,
};
pub use locks::OwnerLocks;

use async_trait::async_trait;
use episort_common::{ChatId, FileHandle, FileRecord, MediaKind, Result, UserId};
use episort_db::FileStore;
use std::sync::Arc;

use crate::config::{DeliveryConfig, ReportConfig};
use crate::render;
use crate::sorter;

/// Outgoing side of the chat platform.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a Markdown text message.
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()>;

    /// Deliver a previously uploaded file again.
    async fn send_file(&self, chat: ChatId, handle: &FileHandle, kind: MediaKind) -> Result<()>;
}

/// Result of a sort request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOutcome {
    /// The owner had no stored files.
    NothingToSort,
    Sorted {
        files: usize,
        missing_seasons: usize,
        delivery: DeliveryReport,
        /// Whether the owner's records were removed afterwards.
        cleared: bool,
    },
}

/// Tunables of the service, taken from the config file.
#[derive(Debug, Clone, Default)]
pub struct BotOptions {
    pub delivery: DeliveryConfig,
    pub report: ReportConfig,
}

pub struct BotService {
    store: Arc<dyn FileStore>,
    transport: Arc<dyn Transport>,
    options: BotOptions,
    locks: OwnerLocks,
    limiter: DeliveryLimiter,
}

impl BotService {
    pub fn new(store: Arc<dyn FileStore>, transport: Arc<dyn Transport>, options: BotOptions) -> Self {
        let limiter = delivery_limiter(options.delivery.per_second);
        Self {
            store,
            transport,
            options,
            locks: OwnerLocks::new(),
            limiter,
        }
    }

    /// Reply to `/start`.
    pub async fn on_start(&self, chat: ChatId) -> Result<()> {
        self.transport.send_text(chat, messages::HELP).await
    }

    /// Reply to a command the bot does not know.
    pub async fn on_unknown_command(&self, chat: ChatId) -> Result<()> {
        self.transport.send_text(chat, messages::UNKNOWN_COMMAND).await
    }

    /// Persist an upload. No sorting happens here.
    pub async fn on_upload(
        &self,
        chat: ChatId,
        owner: UserId,
        handle: FileHandle,
        name: String,
        kind: MediaKind,
    ) -> Result<()> {
        let record = FileRecord::new(owner, handle, name, kind);
        {
            let _guard = self.locks.lock(owner).await;
            self.store.put(&record)?;
        }

        tracing::info!(owner = %owner, name = %record.name, kind = %kind, "Upload stored");
        self.transport.send_text(chat, messages::STORED).await
    }

    /// Sort, report, re-deliver and clear one owner's uploads.
    ///
    /// A store or report failure aborts before anything is deleted. Failed
    /// file deliveries do not stop the others; whether the owner's records
    /// are then cleared follows `delivery.clear_on_failure`.
    pub async fn on_sort_request(&self, chat: ChatId, owner: UserId) -> Result<SortOutcome> {
        let _guard = self.locks.lock(owner).await;

        let records = self.store.get_all(owner)?;
        if records.is_empty() {
            self.transport.send_text(chat, messages::NO_FILES).await?;
            return Ok(SortOutcome::NothingToSort);
        }

        let files = records.len();
        let result = sorter::analyze(records);
        tracing::info!(
            owner = %owner,
            files,
            unparseable = result.unparseable().count(),
            missing_seasons = result.missing.len(),
            "Sorted uploads"
        );

        for message in render::report_messages(&result, &self.options.report) {
            self.transport.send_text(chat, &message).await?;
        }

        let delivery = deliver_all(
            self.transport.as_ref(),
            &self.limiter,
            chat,
            &result.ordered,
        )
        .await;

        let clear = delivery.is_complete() || self.options.delivery.clear_on_failure;

        if !delivery.is_complete() {
            let summary = messages::delivery_failed(
                &delivery.failed_names(),
                !clear,
                self.options.report.message_limit,
            );
            for message in summary {
                if let Err(e) = self.transport.send_text(chat, &message).await {
                    tracing::warn!(owner = %owner, error = %e, "Failed to send delivery summary");
                    break;
                }
            }
        }

        if clear {
            let removed = self.store.delete_all(owner)?;
            tracing::debug!(owner = %owner, removed, "Uploads cleared after sort");
        } else {
            tracing::info!(
                owner = %owner,
                failed = delivery.failures.len(),
                "Keeping uploads after partial delivery"
            );
        }

        Ok(SortOutcome::Sorted {
            files,
            missing_seasons: result.missing.len(),
            delivery,
            cleared: clear,
        })
    }
}
