//! Continue-on-error re-delivery of sorted files.

use episort_common::{ChatId, FileRecord};
use episort_parser::Identity;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use serde::Serialize;
use std::num::NonZeroU32;

use super::Transport;

/// Token bucket shared by every delivery.
pub type DeliveryLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

pub fn delivery_limiter(per_second: u32) -> DeliveryLimiter {
    let per_second = NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN);
    RateLimiter::direct(Quota::per_second(per_second))
}

/// A file the transport refused to send again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryFailure {
    pub name: String,
    pub error: String,
}

/// What happened to each file of a sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failures: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Send every file in order. A failure is recorded and logged, and the
/// loop moves on to the next file.
pub async fn deliver_all(
    transport: &dyn Transport,
    limiter: &DeliveryLimiter,
    chat: ChatId,
    ordered: &[(Identity, FileRecord)],
) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    for (identity, record) in ordered {
        limiter.until_ready().await;

        match transport.send_file(chat, &record.handle, record.kind).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                tracing::warn!(
                    owner = %record.owner,
                    chat = %chat,
                    identity = %identity,
                    name = %record.name,
                    error = %e,
                    "Failed to re-send file"
                );
                report.failures.push(DeliveryFailure {
                    name: record.name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}
