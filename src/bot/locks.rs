//! Per-owner serialization.

use dashmap::DashMap;
use episort_common::UserId;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per owner.
///
/// Holding an owner's guard keeps uploads from landing between the read and
/// the clear of a sort. Different owners never contend.
#[derive(Default)]
pub struct OwnerLocks {
    locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl OwnerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `owner`'s records.
    pub async fn lock(&self, owner: UserId) -> OwnedMutexGuard<()> {
        // The map shard must not stay locked across the await.
        let mutex = self.locks.entry(owner).or_default().clone();
        mutex.lock_owned().await
    }

    /// Number of owners seen so far.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
