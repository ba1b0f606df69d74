//! Owner-scoped record store.
//!
//! The bot service only ever sees this trait; the concrete backend is
//! injected at startup.

use episort_common::{FileRecord, Result, UserId};

use crate::pool::{get_conn, DbPool};
use crate::queries::files;

/// Storage for uploads waiting to be sorted.
///
/// Every read and delete is scoped to one owner.
pub trait FileStore: Send + Sync {
    /// Append a record. Duplicates are kept.
    fn put(&self, record: &FileRecord) -> Result<()>;

    /// All records of `owner`. The order is not meaningful to callers.
    fn get_all(&self, owner: UserId) -> Result<Vec<FileRecord>>;

    /// Remove every record of `owner`, returning how many were removed.
    fn delete_all(&self, owner: UserId) -> Result<usize>;
}

/// [`FileStore`] backed by the SQLite pool.
#[derive(Clone)]
pub struct SqliteFileStore {
    pool: DbPool,
}

impl SqliteFileStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl FileStore for SqliteFileStore {
    fn put(&self, record: &FileRecord) -> Result<()> {
        let conn = get_conn(&self.pool)?;
        let stored = files::insert_file(&conn, record)?;
        tracing::debug!(
            owner = %record.owner,
            id = stored.id,
            name = %record.name,
            "Stored upload"
        );
        Ok(())
    }

    fn get_all(&self, owner: UserId) -> Result<Vec<FileRecord>> {
        let conn = get_conn(&self.pool)?;
        let stored = files::list_files_for_owner(&conn, owner)?;
        Ok(stored.into_iter().map(|f| f.record).collect())
    }

    fn delete_all(&self, owner: UserId) -> Result<usize> {
        let conn = get_conn(&self.pool)?;
        let removed = files::delete_files_for_owner(&conn, owner)?;
        tracing::debug!(owner = %owner, removed, "Cleared uploads");
        Ok(removed)
    }
}
