//! Episort-DB: persistence for uploads waiting to be sorted.
//!
//! This crate stores [`FileRecord`](episort_common::FileRecord)s in SQLite
//! using rusqlite and r2d2 connection pooling, and exposes them through the
//! owner-scoped [`FileStore`] trait the bot service depends on.
//!
//! # Modules
//!
//! - `migrations` - Embedded schema migrations
//! - `pool` - Connection pool management
//! - `queries` - Raw query functions over a connection
//! - `store` - The [`FileStore`] trait and its SQLite implementation
//!
//! # Example
//!
//! ```
//! use episort_common::{FileHandle, FileRecord, MediaKind, UserId};
//! use episort_db::{FileStore, SqliteFileStore};
//! use episort_db::pool::init_memory_pool;
//!
//! let store = SqliteFileStore::new(init_memory_pool().unwrap());
//! let owner = UserId::from(1);
//! store
//!     .put(&FileRecord::new(owner, FileHandle::from("h1"), "E01.mkv", MediaKind::Video))
//!     .unwrap();
//! assert_eq!(store.get_all(owner).unwrap().len(), 1);
//! ```

pub mod migrations;
pub mod pool;
pub mod queries;
pub mod store;

pub use store::{FileStore, SqliteFileStore};
