//! Episort-Common: Shared types and utilities.
//!
//! This crate provides common functionality used across episort:
//!
//! - **Typed IDs**: Wrappers for chat users, chats, and opaque file handles
//! - **Core Types**: [`FileRecord`] and the [`MediaKind`] of an upload
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use episort_common::{Error, FileHandle, FileRecord, MediaKind, Result, UserId};
//!
//! let record = FileRecord::new(
//!     UserId::from(42),
//!     FileHandle::from("BQACAgIAAxkBAAIB"),
//!     "Show.S01E01.mkv",
//!     MediaKind::Document,
//! );
//! assert_eq!(record.owner, UserId::from(42));
//!
//! fn example() -> Result<()> {
//!     Err(Error::transport("chat not found"))
//! }
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
