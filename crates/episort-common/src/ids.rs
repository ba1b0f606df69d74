//! Typed ID wrappers for type safety across episort.
//!
//! Chat platforms hand out plain integers for users and chats and opaque
//! strings for uploaded files. These newtypes keep them from being mixed up
//! (e.g. replying to a [`UserId`] where a [`ChatId`] is expected).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the end user that uploads files and requests sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// The raw platform identifier.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conversation that replies and re-delivered files are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// The raw platform identifier.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ChatId> for i64 {
    fn from(id: ChatId) -> Self {
        id.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier used to ask the transport to deliver a stored file again.
///
/// The sorting core never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileHandle(String);

impl FileHandle {
    /// Borrow the handle as the string the transport issued.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for FileHandle {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}

impl From<&str> for FileHandle {
    fn from(handle: &str) -> Self {
        Self(handle.to_string())
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
