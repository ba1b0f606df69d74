//! Bot API payloads (only the fields the bot reads).

use episort_common::{ChatId, FileHandle, MediaKind, UserId};
use serde::{Deserialize, Serialize};

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<u16>,
    pub parameters: Option<ResponseParameters>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseParameters {
    /// Seconds to wait before repeating a throttled request.
    pub retry_after: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
    pub document: Option<Attachment>,
    pub video: Option<Attachment>,
    pub audio: Option<Attachment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Document, video or audio attached to a message.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    pub file_id: String,
    pub file_unique_id: String,
    pub file_name: Option<String>,
}

/// Result of `getMe`.
#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: i64,
    pub username: Option<String>,
}

/// An upload found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub handle: FileHandle,
    pub name: String,
    pub kind: MediaKind,
}

/// A bot command found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Sort,
    Unknown(String),
}

impl Message {
    pub fn chat_id(&self) -> ChatId {
        ChatId::from(self.chat.id)
    }

    /// The sender, if the message has one.
    pub fn owner(&self) -> Option<UserId> {
        self.from.as_ref().map(|u| UserId::from(u.id))
    }

    /// The attached file, checked as document, then video, then audio.
    ///
    /// Files without a name are recorded under their unique id.
    pub fn upload(&self) -> Option<Upload> {
        let (attachment, kind) = [
            (&self.document, MediaKind::Document),
            (&self.video, MediaKind::Video),
            (&self.audio, MediaKind::Audio),
        ]
        .into_iter()
        .find_map(|(a, kind)| a.as_ref().map(|a| (a, kind)))?;

        let name = attachment
            .file_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| attachment.file_unique_id.clone());

        Some(Upload {
            handle: FileHandle::from(attachment.file_id.as_str()),
            name,
            kind,
        })
    }

    /// The command in the message text.
    ///
    /// A `@botname` suffix is accepted only when it names this bot; commands
    /// addressed to another bot yield `None`.
    pub fn command(&self, bot_username: Option<&str>) -> Option<Command> {
        let text = self.text.as_deref()?.trim_start();
        let word = text.strip_prefix('/')?.split_whitespace().next()?;

        let (name, target) = match word.split_once('@') {
            Some((name, target)) => (name, Some(target)),
            None => (word, None),
        };

        if let (Some(target), Some(me)) = (target, bot_username) {
            if !target.eq_ignore_ascii_case(me) {
                return None;
            }
        }

        Some(match name.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "sort" => Command::Sort,
            _ => Command::Unknown(name.to_string()),
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    pub parse_mode: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdates {
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}
