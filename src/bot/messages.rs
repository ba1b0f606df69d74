//! Fixed reply texts.
//!
//! Replies are sent with legacy Markdown, so literal `[`, `_`, `*` and
//! backticks must be escaped or kept inside a code fence.

use crate::render;

pub const HELP: &str = "📁 File sorting bot active!\n\n\
    • Upload files in any format\n\
    • Supports SxxEyy, \\[E##], number only\n\
    • Sorts by season → episode\n\
    • Detects missing episodes\n\n\
    When ready: /sort";

pub const STORED: &str = "Stored ✔";

pub const NO_FILES: &str = "❌ No files stored.";

pub const UNKNOWN_COMMAND: &str = "Unknown command. Send files, then /sort. /start shows help.";

/// Summary sent after a sort in which some files could not be re-sent.
///
/// The names are listed in a code fence, split over several messages when
/// they do not fit in `limit`.
pub fn delivery_failed(names: &[&str], kept: bool, limit: usize) -> Vec<String> {
    let advice = if kept {
        "Your files were kept, send /sort to try again."
    } else {
        "Upload them again if you still need them."
    };
    let header = format!("⚠️ {} file(s) could not be re-sent. {advice}", names.len());

    let body = names
        .iter()
        .map(|name| render::fence_safe(name))
        .collect::<Vec<_>>()
        .join("\n");
    render::fenced_messages(&header, &body, limit)
}
