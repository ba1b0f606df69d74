//! Text rendering of a [`SortResult`] for chat delivery.
//!
//! Bodies are plain lines; [`fenced_messages`] wraps them in Markdown code
//! blocks and splits them so no message exceeds the transport's limit.
//! Lengths are UTF-16 code units, which is how Telegram measures text.

use crate::config::ReportConfig;
use crate::sorter::{MissingEpisodes, SortResult};

pub const SORTED_HEADER: &str = "📦 SORTED ↓";
pub const MISSING_HEADER: &str = "❗ MISSING ↓";
pub const NO_MISSING: &str = "None 🎉";

const FENCE: &str = "```";

/// One `S01E02 - name` line per record, in sorted order.
pub fn sorted_body(result: &SortResult) -> String {
    result
        .ordered
        .iter()
        .map(|(identity, record)| format!("{} - {}", identity, fence_safe(&record.name)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `S01: E3, E7` line per season with gaps, or [`NO_MISSING`].
pub fn missing_body(result: &SortResult, max_listed: usize) -> String {
    if result.missing.is_empty() {
        return NO_MISSING.to_string();
    }

    result
        .missing
        .iter()
        .map(|(season, episodes)| format!("S{:02}: {}", season, episode_list(episodes, max_listed)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn episode_list(episodes: &MissingEpisodes, max_listed: usize) -> String {
    let mut list = episodes
        .iter()
        .take(max_listed)
        .map(|e| format!("E{e}"))
        .collect::<Vec<_>>()
        .join(", ");

    let total = episodes.len();
    let listed = total.min(max_listed as u64);
    if total > listed {
        list.push_str(&format!(", … (+{} more)", total - listed));
    }
    list
}

/// Both report messages, ready to send in order.
pub fn report_messages(result: &SortResult, report: &ReportConfig) -> Vec<String> {
    let mut messages = fenced_messages(SORTED_HEADER, &sorted_body(result), report.message_limit);
    messages.extend(fenced_messages(
        MISSING_HEADER,
        &missing_body(result, report.max_listed_missing),
        report.message_limit,
    ));
    messages
}

/// Wrap `body` as `header` plus a fenced code block, split at line
/// boundaries so every message is at most `limit` UTF-16 code units.
///
/// Lines longer than a whole message are cut at character boundaries.
pub fn fenced_messages(header: &str, body: &str, limit: usize) -> Vec<String> {
    // header + "\n```\n" + chunk + "\n```"
    let overhead = utf16_len(header) + 2 * FENCE.len() + 3;
    let budget = limit.saturating_sub(overhead).max(1);

    split_lines(body, budget)
        .into_iter()
        .map(|chunk| format!("{header}\n{FENCE}\n{chunk}\n{FENCE}"))
        .collect()
}

/// Group lines into chunks of at most `budget` UTF-16 code units.
pub fn split_lines(body: &str, budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in body.lines() {
        for piece in cut_line(line, budget) {
            let piece_len = utf16_len(&piece);
            let needed = if current.is_empty() { piece_len } else { piece_len + 1 };

            if current_len + needed > budget && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if !current.is_empty() {
                current.push('\n');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }

    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn cut_line(line: &str, budget: usize) -> Vec<String> {
    if utf16_len(line) <= budget {
        return vec![line.to_string()];
    }

    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_len = 0;
    for c in line.chars() {
        // A piece always takes at least one character, even a surrogate pair
        // wider than the budget.
        if piece_len + c.len_utf16() > budget && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            piece_len = 0;
        }
        piece.push(c);
        piece_len += c.len_utf16();
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

pub(crate) fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Names go inside a code fence; a backtick would end it early.
pub(crate) fn fence_safe(name: &str) -> String {
    name.replace('`', "'")
}
