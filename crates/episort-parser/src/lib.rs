//! # episort-parser
//!
//! Infers a `(season, episode)` identity from a file name.
//!
//! Real-world uploads are named inconsistently, so extraction is a cascade
//! of matchers ordered from most to least specific. The first matcher that
//! recognizes the name wins; a name nothing recognizes gets the
//! [`Identity::UNPARSEABLE`] sentinel, which sorts after every real identity.
//!
//! ## Quick Start
//!
//! ```
//! use episort_parser::{extract, Identity};
//!
//! assert_eq!(extract("Show.S02E05.1080p.mkv"), Identity::new(2, 5));
//! assert_eq!(extract("[E191] clip.mp4"), Identity::new(1, 191));
//! assert_eq!(extract("07.mp4"), Identity::new(1, 7));
//! assert!(extract("trailer.mkv").is_unparseable());
//! ```
//!
//! Matching is case-insensitive and never fails.

mod identity;
pub mod matcher;

pub use identity::{Identity, SENTINEL_SEASON};
pub use matcher::{MatchRule, MATCHERS};

/// Extract the identity of a file name.
///
/// Tries every entry of [`MATCHERS`] in order and returns the first match,
/// or [`Identity::UNPARSEABLE`] when none applies.
///
/// # Examples
///
/// ```
/// use episort_parser::extract;
///
/// let id = extract("show_s01-e03.mkv");
/// assert_eq!((id.season, id.episode), (1, 3));
/// ```
pub fn extract(name: &str) -> Identity {
    extract_with_rule(name).0
}

/// Like [`extract`], but also reports which rule produced the identity.
///
/// The rule is `None` when the sentinel was returned.
pub fn extract_with_rule(name: &str) -> (Identity, Option<MatchRule>) {
    MATCHERS
        .iter()
        .find_map(|(rule, matcher)| matcher(name).map(|identity| (identity, Some(*rule))))
        .unwrap_or((Identity::UNPARSEABLE, None))
}
