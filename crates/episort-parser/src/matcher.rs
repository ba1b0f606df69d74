//! The prioritized matcher cascade.
//!
//! Each matcher either recognizes a name and returns its identity or
//! abstains with `None`. None of them can fail.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::identity::Identity;

// ---------- Regex patterns ----------

// `\d` is any Unicode decimal digit, so full-width and other scripts' digits
// count as numbers too.
static SEASON_EPISODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)s(\d+)[._ -]*e(\d+)").unwrap());

static EPISODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\[?e(\d+)\]?").unwrap());

static BARE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

static DECIMAL_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").unwrap());

/// Which rule of the cascade recognized a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchRule {
    /// `s<digits>` then `e<digits>`, e.g. `S01E02`, `s1.e2`, `S01 - E02`.
    SeasonEpisode,
    /// `e<digits>`, optionally bracketed, e.g. `[E05]`, `E191`.
    Episode,
    /// The first run of digits anywhere in the name.
    BareNumber,
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeasonEpisode => write!(f, "season+episode"),
            Self::Episode => write!(f, "episode"),
            Self::BareNumber => write!(f, "bare number"),
        }
    }
}

/// A single step of the cascade.
pub type Matcher = fn(&str) -> Option<Identity>;

/// The cascade, most specific first.
pub const MATCHERS: &[(MatchRule, Matcher)] = &[
    (MatchRule::SeasonEpisode, season_episode as Matcher),
    (MatchRule::Episode, episode_only as Matcher),
    (MatchRule::BareNumber, bare_number as Matcher),
];

/// Recognize `s<digits>` followed by `e<digits>`.
pub fn season_episode(name: &str) -> Option<Identity> {
    let caps = SEASON_EPISODE.captures(name)?;
    Some(Identity::new(
        parse_number(&caps[1]),
        parse_number(&caps[2]),
    ))
}

/// Recognize `e<digits>` or `[e<digits>]`; the season is always 1.
pub fn episode_only(name: &str) -> Option<Identity> {
    let caps = EPISODE.captures(name)?;
    Some(Identity::new(1, parse_number(&caps[1])))
}

/// Take the first digit run; the season is always 1.
pub fn bare_number(name: &str) -> Option<Identity> {
    let m = BARE_NUMBER.find(name)?;
    Some(Identity::new(1, parse_number(m.as_str())))
}

/// Decimal value of a digit run, saturating at `u64::MAX`.
///
/// Leading zeros are ignored.
fn parse_number(digits: &str) -> u64 {
    digits.chars().fold(0u64, |acc, c| {
        acc.saturating_mul(10).saturating_add(u64::from(digit_value(c)))
    })
}

/// Value of one decimal digit in any script.
///
/// Unicode encodes every set of decimal digits as a contiguous run `0..=9`,
/// and adjacent sets follow each other directly, so the value is the
/// distance from the start of the run modulo ten.
fn digit_value(c: char) -> u32 {
    if let Some(d) = c.to_digit(10) {
        return d;
    }

    let mut start = u32::from(c);
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    (u32::from(c) - start) % 10
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}
