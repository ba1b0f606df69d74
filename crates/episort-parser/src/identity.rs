//! The `(season, episode)` identity inferred from a name.

use std::fmt;

/// Season assigned to names no matcher recognized.
///
/// Gap analysis skips this season entirely.
pub const SENTINEL_SEASON: u64 = 999;

/// Position of a file within a show.
///
/// Ordering is lexicographic on `(season, episode)`, which is the sort order
/// used when files are re-delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identity {
    pub season: u64,
    pub episode: u64,
}

impl Identity {
    /// Placeholder for names without any recognizable number.
    pub const UNPARSEABLE: Identity = Identity {
        season: SENTINEL_SEASON,
        episode: u64::MAX,
    };

    #[must_use]
    pub const fn new(season: u64, episode: u64) -> Self {
        Self { season, episode }
    }

    /// Whether this identity belongs to the sentinel season.
    #[must_use]
    pub fn is_unparseable(&self) -> bool {
        self.season == SENTINEL_SEASON
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::UNPARSEABLE
    }
}

/// Numbers too long for a `u64` are clamped to `u64::MAX`; outside the
/// sentinel season such a value is shown with a trailing `+`.
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marked = !self.is_unparseable();
        write!(
            f,
            "S{:02}{}E{:02}{}",
            self.season,
            clamp_marker(marked, self.season),
            self.episode,
            clamp_marker(marked, self.episode),
        )
    }
}

fn clamp_marker(marked: bool, value: u64) -> &'static str {
    if marked && value == u64::MAX {
        "+"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_display_pads_to_two_digits() {
        assert_eq!(Identity::new(1, 2).to_string(), "S01E02");
        assert_eq!(Identity::new(12, 345).to_string(), "S12E345");
    }

    #[test]
    fn identity_orders_by_season_then_episode() {
        let mut ids = vec![
            Identity::UNPARSEABLE,
            Identity::new(2, 1),
            Identity::new(1, 10),
            Identity::new(1, 2),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                Identity::new(1, 2),
                Identity::new(1, 10),
                Identity::new(2, 1),
                Identity::UNPARSEABLE,
            ]
        );
    }

    #[test]
    fn sentinel_season_is_unparseable() {
        assert!(Identity::UNPARSEABLE.is_unparseable());
        assert!(Identity::new(SENTINEL_SEASON, 1).is_unparseable());
        assert!(!Identity::new(1, u64::MAX).is_unparseable());
    }

    #[test]
    fn clamped_numbers_are_marked() {
        assert_eq!(
            Identity::new(1, u64::MAX).to_string(),
            "S01E18446744073709551615+"
        );
        assert_eq!(
            Identity::new(u64::MAX, 3).to_string(),
            "S18446744073709551615+E03"
        );
        assert_eq!(
            Identity::new(1, u64::MAX - 1).to_string(),
            "S01E18446744073709551614"
        );
        assert_eq!(
            Identity::UNPARSEABLE.to_string(),
            "S999E18446744073709551615"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn identity_serializes_as_object() {
        let json = serde_json::to_string(&Identity::new(1, 5)).unwrap();
        assert_eq!(json, r#"{"season":1,"episode":5}"#);
    }
}
