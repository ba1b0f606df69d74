//! Ordered set of missing episode numbers.

use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Episodes absent from one season's observed `[min, max]` range.
///
/// Stored as disjoint ascending runs so a season spanning episodes 1 and
/// 20231015 costs two numbers, not twenty million.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingEpisodes {
    ranges: Vec<RangeInclusive<u64>>,
}

impl MissingEpisodes {
    /// Gaps between the given episodes, or `None` if they are contiguous.
    pub fn between(episodes: &BTreeSet<u64>) -> Option<Self> {
        let ranges: Vec<RangeInclusive<u64>> = episodes
            .iter()
            .zip(episodes.iter().skip(1))
            .filter(|(prev, next)| **next - **prev > 1)
            .map(|(prev, next)| (prev + 1)..=(next - 1))
            .collect();

        if ranges.is_empty() {
            None
        } else {
            Some(Self { ranges })
        }
    }

    /// The contiguous runs of missing episodes, ascending.
    pub fn ranges(&self) -> &[RangeInclusive<u64>] {
        &self.ranges
    }

    /// Every missing episode, ascending.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.ranges.iter().flat_map(|r| r.clone())
    }

    /// Number of missing episodes.
    pub fn len(&self) -> u64 {
        self.ranges
            .iter()
            .map(|r| r.end() - r.start() + 1)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, episode: u64) -> bool {
        self.ranges.iter().any(|r| r.contains(&episode))
    }
}
