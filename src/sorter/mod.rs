//! Sort & gap analysis over one owner's stored uploads.
//!
//! [`analyze`] is pure: no I/O, no shared state, and it cannot fail. The
//! caller is expected to handle the "nothing stored" case before calling it.

mod missing;

pub use missing::MissingEpisodes;

use episort_common::FileRecord;
use episort_parser::{extract, Identity, SENTINEL_SEASON};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of sorting one owner's records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortResult {
    /// Every record with its identity, ascending by `(season, episode, name)`.
    pub ordered: Vec<(Identity, FileRecord)>,
    /// Seasons that have at least one gap, ascending.
    pub missing: BTreeMap<u64, MissingEpisodes>,
}

impl SortResult {
    /// Records whose names matched no pattern.
    pub fn unparseable(&self) -> impl Iterator<Item = &FileRecord> {
        self.ordered
            .iter()
            .filter(|(identity, _)| identity.is_unparseable())
            .map(|(_, record)| record)
    }

    pub fn has_gaps(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// Order `records` by inferred identity and find missing episodes per season.
pub fn analyze(records: Vec<FileRecord>) -> SortResult {
    let mut ordered: Vec<(Identity, FileRecord)> = records
        .into_iter()
        .map(|record| (extract(&record.name), record))
        .collect();

    // Name breaks ties so duplicates and collisions come out the same way every time.
    ordered.sort_by(|(a_id, a), (b_id, b)| a_id.cmp(b_id).then_with(|| a.name.cmp(&b.name)));

    let mut seasons: BTreeMap<u64, BTreeSet<u64>> = BTreeMap::new();
    for (identity, _) in &ordered {
        if identity.season == SENTINEL_SEASON {
            continue;
        }
        seasons
            .entry(identity.season)
            .or_default()
            .insert(identity.episode);
    }

    let missing = seasons
        .into_iter()
        .filter_map(|(season, episodes)| {
            MissingEpisodes::between(&episodes).map(|gaps| (season, gaps))
        })
        .collect();

    SortResult { ordered, missing }
}
