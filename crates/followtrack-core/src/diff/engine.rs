//! Snapshot comparison.
//!
//! The core entry point is [`compare_records`], which takes the record sets of
//! two snapshots (older first) and produces a [`ComparisonResult`].

use std::collections::{BTreeMap, BTreeSet};

use crate::diff::model::ComparisonResult;
use crate::model::RelationRecord;

/// Records of `side` whose username key is absent from `other`, one per key,
/// ordered by key. The first record for a key wins.
fn only_in(side: &[RelationRecord], other: &BTreeSet<String>) -> Vec<RelationRecord> {
    let mut picked: BTreeMap<String, &RelationRecord> = BTreeMap::new();
    for record in side {
        let key = record.username_key();
        if !other.contains(&key) {
            picked.entry(key).or_insert(record);
        }
    }
    picked.into_values().cloned().collect()
}

fn username_keys(records: &[RelationRecord]) -> BTreeSet<String> {
    records.iter().map(RelationRecord::username_key).collect()
}

/// Compare an older record set with a newer one.
///
/// Usernames match case-insensitively (see [`RelationRecord::username_key`]),
/// the same key the normalizer de-duplicates on. Detail records keep the
/// casing of their own side. Totals are raw record counts.
pub fn compare_records(old: &[RelationRecord], new: &[RelationRecord]) -> ComparisonResult {
    let old_names = username_keys(old);
    let new_names = username_keys(new);

    let gained = only_in(new, &old_names);
    let lost = only_in(old, &new_names);

    let result = ComparisonResult {
        gained_count: gained.len(),
        lost_count: lost.len(),
        gained,
        lost,
        old_total: old.len(),
        new_total: new.len(),
        net_change: new.len() as i64 - old.len() as i64,
    };

    tracing::debug!(
        gained_count = result.gained_count,
        lost_count = result.lost_count,
        net_change = result.net_change,
        "Compared record sets"
    );

    result
}
